//! Stylesheet selection and display identity.

use serde::{Deserialize, Serialize};

use super::types::HostPlatform;

/// Stylesheets bundled with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultStyle {
    #[default]
    Standard,
    Messaging,
}

impl DefaultStyle {
    /// Asset path of the platform variant of this style inside the bundle.
    pub fn stylesheet_name(self, platform: HostPlatform) -> String {
        let base = match self {
            DefaultStyle::Standard => "default",
            DefaultStyle::Messaging => "messaging",
        };
        format!("stylesheets/{base}-{}.css", platform.as_str())
    }
}

/// Stylesheet a surface should display with.
///
/// Compared by value: two `Custom` specs with identical text are the same
/// style, which is what lets a surface skip a full document reload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleSpec {
    Named(DefaultStyle),
    Custom(String),
}

impl StyleSpec {
    /// Custom stylesheet text wins over the default style when present.
    pub fn from_parts(custom_stylesheet: Option<String>, default_style: DefaultStyle) -> Self {
        match custom_stylesheet {
            Some(css) => StyleSpec::Custom(css),
            None => StyleSpec::Named(default_style),
        }
    }

    /// Short label safe to put in log fields; never includes custom CSS text.
    pub fn label(&self) -> String {
        match self {
            StyleSpec::Named(DefaultStyle::Standard) => "named:standard".to_string(),
            StyleSpec::Named(DefaultStyle::Messaging) => "named:messaging".to_string(),
            StyleSpec::Custom(css) => format!("custom:{}b", css.len()),
        }
    }
}

impl Default for StyleSpec {
    fn default() -> Self {
        StyleSpec::Named(DefaultStyle::Standard)
    }
}

impl From<DefaultStyle> for StyleSpec {
    fn from(style: DefaultStyle) -> Self {
        StyleSpec::Named(style)
    }
}

/// What a display should currently show. Hosts use it to key their own
/// caches; the surface machinery only ever compares the style half.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheIdentity {
    pub markdown_content: String,
    pub style: StyleSpec,
}

impl CacheIdentity {
    pub fn new(markdown_content: impl Into<String>, style: StyleSpec) -> Self {
        Self {
            markdown_content: markdown_content.into(),
            style,
        }
    }
}
