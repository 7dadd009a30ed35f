//! Style resolution: turns a [`StyleSpec`] into literal stylesheet text.

use include_dir::Dir;
use tracing::debug;

use crate::domain::{HostPlatform, StyleResolutionError, StyleSpec};
use crate::infra::assets::{self, AssetSource};

/// Resolves style specs to CSS. Implementations must be pure: no caching,
/// no side effects. Callers cache the applied identity, not the text.
pub trait StyleResolver {
    fn resolve(&self, spec: &StyleSpec) -> Result<String, StyleResolutionError>;
}

/// Resolves named styles from an asset source using the platform variant.
#[derive(Debug, Clone)]
pub struct BundledStyleResolver<S = &'static Dir<'static>> {
    platform: HostPlatform,
    source: S,
}

impl BundledStyleResolver {
    /// Resolver over the stylesheets compiled into the crate.
    pub fn new(platform: HostPlatform) -> Self {
        Self {
            platform,
            source: assets::bundled(),
        }
    }
}

impl<S: AssetSource> BundledStyleResolver<S> {
    pub fn with_source(platform: HostPlatform, source: S) -> Self {
        Self { platform, source }
    }

    pub fn platform(&self) -> HostPlatform {
        self.platform
    }
}

impl<S: AssetSource> StyleResolver for BundledStyleResolver<S> {
    fn resolve(&self, spec: &StyleSpec) -> Result<String, StyleResolutionError> {
        match spec {
            StyleSpec::Custom(css) => Ok(css.clone()),
            StyleSpec::Named(style) => {
                let name = style.stylesheet_name(self.platform);
                let css = self.source.read_text(&name)?;
                debug!(
                    stylesheet = %name,
                    bytes = css.len(),
                    "Named stylesheet resolved"
                );
                Ok(css.to_string())
            }
        }
    }
}
