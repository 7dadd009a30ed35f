use std::fmt;
use std::rc::Rc;

use url::Url;

use crate::domain::{CacheIdentity, DefaultStyle, StyleSpec};

pub type LinkHandler = Rc<dyn Fn(&Url)>;
pub type RenderedHandler = Rc<dyn Fn(&str)>;

/// What the host wants shown: markdown, its style, and optional callbacks.
#[derive(Clone, Default)]
pub struct DisplayRequest {
    pub markdown: String,
    pub style: StyleSpec,
    pub link_handler: Option<LinkHandler>,
    pub rendered_handler: Option<RenderedHandler>,
}

impl DisplayRequest {
    /// Request `markdown` with the standard bundled style.
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: StyleSpec) -> Self {
        self.style = style;
        self
    }

    /// Use literal CSS instead of a bundled stylesheet.
    pub fn with_custom_stylesheet(self, css: impl Into<String>) -> Self {
        self.with_style(StyleSpec::Custom(css.into()))
    }

    /// Use a bundled stylesheet. Replaces any custom stylesheet set earlier.
    pub fn with_default_style(self, style: DefaultStyle) -> Self {
        self.with_style(StyleSpec::Named(style))
    }

    /// Route activated links to `handler` instead of the system opener.
    pub fn on_link_activation(mut self, handler: impl Fn(&Url) + 'static) -> Self {
        self.link_handler = Some(Rc::new(handler));
        self
    }

    /// Receive the page's rendered HTML after every render pass.
    pub fn on_rendered(mut self, handler: impl Fn(&str) + 'static) -> Self {
        self.rendered_handler = Some(Rc::new(handler));
        self
    }

    pub fn cache_identity(&self) -> CacheIdentity {
        CacheIdentity::new(self.markdown.clone(), self.style.clone())
    }
}

impl fmt::Debug for DisplayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayRequest")
            .field("markdown_bytes", &self.markdown.len())
            .field("style", &self.style.label())
            .field("link_handler", &self.link_handler.is_some())
            .field("rendered_handler", &self.rendered_handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn builders_compose() {
        let request = DisplayRequest::new("# Hi")
            .with_custom_stylesheet("p{}")
            .with_default_style(DefaultStyle::Messaging);

        assert_eq!(request.style, StyleSpec::Named(DefaultStyle::Messaging));
        assert_eq!(
            request.cache_identity(),
            CacheIdentity::new("# Hi", StyleSpec::Named(DefaultStyle::Messaging))
        );
        assert!(request.link_handler.is_none());
        assert!(request.rendered_handler.is_none());
    }

    #[test]
    fn handlers_are_invocable() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let request = DisplayRequest::new("")
            .on_rendered(move |html| sink.borrow_mut().push(html.to_string()));

        if let Some(handler) = &request.rendered_handler {
            handler("<p>x</p>");
        }
        assert_eq!(*seen.borrow(), vec!["<p>x</p>".to_string()]);
    }

    #[test]
    fn debug_hides_content() {
        let request = DisplayRequest::new("secret").on_link_activation(|_| {});
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("link_handler: true"));
    }
}
