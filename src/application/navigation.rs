use tracing::info;
use url::Url;

const SOURCE: &str = "application::navigation";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// The user activated a link inside the document.
    LinkActivated,
    /// Anything else: the initial document load, script-driven navigation.
    Other,
}

/// Navigation the engine is about to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationAction {
    pub kind: NavigationKind,
    pub url: Option<Url>,
}

impl NavigationAction {
    pub fn link(url: Url) -> Self {
        Self {
            kind: NavigationKind::LinkActivated,
            url: Some(url),
        }
    }

    pub fn other(url: Option<Url>) -> Self {
        Self {
            kind: NavigationKind::Other,
            url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    Allow,
    Cancel,
}

/// Opens a URL in the system's default handler.
pub trait LinkOpener {
    fn open(&self, url: &Url);
}

/// Opener for hosts without a system handler: activations are only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyOpener;

impl LinkOpener for LogOnlyOpener {
    fn open(&self, url: &Url) {
        info!(
            target_module = SOURCE,
            url = %url,
            "Link activated without a system opener"
        );
    }
}
