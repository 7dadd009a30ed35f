use crate::config::PoolSettings;
use crate::infra::assets::DocumentAssets;
use crate::infra::error::InfraError;
use crate::surface::{EngineFactory, RenderSurfacePool};

use super::navigation::{LinkOpener, LogOnlyOpener};
use super::style::{BundledStyleResolver, StyleResolver};

/// Process-scoped state shared by every coordinator on the UI thread.
///
/// Hosts build one runtime, wrap it in an `Rc`, and hand clones to each
/// coordinator they create. Tests build isolated runtimes freely.
pub struct MarkdownRuntime<F: EngineFactory> {
    pool: RenderSurfacePool<F>,
    resolver: Box<dyn StyleResolver>,
    document: DocumentAssets,
    link_opener: Box<dyn LinkOpener>,
}

impl<F: EngineFactory> MarkdownRuntime<F> {
    pub fn new(
        pool: RenderSurfacePool<F>,
        resolver: Box<dyn StyleResolver>,
        document: DocumentAssets,
        link_opener: Box<dyn LinkOpener>,
    ) -> Self {
        Self {
            pool,
            resolver,
            document,
            link_opener,
        }
    }

    /// Runtime over the embedded assets, with links only logged until
    /// [`with_link_opener`](Self::with_link_opener) installs a system opener.
    pub fn bundled(factory: F, settings: &PoolSettings) -> Result<Self, InfraError> {
        let document = DocumentAssets::bundled()?.clone();
        Ok(Self::new(
            RenderSurfacePool::new(factory, settings),
            Box::new(BundledStyleResolver::new(settings.platform)),
            document,
            Box::new(LogOnlyOpener),
        ))
    }

    pub fn with_link_opener(mut self, opener: impl LinkOpener + 'static) -> Self {
        self.link_opener = Box::new(opener);
        self
    }

    pub fn pool(&self) -> &RenderSurfacePool<F> {
        &self.pool
    }

    pub fn resolver(&self) -> &dyn StyleResolver {
        self.resolver.as_ref()
    }

    pub fn document(&self) -> &DocumentAssets {
        &self.document
    }

    pub fn link_opener(&self) -> &dyn LinkOpener {
        self.link_opener.as_ref()
    }
}
