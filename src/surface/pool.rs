//! Pre-warmed pool of render surfaces.
//!
//! The pool belongs to the host's UI thread and is `!Sync`. Acquire and
//! release are serialized by that thread; interior mutability is
//! `RefCell`/`Cell`, never a lock.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use metrics::{counter, gauge};
use tracing::{debug, info};

use crate::config::PoolSettings;
use crate::infra::telemetry::{POOL_ACQUIRE_TOTAL, POOL_IDLE, POOL_RELEASE_TOTAL};

use super::capabilities::PlatformCapabilities;
use super::engine::EngineFactory;
use super::render_surface::{RenderSurface, SurfaceId};

const SOURCE: &str = "surface::pool";

/// Recycles [`RenderSurface`]s bound to one shared engine process.
///
/// Acquire never blocks or fails: an empty pool builds a new surface.
/// There is no size cap and no shrinking; a surface dropped by its owner
/// instead of released is simply gone.
pub struct RenderSurfacePool<F: EngineFactory> {
    factory: F,
    process: F::Process,
    capabilities: PlatformCapabilities,
    retain_document: bool,
    idle: RefCell<VecDeque<RenderSurface<F::Engine>>>,
    next_id: Cell<u64>,
}

impl<F: EngineFactory> RenderSurfacePool<F> {
    /// Build a pool and pre-warm `settings.initial_size` surfaces.
    pub fn new(factory: F, settings: &PoolSettings) -> Self {
        Self::with_capabilities(
            factory,
            settings,
            PlatformCapabilities::for_platform(settings.platform),
        )
    }

    pub fn with_capabilities(
        factory: F,
        settings: &PoolSettings,
        capabilities: PlatformCapabilities,
    ) -> Self {
        let process = factory.spawn_process();
        let pool = Self {
            factory,
            process,
            capabilities,
            retain_document: settings.retain_document_across_reuse,
            idle: RefCell::new(VecDeque::with_capacity(settings.initial_size)),
            next_id: Cell::new(0),
        };

        for _ in 0..settings.initial_size {
            let surface = pool.create_surface();
            pool.idle.borrow_mut().push_back(surface);
        }

        info!(
            target_module = SOURCE,
            platform = settings.platform.as_str(),
            initial_size = settings.initial_size,
            retain_document = settings.retain_document_across_reuse,
            "Surface pool pre-warmed"
        );
        gauge!(POOL_IDLE).set(settings.initial_size as f64);
        pool
    }

    /// Take an idle surface, or build one if none is idle.
    pub fn acquire(&self) -> RenderSurface<F::Engine> {
        let (surface, source, idle_remaining) = {
            let mut idle = self.idle.borrow_mut();
            let pooled = idle.pop_front();
            let remaining = idle.len();
            match pooled {
                Some(surface) => (surface, "idle", remaining),
                None => (self.create_surface(), "fresh", remaining),
            }
        };

        counter!(POOL_ACQUIRE_TOTAL, "source" => source).increment(1);
        gauge!(POOL_IDLE).set(idle_remaining as f64);
        debug!(
            target_module = SOURCE,
            surface_id = %surface.id(),
            source,
            idle_remaining,
            "Surface acquired"
        );
        surface
    }

    /// Reset `surface` and make it available again.
    ///
    /// Callers must only release surfaces they own; releasing the same
    /// surface twice is not detected.
    pub fn release(&self, mut surface: RenderSurface<F::Engine>) {
        surface.reset_for_reuse(self.retain_document);
        let surface_id = surface.id();

        let idle_count = {
            let mut idle = self.idle.borrow_mut();
            idle.push_back(surface);
            idle.len()
        };

        counter!(POOL_RELEASE_TOTAL).increment(1);
        gauge!(POOL_IDLE).set(idle_count as f64);
        debug!(
            target_module = SOURCE,
            surface_id = %surface_id,
            idle_count,
            "Surface released"
        );
    }

    pub fn idle_len(&self) -> usize {
        self.idle.borrow().len()
    }

    /// Total surfaces ever built by this pool, pre-warmed or fresh.
    pub fn created(&self) -> u64 {
        self.next_id.get()
    }

    /// Shared engine-process resource.
    pub fn process(&self) -> &F::Process {
        &self.process
    }

    pub fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    fn create_surface(&self) -> RenderSurface<F::Engine> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let engine = self.factory.create_engine(&self.process);
        RenderSurface::new(SurfaceId::new(id), engine, self.capabilities.clone())
    }
}
