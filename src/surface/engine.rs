//! Seam between surfaces and the embedded rendering engine.
//!
//! The engine is an opaque handle owned by exactly one [`RenderSurface`]. All
//! calls are fire-and-forget: loads and script evaluations complete later,
//! and completion comes back through the host's navigation layer as
//! [`ContentLoadCoordinator::document_finished`].
//!
//! [`RenderSurface`]: super::RenderSurface
//! [`ContentLoadCoordinator::document_finished`]: crate::application::ContentLoadCoordinator::document_finished

use super::bridge::BridgeChannel;

/// One-time configuration applied to a freshly created engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineSetting {
    /// The view never scrolls on its own; it grows to fit its content.
    DisableScrolling,
    /// Host content shows through wherever the document draws nothing.
    TransparentBackground,
    /// Vertical size follows the last reported content height.
    HugContentVertically,
    /// Allow attaching developer inspection tooling.
    Inspectable,
    /// Vertical wheel events go to the enclosing view instead of the document.
    ForwardVerticalScrollToParent,
    /// Remove the "Reload" entry from the context menu.
    HideReloadMenuItem,
}

/// Opaque rendering-engine instance.
pub trait RenderEngine {
    /// Replace the entire document with `html`.
    fn load_html(&mut self, html: &str);

    /// Evaluate `script` in the page context without waiting for a result.
    fn evaluate_script(&mut self, script: &str);

    fn apply_setting(&mut self, setting: EngineSetting);

    /// Start delivering messages posted by the page on `channel`.
    ///
    /// Engines bridging through `window.ipc` must also set
    /// `channel.name()` to `true` in
    /// [`IPC_CHANNEL_REGISTRY`](super::bridge::IPC_CHANNEL_REGISTRY) for every
    /// document they load, and clear it in `remove_all_message_handlers`.
    fn add_message_handler(&mut self, channel: BridgeChannel);

    fn remove_all_message_handlers(&mut self);

    /// Ask the host layout to re-measure the view at `height`.
    fn invalidate_intrinsic_size(&mut self, height: f64);
}

/// Creates engines that share one engine-process resource.
pub trait EngineFactory {
    type Engine: RenderEngine;
    /// Shared process (or process pool) amortized across every engine.
    type Process;

    fn spawn_process(&self) -> Self::Process;

    fn create_engine(&self, process: &Self::Process) -> Self::Engine;
}
