//! Render surfaces and their pool.
//!
//! A [`RenderSurface`] wraps one opaque [`RenderEngine`] instance together
//! with the state needed to reuse it across display requests:
//!
//! - the style whose document is currently loaded, so a request with the
//!   same style only pushes new markdown instead of reloading everything;
//! - the last content height reported by the page;
//! - the bridge channels the page may post on.
//!
//! Engines sit behind [`EngineFactory`], so a host plugs in its own webview
//! binding and tests plug in recording fakes.

pub mod bridge;
mod capabilities;
mod document;
mod engine;
mod pool;
mod render_surface;

pub use bridge::{BridgeChannel, BridgeError, BridgeMessage};
pub use capabilities::PlatformCapabilities;
pub use document::{SCRIPT_PLACEHOLDER, STYLESHEET_PLACEHOLDER, build_document};
pub use engine::{EngineFactory, EngineSetting, RenderEngine};
pub use pool::RenderSurfacePool;
pub use render_surface::{LoadTicket, RenderSurface, SurfaceId};
