//! Display coordination: style resolution, display requests, and the
//! per-view coordinator driving a pooled surface.

pub mod coordinator;
pub mod error;
pub mod lifecycle;
pub mod navigation;
pub mod request;
pub mod runtime;
pub mod style;

pub use coordinator::{ContentLoadCoordinator, LoadPhase};
pub use error::{CoordinatorError, ErrorReport};
pub use lifecycle::ViewLifecycle;
pub use navigation::{LinkOpener, LogOnlyOpener, NavigationAction, NavigationKind, NavigationPolicy};
pub use request::{DisplayRequest, LinkHandler, RenderedHandler};
pub use runtime::MarkdownRuntime;
pub use style::{BundledStyleResolver, StyleResolver};
