//! Domain value types and error taxonomy.

pub mod error;
pub mod style;
pub mod types;

pub use error::{AssetError, StyleResolutionError};
pub use style::{CacheIdentity, DefaultStyle, StyleSpec};
pub use types::HostPlatform;
