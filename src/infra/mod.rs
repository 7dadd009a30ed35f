//! Infrastructure adapters: embedded assets and telemetry bootstrap.

pub mod assets;
pub mod error;
pub mod telemetry;
