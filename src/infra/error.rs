use thiserror::Error;

use crate::domain::AssetError;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }
}
