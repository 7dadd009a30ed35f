use thiserror::Error;

/// Failure to read a bundled asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("bundled asset `{name}` not found")]
    Missing { name: String },
    #[error("bundled asset `{name}` is not valid UTF-8")]
    NotUtf8 { name: String },
}

impl AssetError {
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    pub fn not_utf8(name: impl Into<String>) -> Self {
        Self::NotUtf8 { name: name.into() }
    }

    /// Name of the asset that failed to load.
    pub fn name(&self) -> &str {
        match self {
            AssetError::Missing { name } | AssetError::NotUtf8 { name } => name,
        }
    }
}

/// A style spec could not be turned into stylesheet text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleResolutionError {
    #[error("stylesheet asset `{name}` is missing")]
    MissingAsset { name: String },
    #[error("stylesheet asset `{name}` could not be read")]
    Unreadable { name: String },
}

impl From<AssetError> for StyleResolutionError {
    fn from(error: AssetError) -> Self {
        match error {
            AssetError::Missing { name } => Self::MissingAsset { name },
            AssetError::NotUtf8 { name } => Self::Unreadable { name },
        }
    }
}
