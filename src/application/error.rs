use std::error::Error as StdError;

use thiserror::Error;

use crate::domain::StyleResolutionError;
use crate::surface::SurfaceId;

/// Error chain flattened for structured logging.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }
}

/// A display request could not be brought onto its surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    #[error("failed to resolve stylesheet for {surface}")]
    Style {
        surface: SurfaceId,
        #[source]
        source: StyleResolutionError,
    },
}

impl CoordinatorError {
    pub fn style(surface: SurfaceId, source: StyleResolutionError) -> Self {
        Self::Style { surface, source }
    }
}
