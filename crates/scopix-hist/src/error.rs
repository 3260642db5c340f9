//! Error types for scopix-hist

use thiserror::Error;

/// Errors that can occur during histogram computation
#[derive(Debug, Error)]
pub enum HistError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scopix_core::Error),
}

/// Result type for histogram operations
pub type HistResult<T> = Result<T, HistError>;
