//! Error types for scopix-compare

use thiserror::Error;

/// Errors that can occur during image comparison
#[derive(Debug, Error)]
pub enum CompareError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scopix_core::Error),
}

/// Result type for comparison operations
pub type CompareResult<T> = Result<T, CompareError>;
