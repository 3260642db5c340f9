//! Error types for scopix-annotate

use thiserror::Error;

/// Errors that can occur during annotation rendering
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scopix_core::Error),
}

/// Result type for annotation operations
pub type AnnotateResult<T> = Result<T, AnnotateError>;
