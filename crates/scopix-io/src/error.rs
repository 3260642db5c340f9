//! Error types for scopix-io

use thiserror::Error;

/// Errors that can occur while decoding or encoding images
#[derive(Debug, Error)]
pub enum IoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] scopix_core::Error),

    /// Codec error from the image backend
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
