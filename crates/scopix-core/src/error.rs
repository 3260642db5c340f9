//! Error types for scopix-core
//!
//! A single typed error shared by the raster model and, through `#[from]`
//! wrappers, by every engine crate. Each variant carries enough context
//! for a caller-facing message without exposing internals.

use thiserror::Error;

/// Scopix core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Sample buffer length does not match dimensions and channel count
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// Two images were required to have equal dimensions
    #[error("dimension mismatch: {}x{} vs {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Wrong channel count for this operation
    #[error("channel mismatch: expected {expected} channel(s), got {actual}")]
    ChannelMismatch { expected: u32, actual: u32 },

    /// Unsupported channel count in decoded input
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for scopix core operations
pub type Result<T> = std::result::Result<T, Error>;
