//! Scopix - Image inspection toolkit
//!
//! A small library for inspecting and comparing images:
//!
//! - Comparison: structural similarity with a difference map, and ORB
//!   feature matching with a side-by-side visualization
//! - Filters: Gaussian blur, Canny edges, binary threshold
//! - Annotation: bitmap-font text overlays
//! - Histograms: per-channel intensity distributions
//!
//! # Example
//!
//! ```
//! use scopix::{Channels, Raster};
//! use scopix::compare::{Comparison, Method};
//!
//! let img = Raster::new(64, 48, Channels::Rgb).unwrap();
//! let result = scopix::compare::compare(&img, &img, Method::Ssim).unwrap();
//! match result {
//!     Comparison::Ssim { score, .. } => assert_eq!(score, 1.0),
//!     Comparison::Orb { .. } => unreachable!(),
//! }
//! ```

// Re-export core types (primary data structures used everywhere)
pub use scopix_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use scopix_annotate as annotate;
pub use scopix_compare as compare;
pub use scopix_filter as filter;
pub use scopix_hist as hist;
pub use scopix_io as io;
