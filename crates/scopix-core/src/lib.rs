//! Scopix Core - Raster data model and shared primitives
//!
//! This crate provides the data structures used throughout the scopix
//! image inspection toolkit:
//!
//! - [`Raster`] / [`RasterMut`] - The image container (immutable / mutable)
//! - [`Channels`] - Grayscale vs. RGB sample layout
//! - [`Color`] and the drawing helpers in [`graphics`]
//! - The shared [`Error`] type wrapped by every engine crate
//!
//! Color data is RGB end to end; there is no alternative channel order
//! anywhere in the pipeline.

pub mod convert;
pub mod error;
pub mod graphics;
pub mod raster;

pub use convert::{LUMA_BLUE, LUMA_GREEN, LUMA_RED, luma};
pub use error::{Error, Result};
pub use graphics::{Color, circle_outline_points, line_points};
pub use raster::{Channels, Raster, RasterMut};
