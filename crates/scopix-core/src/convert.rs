//! Channel conversions
//!
//! RGB to grayscale uses the BT.601 luma transform (0.299 R + 0.587 G +
//! 0.114 B with round-half-up), the convention the comparison and filter
//! engines depend on for score parity.

use crate::error::Result;
use crate::raster::{Channels, Raster};

/// BT.601 red luma weight
pub const LUMA_RED: f32 = 0.299;
/// BT.601 green luma weight
pub const LUMA_GREEN: f32 = 0.587;
/// BT.601 blue luma weight
pub const LUMA_BLUE: f32 = 0.114;

/// Collapse an RGB triple to its luma value.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_RED * r as f32 + LUMA_GREEN * g as f32 + LUMA_BLUE * b as f32 + 0.5;
    (y as u32).min(255) as u8
}

impl Raster {
    /// Convert to a single-channel grayscale raster.
    ///
    /// Grayscale input is returned as a cheap shared clone.
    pub fn to_gray(&self) -> Result<Raster> {
        if self.is_gray() {
            return Ok(self.clone());
        }

        let w = self.width();
        let h = self.height();
        let mut out = Vec::with_capacity(w as usize * h as usize);
        for y in 0..h {
            for chunk in self.row(y).chunks_exact(3) {
                out.push(luma(chunk[0], chunk[1], chunk[2]));
            }
        }
        Raster::from_samples(w, h, Channels::Gray, out)
    }

    /// Convert to a three-channel RGB raster.
    ///
    /// Grayscale samples are replicated across the triple. RGB input is
    /// returned as a cheap shared clone.
    pub fn to_rgb(&self) -> Result<Raster> {
        if self.is_rgb() {
            return Ok(self.clone());
        }

        let w = self.width();
        let h = self.height();
        let mut out = Vec::with_capacity(w as usize * h as usize * 3);
        for y in 0..h {
            for &v in self.row(y) {
                out.extend_from_slice(&[v, v, v]);
            }
        }
        Raster::from_samples(w, h, Channels::Rgb, out)
    }
}
