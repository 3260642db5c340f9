//! scopix-hist - Color histogram engine
//!
//! Computes independent 256-bin intensity distributions for the three
//! channels of an RGB raster. Single-channel input is rejected: the
//! result shape is fixed at three channel series for the plotting
//! boundary, which indexes the channels positionally.

mod error;

pub use error::{HistError, HistResult};

use scopix_core::{Error, Raster};

/// Number of intensity bins per channel
pub const BINS: usize = 256;

/// RGB channel histograms
///
/// Contains separate 256-bin count arrays for the red, green, and blue
/// channels, each summing to `width * height` of the source raster.
#[derive(Debug, Clone)]
pub struct ColorHistogram {
    /// Red channel counts
    pub red: [u32; BINS],
    /// Green channel counts
    pub green: [u32; BINS],
    /// Blue channel counts
    pub blue: [u32; BINS],
}

impl ColorHistogram {
    /// Iterate the channel series in native RGB order.
    pub fn channels(&self) -> impl Iterator<Item = &[u32; BINS]> {
        [&self.red, &self.green, &self.blue].into_iter()
    }

    /// Get a channel by index (0 = red, 1 = green, 2 = blue).
    pub fn channel(&self, index: usize) -> Option<&[u32; BINS]> {
        match index {
            0 => Some(&self.red),
            1 => Some(&self.green),
            2 => Some(&self.blue),
            _ => None,
        }
    }

    /// Total count per channel (pixel count of the source raster).
    pub fn total(&self) -> u64 {
        self.red.iter().map(|&c| c as u64).sum()
    }
}

/// Compute the per-channel intensity histogram of an RGB raster.
///
/// # Errors
///
/// Returns a channel-mismatch error for single-channel input.
pub fn histogram(raster: &Raster) -> HistResult<ColorHistogram> {
    if !raster.is_rgb() {
        return Err(HistError::Core(Error::ChannelMismatch {
            expected: 3,
            actual: raster.channels().count(),
        }));
    }

    let mut red = [0u32; BINS];
    let mut green = [0u32; BINS];
    let mut blue = [0u32; BINS];

    for y in 0..raster.height() {
        for chunk in raster.row(y).chunks_exact(3) {
            red[chunk[0] as usize] += 1;
            green[chunk[1] as usize] += 1;
            blue[chunk[2] as usize] += 1;
        }
    }

    Ok(ColorHistogram { red, green, blue })
}
