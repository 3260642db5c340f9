//! scopix-filter - Per-image filter engine
//!
//! One of a fixed set of transforms applied to a single raster:
//!
//! - Gaussian blur (15x15 kernel, sigma auto-derived)
//! - Canny edge detection (hysteresis thresholds 100/200)
//! - Binary thresholding (cutoff 127)
//!
//! The parameter sets are engine constants, not configuration; the
//! underlying parameterized operations are exported for callers that
//! need different values.

pub mod convolve;
pub mod edge;
mod error;
pub mod kernel;
pub mod threshold;

pub use convolve::{convolve, convolve_gray, convolve_rgb, gaussian_blur};
pub use edge::canny;
pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;
pub use threshold::threshold_binary;

use scopix_core::Raster;

/// Gaussian blur kernel size used by [`apply`]
pub const BLUR_KERNEL_SIZE: u32 = 15;
/// Canny low hysteresis threshold used by [`apply`]
pub const CANNY_LOW: f32 = 100.0;
/// Canny high hysteresis threshold used by [`apply`]
pub const CANNY_HIGH: f32 = 200.0;
/// Binary threshold cutoff used by [`apply`]
pub const THRESHOLD_CUTOFF: u8 = 127;

/// The fixed filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// 15x15 Gaussian blur, sigma derived from the kernel size
    GaussianBlur,
    /// Canny edge map with hysteresis thresholds 100/200
    CannyEdges,
    /// Binary threshold at 127
    Threshold,
    /// Pass-through: returns the input unchanged
    Identity,
}

/// Apply a filter with its fixed parameter set.
///
/// Blur preserves the input's channel count; the edge and threshold
/// filters produce single-channel output. [`FilterKind::Identity`]
/// returns a byte-identical copy of the input.
pub fn apply(raster: &Raster, kind: FilterKind) -> FilterResult<Raster> {
    match kind {
        FilterKind::GaussianBlur => gaussian_blur(raster, BLUR_KERNEL_SIZE, 0.0),
        FilterKind::CannyEdges => canny(raster, CANNY_LOW, CANNY_HIGH),
        FilterKind::Threshold => threshold_binary(raster, THRESHOLD_CUTOFF),
        FilterKind::Identity => Ok(raster.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopix_core::{Channels, RasterMut};

    fn gradient_rgb() -> Raster {
        let mut m = RasterMut::new(20, 20, Channels::Rgb).unwrap();
        for y in 0..20 {
            for x in 0..20 {
                m.put_rgb(x, y, ((x * 12) as u8, (y * 12) as u8, 128));
            }
        }
        m.into()
    }

    #[test]
    fn test_apply_identity_byte_identical() {
        let img = gradient_rgb();
        let out = apply(&img, FilterKind::Identity).unwrap();
        assert_eq!(out.samples(), img.samples());
        assert!(out.sizes_equal(&img));
    }

    #[test]
    fn test_apply_blur_keeps_channels() {
        let img = gradient_rgb();
        let out = apply(&img, FilterKind::GaussianBlur).unwrap();
        assert_eq!(out.channels(), Channels::Rgb);
        assert!(out.sizes_equal(&img));
    }

    #[test]
    fn test_apply_threshold_binary_output() {
        let img = gradient_rgb();
        let out = apply(&img, FilterKind::Threshold).unwrap();
        assert_eq!(out.channels(), Channels::Gray);
        assert!(out.samples().iter().all(|&s| s == 0 || s == 255));
    }

    #[test]
    fn test_apply_canny_binary_output() {
        let img = gradient_rgb();
        let out = apply(&img, FilterKind::CannyEdges).unwrap();
        assert_eq!(out.channels(), Channels::Gray);
        assert!(out.samples().iter().all(|&s| s == 0 || s == 255));
    }
}
