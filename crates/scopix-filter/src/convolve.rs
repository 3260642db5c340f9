//! Convolution operations
//!
//! Implements image convolution with arbitrary kernels over grayscale and
//! RGB rasters. Border handling is reflect-101 (the edge pixel is the
//! mirror axis and is not repeated), matching the reference blur
//! semantics the comparison pipeline was tuned against.

use crate::{FilterResult, Kernel};
use scopix_core::{Channels, Raster};

/// Reflect-101 index: `-1` maps to `1`, `n` maps to `n - 2`.
#[inline]
pub(crate) fn reflect101(i: i32, n: i32) -> i32 {
    if n == 1 {
        return 0;
    }
    let mut i = i;
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i;
        }
    }
}

/// Convolve a grayscale raster with a kernel.
pub fn convolve_gray(raster: &Raster, kernel: &Kernel) -> FilterResult<Raster> {
    let gray = raster.to_gray()?;
    let w = gray.width() as i32;
    let h = gray.height() as i32;
    let kcx = kernel.center_x() as i32;
    let kcy = kernel.center_y() as i32;

    let mut out = gray.template();
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0f32;
            for ky in 0..kernel.height() as i32 {
                for kx in 0..kernel.width() as i32 {
                    let sx = reflect101(x + kx - kcx, w) as u32;
                    let sy = reflect101(y + ky - kcy, h) as u32;
                    let k = kernel.get(kx as u32, ky as u32).unwrap_or(0.0);
                    sum += gray.gray_at(sx, sy) as f32 * k;
                }
            }
            out.put_gray(x as u32, y as u32, sum.round().clamp(0.0, 255.0) as u8);
        }
    }

    Ok(out.into())
}

/// Convolve an RGB raster with a kernel, independently per channel.
pub fn convolve_rgb(raster: &Raster, kernel: &Kernel) -> FilterResult<Raster> {
    let rgb = raster.to_rgb()?;
    let w = rgb.width() as i32;
    let h = rgb.height() as i32;
    let kcx = kernel.center_x() as i32;
    let kcy = kernel.center_y() as i32;

    let mut out = rgb.template();
    for y in 0..h {
        for x in 0..w {
            let mut sum = [0.0f32; 3];
            for ky in 0..kernel.height() as i32 {
                for kx in 0..kernel.width() as i32 {
                    let sx = reflect101(x + kx - kcx, w) as u32;
                    let sy = reflect101(y + ky - kcy, h) as u32;
                    let (r, g, b) = rgb.rgb_at(sx, sy);
                    let k = kernel.get(kx as u32, ky as u32).unwrap_or(0.0);
                    sum[0] += r as f32 * k;
                    sum[1] += g as f32 * k;
                    sum[2] += b as f32 * k;
                }
            }
            let clamp = |v: f32| v.round().clamp(0.0, 255.0) as u8;
            out.put_rgb(
                x as u32,
                y as u32,
                (clamp(sum[0]), clamp(sum[1]), clamp(sum[2])),
            );
        }
    }

    Ok(out.into())
}

/// Convolve a raster with a kernel, preserving its channel count.
pub fn convolve(raster: &Raster, kernel: &Kernel) -> FilterResult<Raster> {
    match raster.channels() {
        Channels::Gray => convolve_gray(raster, kernel),
        Channels::Rgb => convolve_rgb(raster, kernel),
    }
}

/// Apply a Gaussian blur with the given odd kernel size.
///
/// A `sigma` of 0 or less is auto-derived from the kernel size.
pub fn gaussian_blur(raster: &Raster, size: u32, sigma: f32) -> FilterResult<Raster> {
    let kernel = Kernel::gaussian(size, sigma)?;
    convolve(raster, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopix_core::RasterMut;

    #[test]
    fn test_reflect101() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(-2, 5), 2);
        assert_eq!(reflect101(0, 5), 0);
        assert_eq!(reflect101(4, 5), 4);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(6, 5), 2);
        assert_eq!(reflect101(3, 1), 0);
    }

    #[test]
    fn test_blur_preserves_constant_image() {
        let mut m = RasterMut::new(20, 20, Channels::Gray).unwrap();
        m.fill(90);
        let flat: Raster = m.into();
        let blurred = gaussian_blur(&flat, 15, 0.0).unwrap();
        assert!(blurred.samples().iter().all(|&s| s == 90));
    }

    #[test]
    fn test_blur_preserves_channels() {
        let rgb = Raster::new(16, 16, Channels::Rgb).unwrap();
        let blurred = gaussian_blur(&rgb, 15, 0.0).unwrap();
        assert_eq!(blurred.channels(), Channels::Rgb);
        assert_eq!(blurred.width(), 16);

        let gray = Raster::new(16, 16, Channels::Gray).unwrap();
        assert_eq!(
            gaussian_blur(&gray, 15, 0.0).unwrap().channels(),
            Channels::Gray
        );
    }

    #[test]
    fn test_blur_spreads_impulse() {
        let mut m = RasterMut::new(21, 21, Channels::Gray).unwrap();
        m.put_gray(10, 10, 255);
        let impulse: Raster = m.into();
        let blurred = gaussian_blur(&impulse, 15, 0.0).unwrap();
        let center = blurred.gray_at(10, 10);
        let near = blurred.gray_at(11, 10);
        assert!(center < 255, "impulse must be attenuated");
        assert!(near > 0, "energy must spread to neighbors");
        assert!(center >= near, "response must peak at the impulse");
    }

    #[test]
    fn test_box_convolve_mean() {
        let mut m = RasterMut::new(3, 3, Channels::Gray).unwrap();
        m.samples_mut().copy_from_slice(&[9; 9]);
        m.put_gray(1, 1, 0);
        let r: Raster = m.into();
        let k = Kernel::box_kernel(3).unwrap();
        let out = convolve(&r, &k).unwrap();
        // Mean of eight 9s and one 0
        assert_eq!(out.gray_at(1, 1), 8);
    }
}
