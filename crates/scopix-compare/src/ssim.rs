//! Structural similarity
//!
//! Mean SSIM with a square uniform window and sample covariance
//! normalization, plus a per-pixel difference map derived from the
//! local similarity plane. Comparing a raster against itself scores
//! exactly 1.0 and yields an all-zero map.

use scopix_core::{Channels, Error, Raster, RasterMut};

use crate::error::{CompareError, CompareResult};

/// Side length of the local statistics window
pub const SSIM_WINDOW: u32 = 7;

const K1: f64 = 0.01;
const K2: f64 = 0.03;
const DYNAMIC_RANGE: f64 = 255.0;

/// SSIM comparison output: the mean score over the window-valid interior
/// and a grayscale map where brighter pixels mark stronger dissimilarity.
#[derive(Debug, Clone)]
pub struct SsimOutcome {
    pub score: f64,
    pub diff_map: Raster,
}

/// Compare two rasters with mean structural similarity.
///
/// Both inputs are collapsed to grayscale first, so the channel counts
/// may differ. The window shrinks to the largest odd size that fits
/// when an input is smaller than the default 7x7.
///
/// # Errors
///
/// Returns a dimension-mismatch error when the rasters differ in width
/// or height.
pub fn compare_ssim(a: &Raster, b: &Raster) -> CompareResult<SsimOutcome> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(CompareError::Core(Error::DimensionMismatch {
            expected: (a.width(), a.height()),
            actual: (b.width(), b.height()),
        }));
    }

    let ga = a.to_gray()?;
    let gb = b.to_gray()?;
    let w = ga.width() as usize;
    let h = ga.height() as usize;

    let win = fit_window(ga.width(), ga.height()) as usize;
    let np = (win * win) as f64;
    // Sample covariance; a single-pixel window has no spread to estimate
    let cov_norm = if np > 1.0 { np / (np - 1.0) } else { 0.0 };

    let xa = to_f64_plane(&ga);
    let xb = to_f64_plane(&gb);
    let xaa: Vec<f64> = xa.iter().map(|v| v * v).collect();
    let xbb: Vec<f64> = xb.iter().map(|v| v * v).collect();
    let xab: Vec<f64> = xa.iter().zip(&xb).map(|(p, q)| p * q).collect();

    let ux = uniform_filter(&xa, w, h, win);
    let uy = uniform_filter(&xb, w, h, win);
    let uxx = uniform_filter(&xaa, w, h, win);
    let uyy = uniform_filter(&xbb, w, h, win);
    let uxy = uniform_filter(&xab, w, h, win);

    let c1 = (K1 * DYNAMIC_RANGE).powi(2);
    let c2 = (K2 * DYNAMIC_RANGE).powi(2);

    let mut plane = vec![0.0f64; w * h];
    for i in 0..w * h {
        let vx = cov_norm * (uxx[i] - ux[i] * ux[i]);
        let vy = cov_norm * (uyy[i] - uy[i] * uy[i]);
        let vxy = cov_norm * (uxy[i] - ux[i] * uy[i]);

        let a1 = 2.0 * ux[i] * uy[i] + c1;
        let a2 = 2.0 * vxy + c2;
        let b1 = ux[i] * ux[i] + uy[i] * uy[i] + c1;
        let b2 = vx + vy + c2;
        plane[i] = (a1 * a2) / (b1 * b2);
    }

    // Mean over the interior where the window never crossed the border
    let pad = (win - 1) / 2;
    let mut sum = 0.0;
    let mut count = 0u64;
    for y in pad..h - pad {
        for x in pad..w - pad {
            sum += plane[y * w + x];
            count += 1;
        }
    }
    let score = sum / count as f64;

    let mut diff = RasterMut::new(ga.width(), ga.height(), Channels::Gray)?;
    for y in 0..h {
        let row = diff.row_mut(y as u32);
        for x in 0..w {
            let d = (1.0 - plane[y * w + x]) / 2.0 * 255.0;
            row[x] = (d + 0.5).clamp(0.0, 255.0) as u8;
        }
    }

    Ok(SsimOutcome {
        score,
        diff_map: diff.into(),
    })
}

/// Largest odd window side that fits both dimensions, capped at the default.
fn fit_window(width: u32, height: u32) -> u32 {
    let side = SSIM_WINDOW.min(width).min(height);
    if side % 2 == 0 { side - 1 } else { side }
}

fn to_f64_plane(raster: &Raster) -> Vec<f64> {
    let w = raster.width() as usize;
    let h = raster.height();
    let mut plane = Vec::with_capacity(w * h as usize);
    for y in 0..h {
        plane.extend(raster.row(y).iter().map(|&s| s as f64));
    }
    plane
}

/// Index folded back into [0, n) by mirroring across the edges, with the
/// edge sample duplicated.
fn reflect_sym(i: i64, n: i64) -> usize {
    let mut i = i;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - 1 - i;
        } else {
            return i as usize;
        }
    }
}

/// Separable box mean over a `win` x `win` neighborhood with symmetric
/// border reflection.
fn uniform_filter(src: &[f64], w: usize, h: usize, win: usize) -> Vec<f64> {
    let half = (win - 1) as i64 / 2;
    let inv = 1.0 / win as f64;

    // Horizontal pass
    let mut tmp = vec![0.0f64; w * h];
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0;
            for k in -half..=half {
                acc += row[reflect_sym(x as i64 + k, w as i64)];
            }
            tmp[y * w + x] = acc * inv;
        }
    }

    // Vertical pass
    let mut out = vec![0.0f64; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for k in -half..=half {
                acc += tmp[reflect_sym(y as i64 + k, h as i64) * w + x];
            }
            out[y * w + x] = acc * inv;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopix_core::{Channels, RasterMut};

    fn solid_rgb(w: u32, h: u32, rgb: (u8, u8, u8)) -> Raster {
        let mut m = RasterMut::new(w, h, Channels::Rgb).unwrap();
        for y in 0..h {
            for x in 0..w {
                m.put_rgb(x, y, rgb);
            }
        }
        m.into()
    }

    fn gradient_gray(w: u32, h: u32) -> Raster {
        let mut m = RasterMut::new(w, h, Channels::Gray).unwrap();
        for y in 0..h {
            for x in 0..w {
                m.put_gray(x, y, ((x * 7 + y * 13) % 256) as u8);
            }
        }
        m.into()
    }

    #[test]
    fn test_identical_scores_one() {
        let img = gradient_gray(32, 24);
        let out = compare_ssim(&img, &img).unwrap();
        assert_eq!(out.score, 1.0);
        assert!(out.diff_map.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_different_solids_score_below_one() {
        let red = solid_rgb(20, 20, (255, 0, 0));
        let blue = solid_rgb(20, 20, (0, 0, 255));
        let out = compare_ssim(&red, &blue).unwrap();
        assert!(out.score < 1.0);
        // The similarity plane is constant, so the map is uniform and non-zero
        let first = out.diff_map.samples()[0];
        assert!(first > 0);
        assert!(out.diff_map.samples().iter().all(|&s| s == first));
    }

    #[test]
    fn test_symmetric() {
        let a = gradient_gray(25, 25);
        let b = solid_rgb(25, 25, (90, 90, 90));
        let ab = compare_ssim(&a, &b).unwrap();
        let ba = compare_ssim(&b, &a).unwrap();
        assert!((ab.score - ba.score).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_channel_inputs_allowed() {
        // Same dimensions, different channel counts: both collapse to gray
        let gray = gradient_gray(25, 25);
        let rgb = solid_rgb(25, 25, (90, 90, 90));
        let out = compare_ssim(&gray, &rgb).unwrap();
        assert!(out.score < 1.0);
        assert!(out.score.is_finite());
    }

    #[test]
    fn test_gray_input_matches_its_rgb_promotion() {
        let gray = gradient_gray(20, 20);
        let rgb = gray.to_rgb().unwrap();
        let out = compare_ssim(&gray, &rgb).unwrap();
        assert_eq!(out.score, 1.0);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let a = gradient_gray(10, 10);
        let b = gradient_gray(10, 11);
        assert!(matches!(
            compare_ssim(&a, &b),
            Err(CompareError::Core(Error::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_small_input_shrinks_window() {
        let a = gradient_gray(3, 3);
        let out = compare_ssim(&a, &a).unwrap();
        assert_eq!(out.score, 1.0);
    }

    #[test]
    fn test_single_pixel() {
        let a = solid_rgb(1, 1, (10, 10, 10));
        let b = solid_rgb(1, 1, (200, 200, 200));
        let out = compare_ssim(&a, &b).unwrap();
        assert!(out.score < 1.0);
        assert!(out.score.is_finite());
    }

    #[test]
    fn test_score_in_unit_interval_for_photographic_input() {
        let a = gradient_gray(40, 30);
        let mut m = a.to_mut();
        for x in 0..40 {
            m.put_gray(x, 15, 255);
        }
        let b: Raster = m.into();
        let out = compare_ssim(&a, &b).unwrap();
        assert!(out.score < 1.0);
        assert!(out.score > -1.0);
    }

    #[test]
    fn test_reflect_sym_folding() {
        assert_eq!(reflect_sym(-1, 5), 0);
        assert_eq!(reflect_sym(-2, 5), 1);
        assert_eq!(reflect_sym(5, 5), 4);
        assert_eq!(reflect_sym(6, 5), 3);
        assert_eq!(reflect_sym(2, 5), 2);
    }

    #[test]
    fn test_uniform_filter_constant_plane() {
        let plane = vec![4.5f64; 12];
        let out = uniform_filter(&plane, 4, 3, 3);
        for v in out {
            assert!((v - 4.5).abs() < 1e-12);
        }
    }
}
