//! scopix-compare - Image comparison engine
//!
//! Two complementary comparison modes over [`Raster`] pairs: structural
//! similarity (same-size inputs, a score plus a per-pixel difference
//! map) and ORB feature matching (any sizes, a match count plus a
//! side-by-side visualization). Both are deterministic: repeated runs
//! on the same inputs produce identical output.

mod descriptor;
mod error;
mod fast;
mod matcher;
mod orb;
mod ssim;

pub use descriptor::{DESCRIPTOR_BYTES, Descriptor, describe, describe_all};
pub use error::{CompareError, CompareResult};
pub use fast::{BORDER, Keypoint, detect};
pub use matcher::{Match, hamming, match_descriptors};
pub use orb::{
    FAST_THRESHOLD, MAX_RENDERED_MATCHES, ORB_MAX_FEATURES, OrbOutcome, compare_orb,
};
pub use ssim::{SSIM_WINDOW, SsimOutcome, compare_ssim};

use scopix_core::Raster;

/// Comparison mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Ssim,
    Orb,
}

/// The result of comparing two rasters
#[derive(Debug, Clone)]
pub enum Comparison {
    /// Mean structural similarity with its dissimilarity map
    Ssim { score: f64, diff_map: Raster },
    /// Feature matching with its annotated side-by-side rendering
    Orb {
        match_count: usize,
        visualization: Raster,
    },
}

impl Comparison {
    /// The raster produced by the comparison, whichever mode ran.
    pub fn image(&self) -> &Raster {
        match self {
            Comparison::Ssim { diff_map, .. } => diff_map,
            Comparison::Orb { visualization, .. } => visualization,
        }
    }
}

/// Compare two rasters with the chosen method.
///
/// # Errors
///
/// SSIM requires equal dimensions; ORB accepts any pair of sizes.
pub fn compare(a: &Raster, b: &Raster, method: Method) -> CompareResult<Comparison> {
    match method {
        Method::Ssim => {
            let out = compare_ssim(a, b)?;
            Ok(Comparison::Ssim {
                score: out.score,
                diff_map: out.diff_map,
            })
        }
        Method::Orb => {
            let out = compare_orb(a, b)?;
            Ok(Comparison::Orb {
                match_count: out.match_count,
                visualization: out.visualization,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopix_core::Channels;

    #[test]
    fn test_dispatch_ssim() {
        let img = Raster::new(16, 16, Channels::Gray).unwrap();
        let result = compare(&img, &img, Method::Ssim).unwrap();
        match result {
            Comparison::Ssim { score, ref diff_map } => {
                assert_eq!(score, 1.0);
                assert!(diff_map.is_gray());
            }
            Comparison::Orb { .. } => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_dispatch_orb() {
        let img = Raster::new(16, 16, Channels::Rgb).unwrap();
        let result = compare(&img, &img, Method::Orb).unwrap();
        match result {
            Comparison::Orb {
                match_count,
                ref visualization,
            } => {
                assert_eq!(match_count, 0);
                assert_eq!(visualization.width(), 32);
            }
            Comparison::Ssim { .. } => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_comparison_image_accessor() {
        let img = Raster::new(16, 16, Channels::Gray).unwrap();
        let ssim = compare(&img, &img, Method::Ssim).unwrap();
        assert_eq!(ssim.image().width(), 16);
        let orb = compare(&img, &img, Method::Orb).unwrap();
        assert_eq!(orb.image().width(), 32);
    }
}
