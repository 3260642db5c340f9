//! Rotation-steered binary descriptors
//!
//! 256 brightness comparisons over a fixed random pattern of point
//! pairs, rotated by the keypoint orientation before sampling. The
//! pattern is generated once from a fixed seed so descriptors are
//! reproducible across runs and processes.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scopix_core::Raster;

use crate::fast::Keypoint;

/// Descriptor length in bytes (256 comparison bits)
pub const DESCRIPTOR_BYTES: usize = 32;

/// Pattern offsets are drawn from [-13, 13]; with the detection border
/// of 19 a rotated pair can never leave the raster.
const PATTERN_SPREAD: i32 = 13;

const PATTERN_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// A 256-bit binary descriptor
pub type Descriptor = [u8; DESCRIPTOR_BYTES];

static PATTERN: OnceLock<Vec<[i32; 4]>> = OnceLock::new();

/// The shared comparison pattern: 256 pairs of patch offsets.
fn pattern() -> &'static [[i32; 4]] {
    PATTERN.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(PATTERN_SEED);
        (0..DESCRIPTOR_BYTES * 8)
            .map(|_| {
                [
                    rng.random_range(-PATTERN_SPREAD..=PATTERN_SPREAD),
                    rng.random_range(-PATTERN_SPREAD..=PATTERN_SPREAD),
                    rng.random_range(-PATTERN_SPREAD..=PATTERN_SPREAD),
                    rng.random_range(-PATTERN_SPREAD..=PATTERN_SPREAD),
                ]
            })
            .collect()
    })
}

/// Compute the steered descriptor for one keypoint.
pub fn describe(gray: &Raster, kp: &Keypoint) -> Descriptor {
    let (sin, cos) = kp.angle.sin_cos();
    let mut desc = [0u8; DESCRIPTOR_BYTES];

    for (bit, pair) in pattern().iter().enumerate() {
        let a = sample(gray, kp, pair[0], pair[1], sin, cos);
        let b = sample(gray, kp, pair[2], pair[3], sin, cos);
        if a < b {
            desc[bit / 8] |= 1 << (bit % 8);
        }
    }
    desc
}

/// Compute descriptors for a batch of keypoints.
pub fn describe_all(gray: &Raster, keypoints: &[Keypoint]) -> Vec<Descriptor> {
    keypoints.iter().map(|kp| describe(gray, kp)).collect()
}

#[inline]
fn sample(gray: &Raster, kp: &Keypoint, dx: i32, dy: i32, sin: f32, cos: f32) -> u8 {
    let rx = (cos * dx as f32 - sin * dy as f32).round() as i32;
    let ry = (sin * dx as f32 + cos * dy as f32).round() as i32;
    let x = (kp.x as i32 + rx).clamp(0, gray.width() as i32 - 1);
    let y = (kp.y as i32 + ry).clamp(0, gray.height() as i32 - 1);
    gray.gray_at(x as u32, y as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopix_core::{Channels, Raster, RasterMut};

    fn textured_image() -> Raster {
        let mut m = RasterMut::new(64, 64, Channels::Gray).unwrap();
        for y in 0..64u32 {
            for x in 0..64u32 {
                m.put_gray(x, y, ((x * 37 + y * 91) ^ (x * y)) as u8);
            }
        }
        m.into()
    }

    #[test]
    fn test_pattern_is_reproducible() {
        let first = pattern().to_vec();
        let second = pattern();
        assert_eq!(first.as_slice(), second);
        assert_eq!(first.len(), 256);
        for pair in &first {
            for &c in pair {
                assert!((-PATTERN_SPREAD..=PATTERN_SPREAD).contains(&c));
            }
        }
    }

    #[test]
    fn test_descriptor_deterministic() {
        let img = textured_image();
        let kp = Keypoint {
            x: 32,
            y: 32,
            score: 1.0,
            angle: 0.7,
        };
        assert_eq!(describe(&img, &kp), describe(&img, &kp));
    }

    #[test]
    fn test_distinct_patches_give_distinct_descriptors() {
        let img = textured_image();
        let a = Keypoint {
            x: 25,
            y: 25,
            score: 1.0,
            angle: 0.0,
        };
        let b = Keypoint {
            x: 40,
            y: 38,
            score: 1.0,
            angle: 0.0,
        };
        assert_ne!(describe(&img, &a), describe(&img, &b));
    }

    #[test]
    fn test_flat_patch_descriptor_is_zero() {
        let mut m = RasterMut::new(64, 64, Channels::Gray).unwrap();
        m.fill(77);
        let img: Raster = m.into();
        let kp = Keypoint {
            x: 32,
            y: 32,
            score: 1.0,
            angle: 0.0,
        };
        // Equal samples never set a bit
        assert_eq!(describe(&img, &kp), [0u8; DESCRIPTOR_BYTES]);
    }
}
