//! FAST corner detection with intensity-centroid orientation
//!
//! Segment-test corners on a 16-pixel Bresenham ring: a pixel is a
//! corner when at least 9 contiguous ring pixels are all brighter or
//! all darker than the center by the threshold. Scores feed a 3x3
//! non-maximum suppression pass and the survivors are ranked.

use scopix_core::Raster;

/// Minimum contiguous arc length for the segment test
const ARC_MIN: usize = 9;

/// Keypoints closer than this to any edge are discarded so the
/// orientation patch and rotated descriptor pattern stay in bounds.
pub const BORDER: u32 = 19;

/// Radius of the circular patch used for the orientation moments
const PATCH_RADIUS: i32 = 15;

/// Bresenham circle of radius 3, clockwise from twelve o'clock
const RING: [(i32, i32); 16] = [
    (0, -3),
    (1, -3),
    (2, -2),
    (3, -1),
    (3, 0),
    (3, 1),
    (2, 2),
    (1, 3),
    (0, 3),
    (-1, 3),
    (-2, 2),
    (-3, 1),
    (-3, 0),
    (-3, -1),
    (-2, -2),
    (-1, -3),
];

/// A detected corner with its suppression score and patch orientation
#[derive(Debug, Clone, Copy)]
pub struct Keypoint {
    pub x: u32,
    pub y: u32,
    pub score: f32,
    pub angle: f32,
}

/// Detect up to `max_features` corners in a grayscale raster.
///
/// Results are ordered by descending score. Rasters too small to hold
/// the detection border yield no keypoints.
pub fn detect(gray: &Raster, threshold: u8, max_features: usize) -> Vec<Keypoint> {
    let w = gray.width();
    let h = gray.height();
    if w <= 2 * BORDER || h <= 2 * BORDER {
        return Vec::new();
    }

    let mut scores = vec![0.0f32; (w * h) as usize];
    for y in BORDER..h - BORDER {
        for x in BORDER..w - BORDER {
            scores[(y * w + x) as usize] = corner_score(gray, x, y, threshold);
        }
    }

    // 3x3 non-maximum suppression
    let mut keypoints = Vec::new();
    for y in BORDER..h - BORDER {
        for x in BORDER..w - BORDER {
            let s = scores[(y * w + x) as usize];
            if s <= 0.0 {
                continue;
            }
            let mut is_max = true;
            'nms: for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let ni = ((y as i32 + dy) as u32 * w + (x as i32 + dx) as u32) as usize;
                    if scores[ni] > s {
                        is_max = false;
                        break 'nms;
                    }
                }
            }
            if is_max {
                keypoints.push(Keypoint {
                    x,
                    y,
                    score: s,
                    angle: 0.0,
                });
            }
        }
    }

    keypoints.sort_by(|a, b| b.score.total_cmp(&a.score));
    keypoints.truncate(max_features);

    for kp in &mut keypoints {
        kp.angle = orientation(gray, kp.x, kp.y);
    }
    keypoints
}

/// Segment-test score: the summed contrast of the longest qualifying arc,
/// or 0.0 when the pixel is not a corner.
fn corner_score(gray: &Raster, x: u32, y: u32, threshold: u8) -> f32 {
    let center = gray.gray_at(x, y) as i32;
    let t = threshold as i32;

    let mut ring = [0i32; 16];
    for (i, &(dx, dy)) in RING.iter().enumerate() {
        ring[i] = gray.gray_at((x as i32 + dx) as u32, (y as i32 + dy) as u32) as i32;
    }

    let mut best = 0i32;
    for polarity in [1i32, -1] {
        // Walk the ring twice so wrapping arcs are seen whole
        let mut run = 0usize;
        let mut run_sum = 0i32;
        let mut run_best = 0i32;
        for i in 0..32 {
            let v = ring[i % 16];
            let excess = polarity * (v - center) - t;
            if excess > 0 {
                run += 1;
                run_sum += excess;
                if run >= ARC_MIN {
                    run_best = run_best.max(run_sum);
                }
                if run == 16 {
                    break;
                }
            } else {
                run = 0;
                run_sum = 0;
            }
        }
        best = best.max(run_best);
    }
    best as f32
}

/// Patch orientation from first-order intensity moments.
fn orientation(gray: &Raster, x: u32, y: u32) -> f32 {
    let mut m10 = 0i64;
    let mut m01 = 0i64;
    let r2 = PATCH_RADIUS * PATCH_RADIUS;

    for dy in -PATCH_RADIUS..=PATCH_RADIUS {
        for dx in -PATCH_RADIUS..=PATCH_RADIUS {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let v = gray.gray_at((x as i32 + dx) as u32, (y as i32 + dy) as u32) as i64;
            m10 += dx as i64 * v;
            m01 += dy as i64 * v;
        }
    }
    (m01 as f32).atan2(m10 as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopix_core::{Channels, Raster, RasterMut};

    /// Dark field with a bright axis-aligned square, corners well inside
    /// the detection border.
    fn square_image() -> Raster {
        let mut m = RasterMut::new(100, 100, Channels::Gray).unwrap();
        m.fill(30);
        for y in 35..65 {
            for x in 35..65 {
                m.put_gray(x, y, 220);
            }
        }
        m.into()
    }

    #[test]
    fn test_detects_square_corners() {
        let img = square_image();
        let kps = detect(&img, 20, 500);
        assert!(!kps.is_empty());
        // Every detection sits near one of the four square corners
        for kp in &kps {
            let near = [(35, 35), (64, 35), (35, 64), (64, 64)]
                .iter()
                .any(|&(cx, cy): &(i32, i32)| {
                    (kp.x as i32 - cx).abs() <= 3 && (kp.y as i32 - cy).abs() <= 3
                });
            assert!(near, "keypoint ({}, {}) not at a corner", kp.x, kp.y);
        }
    }

    #[test]
    fn test_flat_image_has_no_keypoints() {
        let mut m = RasterMut::new(80, 80, Channels::Gray).unwrap();
        m.fill(128);
        let img: Raster = m.into();
        assert!(detect(&img, 20, 500).is_empty());
    }

    #[test]
    fn test_tiny_image_has_no_keypoints() {
        let img = Raster::new(30, 30, Channels::Gray).unwrap();
        assert!(detect(&img, 20, 500).is_empty());
    }

    #[test]
    fn test_respects_feature_cap() {
        let mut m = RasterMut::new(200, 200, Channels::Gray).unwrap();
        // Checkerboard of small bright blocks produces many corners
        for y in 0..200u32 {
            for x in 0..200u32 {
                if (x / 5 + y / 5) % 2 == 0 {
                    m.put_gray(x, y, 255);
                }
            }
        }
        let img: Raster = m.into();
        let kps = detect(&img, 20, 40);
        assert!(kps.len() <= 40);
        assert!(!kps.is_empty());
        // Ranked by score
        for pair in kps.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_keypoints_stay_inside_border() {
        let img = square_image();
        for kp in detect(&img, 20, 500) {
            assert!(kp.x >= BORDER && kp.x < img.width() - BORDER);
            assert!(kp.y >= BORDER && kp.y < img.height() - BORDER);
        }
    }

    #[test]
    fn test_orientation_points_toward_mass() {
        let mut m = RasterMut::new(100, 100, Channels::Gray).unwrap();
        m.fill(0);
        // Bright mass strictly to the right of the probe point
        for y in 40..60 {
            for x in 52..65 {
                m.put_gray(x, y, 255);
            }
        }
        let img: Raster = m.into();
        let angle = orientation(&img, 50, 50);
        assert!(angle.abs() < 0.3, "angle {angle} not pointing right");
    }
}
