//! ORB comparison pipeline
//!
//! Detects FAST corners in both inputs, describes them with steered
//! binary descriptors, cross-check matches the sets, and renders a
//! side-by-side visualization of the strongest correspondences. The
//! reported count covers all matches; only the strongest few are drawn.

use scopix_core::{Channels, Color, Raster, RasterMut, circle_outline_points, line_points};

use crate::descriptor::describe_all;
use crate::error::CompareResult;
use crate::fast::{Keypoint, detect};
use crate::matcher::{Match, match_descriptors};

/// Maximum number of keypoints retained per image
pub const ORB_MAX_FEATURES: usize = 500;

/// FAST segment-test contrast threshold
pub const FAST_THRESHOLD: u8 = 20;

/// Number of top matches drawn into the visualization
pub const MAX_RENDERED_MATCHES: usize = 10;

/// Radius of the keypoint markers in the visualization
const KEYPOINT_RADIUS: u32 = 3;

/// Match lines cycle through this palette in rank order
const MATCH_COLORS: [Color; 8] = [
    Color::new(230, 57, 70),
    Color::new(46, 196, 182),
    Color::new(255, 183, 3),
    Color::new(106, 76, 224),
    Color::new(82, 183, 136),
    Color::new(244, 140, 6),
    Color::new(69, 123, 157),
    Color::new(214, 93, 177),
];

/// ORB comparison output: the total cross-checked match count and a
/// side-by-side RGB rendering with the top matches drawn.
#[derive(Debug, Clone)]
pub struct OrbOutcome {
    pub match_count: usize,
    pub visualization: Raster,
}

/// Compare two rasters by matching local binary features.
///
/// The inputs may differ in size. Featureless or too-small inputs
/// degrade to a zero count over a plain side-by-side canvas.
pub fn compare_orb(a: &Raster, b: &Raster) -> CompareResult<OrbOutcome> {
    let ga = a.to_gray()?;
    let gb = b.to_gray()?;

    let kps_a = detect(&ga, FAST_THRESHOLD, ORB_MAX_FEATURES);
    let kps_b = detect(&gb, FAST_THRESHOLD, ORB_MAX_FEATURES);

    let desc_a = describe_all(&ga, &kps_a);
    let desc_b = describe_all(&gb, &kps_b);

    let matches = match_descriptors(&desc_a, &desc_b);
    let visualization = draw_matches(a, b, &kps_a, &kps_b, &matches)?;

    Ok(OrbOutcome {
        match_count: matches.len(),
        visualization,
    })
}

/// Render both images side by side with the strongest matches overlaid.
fn draw_matches(
    a: &Raster,
    b: &Raster,
    kps_a: &[Keypoint],
    kps_b: &[Keypoint],
    matches: &[Match],
) -> CompareResult<Raster> {
    let ra = a.to_rgb()?;
    let rb = b.to_rgb()?;
    let offset = ra.width();

    let mut canvas = RasterMut::new(
        ra.width() + rb.width(),
        ra.height().max(rb.height()),
        Channels::Rgb,
    )?;

    let wa = ra.width() as usize * 3;
    for y in 0..ra.height() {
        canvas.row_mut(y)[..wa].copy_from_slice(ra.row(y));
    }
    let wb = rb.width() as usize * 3;
    for y in 0..rb.height() {
        canvas.row_mut(y)[wa..wa + wb].copy_from_slice(rb.row(y));
    }

    for (rank, m) in matches.iter().take(MAX_RENDERED_MATCHES).enumerate() {
        let color = MATCH_COLORS[rank % MATCH_COLORS.len()];
        let ka = kps_a[m.query];
        let kb = kps_b[m.train];
        let (ax, ay) = (ka.x as i32, ka.y as i32);
        let (bx, by) = ((kb.x + offset) as i32, kb.y as i32);

        canvas.render_points(&circle_outline_points(ax, ay, KEYPOINT_RADIUS), color);
        canvas.render_points(&circle_outline_points(bx, by, KEYPOINT_RADIUS), color);
        canvas.render_points(&line_points(ax, ay, bx, by), color);
    }

    Ok(canvas.into())
}
