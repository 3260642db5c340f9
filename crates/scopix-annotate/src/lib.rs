//! scopix-annotate - Text overlay engine
//!
//! Renders ASCII text onto a raster using a built-in 5x7 bitmap font.
//! Placement is baseline-anchored: the anchor point marks the left end
//! of the baseline and glyphs extend upward from it. Rendering clips
//! per pixel, so text running off any edge is silently truncated rather
//! than an error.

mod error;
pub mod font;

pub use error::{AnnotateError, AnnotateResult};

use scopix_core::{Color, Error, Raster};

use crate::font::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, glyph, glyph_pixel};

/// Raster pixels per font pixel at scale 1.0
///
/// At scale 1.0 a glyph stands 21 pixels tall, matching the familiar
/// size of a scale-1 overlay label.
pub const PIXEL_SIZE: f32 = 3.0;

/// A text overlay request
///
/// `x` and `y` anchor the baseline of the first glyph; coordinates may
/// lie outside the target raster. `scale` multiplies the base glyph
/// size and `thickness` widens each stroke by stamping the glyph over a
/// square pen of that many pixels.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub scale: f32,
    pub color: Color,
    pub thickness: u32,
}

impl Annotation {
    /// Create an annotation with scale 1.0, white color, and thickness 2.
    pub fn new(text: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            scale: 1.0,
            color: Color::WHITE,
            thickness: 2,
        }
    }

    /// Width in pixels the annotation advances over, before clipping.
    pub fn advance_width(&self) -> f32 {
        self.text.chars().count() as f32 * GLYPH_ADVANCE as f32 * PIXEL_SIZE * self.scale
    }
}

/// Render an annotation onto a copy of the raster.
///
/// The source raster is never modified. Empty text yields an unchanged
/// copy. Grayscale targets receive the color's luma value through the
/// blend path.
///
/// # Errors
///
/// Returns an invalid-parameter error when `scale` is not a positive
/// finite number or `thickness` is zero.
pub fn annotate(raster: &Raster, annotation: &Annotation) -> AnnotateResult<Raster> {
    if !annotation.scale.is_finite() || annotation.scale <= 0.0 {
        return Err(AnnotateError::Core(Error::InvalidParameter(format!(
            "annotation scale must be positive and finite, got {}",
            annotation.scale
        ))));
    }
    if annotation.thickness == 0 {
        return Err(AnnotateError::Core(Error::InvalidParameter(
            "annotation thickness must be at least 1".into(),
        )));
    }
    if annotation.text.is_empty() {
        return Ok(raster.clone());
    }

    let mut out = raster.to_mut();
    let px = PIXEL_SIZE * annotation.scale;
    let mut pen_x = annotation.x as f32;

    for c in annotation.text.chars() {
        if let Some(columns) = glyph(c) {
            draw_glyph(
                &mut out,
                columns,
                pen_x,
                annotation.y,
                px,
                annotation.thickness,
                annotation.color,
            );
        }
        pen_x += GLYPH_ADVANCE as f32 * px;
    }

    Ok(out.into())
}

/// Stamp one glyph with its left edge at `left` and its baseline at `baseline`.
///
/// Coverage per output pixel is the maximum bilinear sample of the glyph
/// bitmap over the pen offsets, so thick strokes stay solid while edges
/// keep a soft ramp.
fn draw_glyph(
    out: &mut scopix_core::RasterMut,
    columns: &[u8; 5],
    left: f32,
    baseline: i32,
    px: f32,
    thickness: u32,
    color: Color,
) {
    let top = (baseline + 1) as f32 - GLYPH_HEIGHT as f32 * px;
    let pad = thickness as i32;

    let x0 = left.floor() as i32 - pad;
    let x1 = (left + GLYPH_WIDTH as f32 * px).ceil() as i32 + pad;
    let y0 = top.floor() as i32 - pad;
    let y1 = baseline + 1 + pad;

    // Pen offsets center the thickening square on the stroke
    let pen_lo = -((thickness as i32 - 1) / 2);
    let pen_hi = thickness as i32 / 2;

    for oy in y0..=y1 {
        if oy < 0 || oy >= out.height() as i32 {
            continue;
        }
        for ox in x0..=x1 {
            if ox < 0 || ox >= out.width() as i32 {
                continue;
            }

            let mut coverage = 0.0f32;
            for dy in pen_lo..=pen_hi {
                for dx in pen_lo..=pen_hi {
                    let fx = ((ox - dx) as f32 + 0.5 - left) / px - 0.5;
                    let fy = ((oy - dy) as f32 + 0.5 - top) / px - 0.5;
                    coverage = coverage.max(sample_glyph(columns, fx, fy));
                    if coverage >= 1.0 {
                        break;
                    }
                }
                if coverage >= 1.0 {
                    break;
                }
            }

            if coverage > 0.0 {
                out.blend_pixel(ox, oy, color, coverage);
            }
        }
    }
}

/// Bilinear sample of the glyph bitmap; pixels outside the cell read 0.
fn sample_glyph(columns: &[u8; 5], fx: f32, fy: f32) -> f32 {
    let bx = fx.floor();
    let by = fy.floor();
    let tx = fx - bx;
    let ty = fy - by;
    let bx = bx as i32;
    let by = by as i32;

    let at = |dx: i32, dy: i32| -> f32 {
        if glyph_pixel(columns, bx + dx, by + dy) {
            1.0
        } else {
            0.0
        }
    };

    at(0, 0) * (1.0 - tx) * (1.0 - ty)
        + at(1, 0) * tx * (1.0 - ty)
        + at(0, 1) * (1.0 - tx) * ty
        + at(1, 1) * tx * ty
}
