//! Drawing primitives
//!
//! Point-set generation (lines, circles) plus clipped rendering onto a
//! [`RasterMut`]. Every renderer clips per point and never fails on
//! out-of-bounds coordinates, so callers can draw overlays without
//! pre-clamping.

use crate::convert::luma;
use crate::raster::{Channels, RasterMut};

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// White color
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Collapse to a grayscale value via the luma transform.
    pub fn to_gray(self) -> u8 {
        luma(self.r, self.g, self.b)
    }
}

/// Generate the points of a line from `(x1, y1)` to `(x2, y2)`.
///
/// Integer Bresenham with a signed error accumulator, so both endpoints
/// are included, successive points are 8-connected, and a zero-length
/// line yields its single point.
pub fn line_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<(i32, i32)> {
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = (x2 - x1).signum();
    let sy = (y2 - y1).signum();

    let mut points = Vec::with_capacity((dx.max(dy) + 1) as usize);
    let (mut x, mut y) = (x1, y1);
    let mut err = dx - dy;

    loop {
        points.push((x, y));
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    points
}

/// Generate the outline points of a circle using the midpoint algorithm.
pub fn circle_outline_points(cx: i32, cy: i32, radius: u32) -> Vec<(i32, i32)> {
    if radius == 0 {
        return vec![(cx, cy)];
    }

    let r = radius as i32;
    let mut points = Vec::with_capacity(8 * radius as usize);
    let mut x = r;
    let mut y = 0i32;
    let mut err = 1 - r;

    while x >= y {
        points.push((cx + x, cy + y));
        points.push((cx + y, cy + x));
        points.push((cx - y, cy + x));
        points.push((cx - x, cy + y));
        points.push((cx - x, cy - y));
        points.push((cx - y, cy - x));
        points.push((cx + y, cy - x));
        points.push((cx + x, cy - y));

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    points
}

impl RasterMut {
    /// Render a set of points with the given color, clipping per point.
    ///
    /// Grayscale targets receive the color's luma value.
    pub fn render_points(&mut self, points: &[(i32, i32)], color: Color) {
        let w = self.width() as i32;
        let h = self.height() as i32;
        let gray = color.to_gray();

        for &(x, y) in points {
            if x < 0 || x >= w || y < 0 || y >= h {
                continue;
            }
            match self.channels() {
                Channels::Gray => self.put_gray(x as u32, y as u32, gray),
                Channels::Rgb => self.put_rgb(x as u32, y as u32, (color.r, color.g, color.b)),
            }
        }
    }

    /// Blend a color into a single pixel with the given coverage.
    ///
    /// `coverage` is clamped to [0, 1]; 1.0 fully replaces the pixel and
    /// 0.0 leaves it untouched. Out-of-bounds positions are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || x >= self.width() as i32 || y < 0 || y >= self.height() as i32 {
            return;
        }
        let f = coverage.clamp(0.0, 1.0);
        if f <= 0.0 {
            return;
        }

        let (xu, yu) = (x as u32, y as u32);
        let blend = |dst: u8, src: u8| -> u8 {
            (dst as f32 + f * (src as f32 - dst as f32) + 0.5) as u8
        };

        match self.channels() {
            Channels::Gray => {
                let src = color.to_gray();
                let stride = self.stride();
                let i = yu as usize * stride + xu as usize;
                let dst = self.samples()[i];
                self.samples_mut()[i] = blend(dst, src);
            }
            Channels::Rgb => {
                let stride = self.stride();
                let i = yu as usize * stride + xu as usize * 3;
                let dst = [
                    self.samples()[i],
                    self.samples()[i + 1],
                    self.samples()[i + 2],
                ];
                let out = self.samples_mut();
                out[i] = blend(dst[0], color.r);
                out[i + 1] = blend(dst[1], color.g);
                out[i + 2] = blend(dst[2], color.b);
            }
        }
    }
}
