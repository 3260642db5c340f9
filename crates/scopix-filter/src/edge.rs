//! Canny edge detection
//!
//! Classic four-stage Canny over a grayscale view of the input: 3x3 Sobel
//! gradients, L1 magnitude, direction-quantized non-maximum suppression,
//! and double-threshold hysteresis with 8-connected edge tracking. The
//! outermost one-pixel frame is excluded from suppression so neighbor
//! lookups need no bounds checks; those pixels never become edges.

use crate::FilterResult;
use crate::convolve::reflect101;
use scopix_core::{Channels, Raster};

const SOBEL_X: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const TAN_22_5: f32 = 0.41421356;

/// Per-pixel Sobel gradients of a grayscale raster.
struct Gradients {
    gx: Vec<f32>,
    gy: Vec<f32>,
    /// L1 magnitude `|gx| + |gy|`
    mag: Vec<f32>,
}

fn sobel_gradients(gray: &Raster) -> Gradients {
    let w = gray.width() as i32;
    let h = gray.height() as i32;
    let n = (w * h) as usize;
    let mut gx = vec![0.0f32; n];
    let mut gy = vec![0.0f32; n];
    let mut mag = vec![0.0f32; n];

    for y in 0..h {
        for x in 0..w {
            let mut sum_x = 0.0f32;
            let mut sum_y = 0.0f32;
            for ky in 0..3 {
                let sy = reflect101(y + ky - 1, h) as u32;
                for kx in 0..3 {
                    let sx = reflect101(x + kx - 1, w) as u32;
                    let v = gray.gray_at(sx, sy) as f32;
                    sum_x += v * SOBEL_X[ky as usize][kx as usize];
                    sum_y += v * SOBEL_Y[ky as usize][kx as usize];
                }
            }
            let i = (y * w + x) as usize;
            gx[i] = sum_x;
            gy[i] = sum_y;
            mag[i] = sum_x.abs() + sum_y.abs();
        }
    }

    Gradients { gx, gy, mag }
}

/// Apply Canny edge detection with the given hysteresis thresholds.
///
/// RGB input is converted to grayscale internally. The output is a
/// single-channel map whose values are exactly 0 or 255.
pub fn canny(raster: &Raster, low: f32, high: f32) -> FilterResult<Raster> {
    let gray = raster.to_gray()?;
    let w = gray.width() as usize;
    let h = gray.height() as usize;
    let grad = sobel_gradients(&gray);

    // Non-maximum suppression: keep local maxima along the quantized
    // gradient direction. One strict and one non-strict comparison so a
    // two-pixel magnitude plateau keeps exactly one pixel.
    let mut candidate = vec![false; w * h];
    let mut strong = Vec::new();
    if w >= 3 && h >= 3 {
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let i = y * w + x;
                let m = grad.mag[i];
                if m <= low {
                    continue;
                }

                let gx = grad.gx[i];
                let gy = grad.gy[i];
                let ax = gx.abs();
                let ay = gy.abs();

                let (prev, next) = if ay <= TAN_22_5 * ax {
                    // Horizontal gradient: compare left/right
                    (i - 1, i + 1)
                } else if ax <= TAN_22_5 * ay {
                    // Vertical gradient: compare up/down
                    (i - w, i + w)
                } else if gx * gy > 0.0 {
                    // Gradient along the main diagonal
                    (i - w - 1, i + w + 1)
                } else {
                    (i - w + 1, i + w - 1)
                };

                if m > grad.mag[prev] && m >= grad.mag[next] {
                    candidate[i] = true;
                    if m > high {
                        strong.push(i);
                    }
                }
            }
        }
    }

    // Hysteresis: BFS from strong pixels across 8-connected candidates.
    let mut edge = vec![false; w * h];
    let mut stack = strong;
    for &i in &stack {
        edge[i] = true;
    }
    while let Some(i) = stack.pop() {
        let x = i % w;
        let y = i / w;
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || nx >= w as i32 || ny < 0 || ny >= h as i32 {
                    continue;
                }
                let ni = ny as usize * w + nx as usize;
                if candidate[ni] && !edge[ni] {
                    edge[ni] = true;
                    stack.push(ni);
                }
            }
        }
    }

    let samples = edge.iter().map(|&e| if e { 255u8 } else { 0 }).collect();
    Ok(Raster::from_samples(
        gray.width(),
        gray.height(),
        Channels::Gray,
        samples,
    )?)
}
