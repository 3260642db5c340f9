//! Fixed binary thresholding

use crate::FilterResult;
use scopix_core::{Channels, Raster};

/// Binarize a raster at a fixed cutoff.
///
/// The input is converted to grayscale first. Samples strictly greater
/// than `cutoff` become 255, all others 0 (reference binary-threshold
/// semantics). The output is single-channel.
pub fn threshold_binary(raster: &Raster, cutoff: u8) -> FilterResult<Raster> {
    let gray = raster.to_gray()?;
    let samples = gray
        .samples()
        .iter()
        .map(|&v| if v > cutoff { 255u8 } else { 0 })
        .collect();
    Ok(Raster::from_samples(
        gray.width(),
        gray.height(),
        Channels::Gray,
        samples,
    )?)
}
