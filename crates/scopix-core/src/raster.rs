//! Raster - the image container
//!
//! `Raster` is the uniform representation of a decoded image used by every
//! engine: dense row-major 8-bit samples, one or three channels, RGB
//! channel order for color data. It is an immutable value object.
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning (shared ownership). To modify
//! sample data, convert to [`RasterMut`] via [`Raster::try_into_mut`] or
//! [`Raster::to_mut`], then convert back with `Into<Raster>`. Exclusive
//! access is enforced at compile time, so no buffer is ever mutated
//! through a shared handle.

use crate::error::{Error, Result};
use std::sync::Arc;

/// Number of sample channels in a raster.
///
/// Color data is always interleaved RGB. There is no alpha channel;
/// the decode boundary drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Single-channel grayscale
    Gray = 1,
    /// Three-channel RGB
    Rgb = 3,
}

impl Channels {
    /// Create `Channels` from a raw channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] if `count` is not 1 or 3.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            _ => Err(Error::UnsupportedChannels(count)),
        }
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn count(self) -> u32 {
        self as u32
    }
}

/// Internal raster data
#[derive(Debug)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel
    channels: Channels,
    /// Interleaved row-major samples, `width * height * channels` bytes
    samples: Vec<u8>,
}

impl RasterData {
    #[inline]
    fn stride(&self) -> usize {
        self.width as usize * self.channels.count() as usize
    }
}

/// Immutable raster image
///
/// # Examples
///
/// ```
/// use scopix_core::{Channels, Raster};
///
/// let raster = Raster::new(640, 480, Channels::Rgb).unwrap();
/// assert_eq!(raster.width(), 640);
/// assert_eq!(raster.height(), 480);
/// assert_eq!(raster.samples().len(), 640 * 480 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with all samples set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize * channels.count() as usize;
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                channels,
                samples: vec![0u8; len],
            }),
        })
    }

    /// Create a raster from an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero-sized dimensions and
    /// [`Error::SampleCountMismatch`] if the buffer length does not equal
    /// `width * height * channels`.
    pub fn from_samples(
        width: u32,
        height: u32,
        channels: Channels,
        samples: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * channels.count() as usize;
        if samples.len() != expected {
            return Err(Error::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                channels,
                samples,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Check whether this is a single-channel raster.
    #[inline]
    pub fn is_gray(&self) -> bool {
        self.inner.channels == Channels::Gray
    }

    /// Check whether this is a three-channel raster.
    #[inline]
    pub fn is_rgb(&self) -> bool {
        self.inner.channels == Channels::Rgb
    }

    /// Get the row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.stride()
    }

    /// Get the full sample buffer.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.inner.samples
    }

    /// Get the samples of a single row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.inner.stride();
        let start = y as usize * stride;
        &self.inner.samples[start..start + stride]
    }

    /// Get the grayscale sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the raster is not grayscale or the position is out of
    /// bounds.
    #[inline]
    pub fn gray_at(&self, x: u32, y: u32) -> u8 {
        debug_assert!(self.is_gray());
        self.inner.samples[y as usize * self.inner.stride() + x as usize]
    }

    /// Get the RGB triple at (x, y).
    ///
    /// Grayscale rasters replicate the single sample across the triple.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let stride = self.inner.stride();
        match self.inner.channels {
            Channels::Gray => {
                let v = self.inner.samples[y as usize * stride + x as usize];
                (v, v, v)
            }
            Channels::Rgb => {
                let i = y as usize * stride + x as usize * 3;
                let s = &self.inner.samples;
                (s[i], s[i + 1], s[i + 2])
            }
        }
    }

    /// Check if two rasters have the same width, height, and channels.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.channels == other.inner.channels
    }

    /// Get the number of strong references to this raster.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a zero-filled mutable raster with this raster's shape.
    pub fn template(&self) -> RasterMut {
        RasterMut {
            inner: RasterData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                samples: vec![0u8; self.inner.samples.len()],
            },
        }
    }

    /// Try to take exclusive ownership of the sample data.
    ///
    /// Succeeds only if there is exactly one reference to the data;
    /// otherwise the raster is handed back unchanged.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable deep copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: RasterData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                samples: self.inner.samples.clone(),
            },
        }
    }
}

/// Mutable raster
///
/// Holds uniquely owned sample data. Convert back to an immutable
/// [`Raster`] with `Into<Raster>` when done.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Create a new zero-filled mutable raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize * channels.count() as usize;
        Ok(RasterMut {
            inner: RasterData {
                width,
                height,
                channels,
                samples: vec![0u8; len],
            },
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Get the row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.inner.stride()
    }

    /// Get the full sample buffer.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.inner.samples
    }

    /// Get mutable access to the full sample buffer.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.inner.samples
    }

    /// Get mutable access to a single row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.inner.stride();
        let start = y as usize * stride;
        &mut self.inner.samples[start..start + stride]
    }

    /// Set the grayscale sample at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the raster is not grayscale or the position is out of
    /// bounds.
    #[inline]
    pub fn put_gray(&mut self, x: u32, y: u32, value: u8) {
        debug_assert!(self.inner.channels == Channels::Gray);
        let stride = self.inner.stride();
        self.inner.samples[y as usize * stride + x as usize] = value;
    }

    /// Set the RGB triple at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the raster is not RGB or the position is out of bounds.
    #[inline]
    pub fn put_rgb(&mut self, x: u32, y: u32, rgb: (u8, u8, u8)) {
        debug_assert!(self.inner.channels == Channels::Rgb);
        let stride = self.inner.stride();
        let i = y as usize * stride + x as usize * 3;
        self.inner.samples[i] = rgb.0;
        self.inner.samples[i + 1] = rgb.1;
        self.inner.samples[i + 2] = rgb.2;
    }

    /// Fill every sample with the given value.
    pub fn fill(&mut self, value: u8) {
        self.inner.samples.fill(value);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}
