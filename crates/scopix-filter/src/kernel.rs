//! Convolution kernels

use crate::{FilterError, FilterResult};

/// A 2D convolution kernel
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from a slice of row-major values.
    ///
    /// The center defaults to `(width / 2, height / 2)`.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] for zero-sized kernels or a
    /// data slice of the wrong length.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = (width * height) as usize;
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "expected {expected} values, got {}",
                data.len()
            )));
        }
        Ok(Kernel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: data.to_vec(),
        })
    }

    /// Create a box (averaging) kernel with all values `1 / (size * size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        if size == 0 {
            return Err(FilterError::InvalidKernel(
                "box kernel size must be non-zero".to_string(),
            ));
        }
        let n = (size * size) as usize;
        let data = vec![1.0 / n as f32; n];
        Kernel::from_slice(size, size, &data)
    }

    /// Create a normalized isotropic Gaussian kernel.
    ///
    /// `size` must be odd. A `sigma` of 0 or less is auto-derived from the
    /// kernel size by the reference rule
    /// `sigma = 0.3 * ((size - 1) / 2 - 1) + 0.8`, which gives 2.6 for the
    /// 15x15 blur kernel.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] for an even or zero size.
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian kernel size must be odd, got {size}"
            )));
        }

        let sigma = if sigma > 0.0 {
            sigma
        } else {
            0.3 * ((size - 1) as f32 * 0.5 - 1.0) + 0.8
        };

        let half = (size / 2) as i32;
        let denom = 2.0 * sigma * sigma;
        let mut data = Vec::with_capacity((size * size) as usize);
        for y in -half..=half {
            for x in -half..=half {
                let d2 = (x * x + y * y) as f32;
                data.push((-d2 / denom).exp());
            }
        }

        let mut kernel = Kernel::from_slice(size, size, &data)?;
        kernel.normalize();
        Ok(kernel)
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A zero-sum kernel is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum != 0.0 {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }
}
