//! Weight tables
//!
//! The filter never evaluates `exp` inside the convolution loop. Both
//! Gaussians are sampled once into lookup tables:
//!
//! - [`SpatialKernel`]: square `(2r+1) x (2r+1)` grid of spatial weights
//! - [`RangeKernel`]: 256 weights indexed by absolute channel difference
//!
//! Neither table is normalized; the convolution normalizes per pixel and
//! per channel.

use crate::FilterResult;
use crate::params::{check_radius, check_sigma};

/// Number of entries in a range kernel (one per 8-bit difference)
pub const RANGE_KERNEL_SIZE: usize = 256;

/// Spatial Gaussian weights over a square window
///
/// Entry `(col, row)` holds `exp(-(dx^2 + dy^2) / (2 sigma^2))` with
/// `dx = col - radius`, `dy = row - radius`. The center entry is exactly 1.
#[derive(Debug, Clone)]
pub struct SpatialKernel {
    /// Half-width of the window
    radius: u32,
    /// Standard deviation the table was built from
    sigma: f64,
    /// Weights (row-major order)
    data: Vec<f64>,
}

impl SpatialKernel {
    /// Build the spatial table for `radius` and `sigma`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `sigma` is not positive and finite
    /// or `radius` is outside `1..=MAX_RADIUS`.
    pub fn new(radius: u32, sigma: f64) -> FilterResult<Self> {
        check_sigma("spatial_sigma", sigma)?;
        check_radius(radius)?;

        let r = radius as i64;
        let denom = 2.0 * sigma * sigma;
        let size = (2 * radius + 1) as usize;
        let mut data = Vec::with_capacity(size * size);
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = (dx * dx + dy * dy) as f64;
                data.push((-d2 / denom).exp());
            }
        }

        Ok(Self {
            radius,
            sigma,
            data,
        })
    }

    /// Get the window half-width.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Get the window side length, `2 * radius + 1`.
    #[inline]
    pub fn size(&self) -> u32 {
        2 * self.radius + 1
    }

    /// Get the standard deviation.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Get the kernel data (row-major, `size * size` entries).
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get the weight at table position `(col, row)`.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> Option<f64> {
        let size = self.size();
        if col >= size || row >= size {
            return None;
        }
        Some(self.data[(row * size + col) as usize])
    }

    /// Get the weight for an offset `(dx, dy)` from the center.
    #[inline]
    pub fn get_offset(&self, dx: i32, dy: i32) -> Option<f64> {
        let r = self.radius as i64;
        let (col, row) = (dx as i64 + r, dy as i64 + r);
        if col < 0 || row < 0 {
            return None;
        }
        self.get(u32::try_from(col).ok()?, u32::try_from(row).ok()?)
    }

    /// Get the sum of all weights.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// Range Gaussian weights
///
/// Entry `d` holds `exp(-d^2 / (2 sigma^2))` for an absolute channel
/// difference `d` in `0..=255`. Entry 0 is exactly 1 and the table is
/// non-increasing.
#[derive(Debug, Clone)]
pub struct RangeKernel {
    /// Standard deviation the table was built from
    sigma: f64,
    weights: [f64; RANGE_KERNEL_SIZE],
}

impl RangeKernel {
    /// Build the range table for `sigma`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if `sigma` is not positive and finite.
    pub fn new(sigma: f64) -> FilterResult<Self> {
        check_sigma("range_sigma", sigma)?;

        let mut weights = [0.0f64; RANGE_KERNEL_SIZE];
        let denom = 2.0 * sigma * sigma;
        for (i, val) in weights.iter_mut().enumerate() {
            let d = i as f64;
            *val = (-(d * d) / denom).exp();
        }

        Ok(Self { sigma, weights })
    }

    /// Get the standard deviation.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Get the full table.
    #[inline]
    pub fn weights(&self) -> &[f64; RANGE_KERNEL_SIZE] {
        &self.weights
    }

    /// Get the weight for an absolute difference.
    #[inline]
    pub fn weight(&self, diff: u8) -> f64 {
        self.weights[diff as usize]
    }
}

/// Create a range kernel for bilateral filtering
///
/// Creates a 256-element array where element `i` is the weight for an
/// intensity difference of `i`.
///
/// # Arguments
/// * `range_sigma` - Standard deviation for the range Gaussian (must be > 0.0)
pub fn make_range_kernel(range_sigma: f64) -> FilterResult<[f64; RANGE_KERNEL_SIZE]> {
    Ok(*RangeKernel::new(range_sigma)?.weights())
}
