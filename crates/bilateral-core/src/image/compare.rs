//! Image comparison operations
//!
//! This module provides functions for comparing images:
//!
//! - Pixel equality checks
//! - Pixel difference counting
//! - Maximum and mean per-channel difference

use super::Image;
use crate::color::CHANNELS;
use crate::error::{Error, Result};

/// Result of comparing two images of equal size
#[derive(Debug, Clone, PartialEq)]
pub struct DiffStats {
    /// Number of pixels that differ in at least one channel
    pub n_diff: u64,
    /// Fraction of pixels that differ (0.0 to 1.0)
    pub fract_diff: f64,
    /// Largest absolute difference over all channels
    pub max_diff: u8,
    /// Mean absolute difference over all channel samples
    pub mean_abs_diff: f64,
}

impl Image {
    /// Check if two images are exactly equal.
    pub fn equals(&self, other: &Image) -> bool {
        self.sizes_equal(other) && self.data() == other.data()
    }

    /// Compare two images channel by channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn diff_stats(&self, other: &Image) -> Result<DiffStats> {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }

        let mut n_diff = 0u64;
        let mut max_diff = 0u8;
        let mut abs_sum = 0u64;
        for (a, b) in self.data().iter().zip(other.data()) {
            if a != b {
                n_diff += 1;
            }
            for c in 0..CHANNELS {
                let d = a.channel(c).abs_diff(b.channel(c));
                max_diff = max_diff.max(d);
                abs_sum += d as u64;
            }
        }

        let npix = self.data().len() as f64;
        Ok(DiffStats {
            n_diff,
            fract_diff: n_diff as f64 / npix,
            max_diff,
            mean_abs_diff: abs_sum as f64 / (npix * CHANNELS as f64),
        })
    }

    /// Count the pixels that differ between two images.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn count_diffs(&self, other: &Image) -> Result<u64> {
        Ok(self.diff_stats(other)?.n_diff)
    }

    /// Largest per-channel absolute difference between two images.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn max_channel_diff(&self, other: &Image) -> Result<u8> {
        Ok(self.diff_stats(other)?.max_diff)
    }
}
