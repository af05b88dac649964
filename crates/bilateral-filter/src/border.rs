//! Border policy
//!
//! A pixel is filtered only when its whole window lies inside the image.
//! Every other pixel (within `radius` of an edge) is copied unchanged from
//! the source.

use std::ops::Range;

/// The set of pixels whose full window lies inside the image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteriorRegion {
    /// Filtered columns, `radius..width - radius`
    pub cols: Range<u32>,
    /// Filtered rows, `radius..height - radius`
    pub rows: Range<u32>,
}

impl InteriorRegion {
    /// Compute the interior of a `width x height` image for `radius`.
    ///
    /// Returns `None` when the window side `2 * radius + 1` exceeds either
    /// dimension, i.e. when no pixel can be filtered.
    pub fn new(width: u32, height: u32, radius: u32) -> Option<Self> {
        let size = radius.checked_mul(2)?.checked_add(1)?;
        if size > width || size > height {
            return None;
        }
        Some(Self {
            cols: radius..width - radius,
            rows: radius..height - radius,
        })
    }

    /// Check whether `(x, y)` is filtered.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.cols.contains(&x) && self.rows.contains(&y)
    }

    /// Number of filtered pixels.
    pub fn pixel_count(&self) -> u64 {
        self.cols.len() as u64 * self.rows.len() as u64
    }
}

/// Check whether `(x, y)` is a border pixel of a `width x height` image.
///
/// When the window does not fit at all, every pixel is a border pixel.
pub fn is_border_pixel(x: u32, y: u32, width: u32, height: u32, radius: u32) -> bool {
    InteriorRegion::new(width, height, radius).is_none_or(|region| !region.contains(x, y))
}
