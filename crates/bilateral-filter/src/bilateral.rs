//! Bilateral filtering (edge-preserving smoothing)
//!
//! Bilateral filtering is a non-linear, edge-preserving smoothing filter.
//! It combines a spatial Gaussian filter with a range (intensity) Gaussian
//! filter, so uniform regions are smoothed while edges are kept.
//!
//! # Algorithm
//!
//! For each interior pixel and each channel `c` independently, the output
//! is a weighted average over the `(2r+1) x (2r+1)` window where each tap
//! has weight
//!
//! ```text
//! w = spatial[dy + r][dx + r] * range[|neighbor.c - center.c|]
//! ```
//!
//! The average is floored and then clamped to `0..=255`. Each channel is
//! normalized by its own weight sum. Pixels within `r` of an edge are
//! copied from the source.
//!
//! The cost is `O(width * height * r^2)`; doubling the radius roughly
//! quadruples the running time.
//!
//! # Example
//!
//! ```
//! use bilateral_core::{Image, Rgb};
//! use bilateral_filter::{BilateralFilter, BilateralParams};
//!
//! let img = Image::new_filled(16, 16, Rgb::gray(128)).unwrap();
//! let filter = BilateralFilter::new(BilateralParams::new(2.0, 30.0, 1)).unwrap();
//! let smoothed = filter.apply(&img).unwrap();
//! assert!(smoothed.equals(&img));
//! ```

use crate::border::InteriorRegion;
use crate::kernel::{RangeKernel, SpatialKernel};
use crate::{BilateralParams, FilterError, FilterResult};
use bilateral_core::color::CHANNELS;
use bilateral_core::{Image, Rgb};
use rayon::prelude::*;
use std::time::Instant;

/// Clamp a floored channel value to the 8-bit range.
///
/// Applied only to final per-channel results.
#[inline]
pub fn clamp_channel(v: i32) -> u8 {
    if v < 0 {
        0
    } else if v > 255 {
        255
    } else {
        v as u8
    }
}

/// Bilateral filter engine
///
/// Holds one validated configuration and the two weight tables derived
/// from it. Both tables are built in [`BilateralFilter::new`], so an engine
/// is ready to filter any number of images. The engine is `Sync`; it can
/// be shared across threads by reference.
#[derive(Debug, Clone)]
pub struct BilateralFilter {
    params: BilateralParams,
    spatial: SpatialKernel,
    range: RangeKernel,
}

impl BilateralFilter {
    /// Validate `params` and build both weight tables.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidConfiguration`] for a non-positive or
    /// non-finite sigma, or a radius outside `1..=MAX_RADIUS`. No table is
    /// built in that case.
    pub fn new(params: BilateralParams) -> FilterResult<Self> {
        params.validate()?;
        let spatial = SpatialKernel::new(params.radius, params.spatial_sigma)?;
        let range = RangeKernel::new(params.range_sigma)?;
        log::debug!(
            "built bilateral tables: radius {} ({}x{} window), spatial sigma {}, range sigma {}",
            params.radius,
            spatial.size(),
            spatial.size(),
            params.spatial_sigma,
            params.range_sigma
        );
        Ok(Self {
            params,
            spatial,
            range,
        })
    }

    /// Get the configuration.
    #[inline]
    pub fn params(&self) -> &BilateralParams {
        &self.params
    }

    /// Get the spatial weight table.
    #[inline]
    pub fn spatial_kernel(&self) -> &SpatialKernel {
        &self.spatial
    }

    /// Get the range weight table.
    #[inline]
    pub fn range_kernel(&self) -> &RangeKernel {
        &self.range
    }

    /// Number of weighted taps one call performs on a `width x height`
    /// image: interior pixels x window taps x channels.
    ///
    /// Zero when the window does not fit the image.
    pub fn work_estimate(&self, width: u32, height: u32) -> u64 {
        let size = self.spatial.size() as u64;
        InteriorRegion::new(width, height, self.params.radius)
            .map_or(0, |region| region.pixel_count() * size * size * CHANNELS as u64)
    }

    /// Filter an image on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidConfiguration`] if the window
    /// `2 * radius + 1` exceeds the image width or height. Nothing is
    /// computed in that case.
    pub fn apply(&self, img: &Image) -> FilterResult<Image> {
        let region = self.interior(img)?;
        let start = Instant::now();

        // Border pixels keep their source values
        let mut out = img.to_mut();
        let src = img.data();
        let width = img.width() as usize;
        for y in region.rows.clone() {
            self.filter_row(src, width, y as usize, &region, out.row_mut(y));
        }

        log::trace!(
            "bilateral pass on {}x{} image took {:?}",
            img.width(),
            img.height(),
            start.elapsed()
        );
        Ok(out.into())
    }

    /// Filter an image with rows distributed over the rayon thread pool.
    ///
    /// Each worker reads the shared source and writes only its own output
    /// rows. The result is bit-identical to [`BilateralFilter::apply`].
    ///
    /// # Errors
    ///
    /// Same as [`BilateralFilter::apply`].
    pub fn apply_parallel(&self, img: &Image) -> FilterResult<Image> {
        let region = self.interior(img)?;
        let start = Instant::now();

        let mut out = img.to_mut();
        let src = img.data();
        let width = img.width() as usize;
        let first = region.rows.start as usize;
        let count = region.rows.len();
        out.data_mut()
            .par_chunks_mut(width)
            .enumerate()
            .skip(first)
            .take(count)
            .for_each(|(y, row)| self.filter_row(src, width, y, &region, row));

        log::trace!(
            "parallel bilateral pass on {}x{} image took {:?}",
            img.width(),
            img.height(),
            start.elapsed()
        );
        Ok(out.into())
    }

    fn interior(&self, img: &Image) -> FilterResult<InteriorRegion> {
        self.params.validate_for(img.width(), img.height())?;
        InteriorRegion::new(img.width(), img.height(), self.params.radius).ok_or_else(|| {
            FilterError::InvalidConfiguration(format!(
                "radius {} leaves no interior in a {}x{} image",
                self.params.radius,
                img.width(),
                img.height()
            ))
        })
    }

    /// Filter the interior columns of row `y` into `out_row`.
    fn filter_row(
        &self,
        src: &[Rgb],
        width: usize,
        y: usize,
        region: &InteriorRegion,
        out_row: &mut [Rgb],
    ) {
        for x in region.cols.clone() {
            let x = x as usize;
            out_row[x] = self.filter_pixel(src, width, x, y);
        }
    }

    /// Compute one output pixel. `(x, y)` must be an interior pixel.
    #[inline]
    fn filter_pixel(&self, src: &[Rgb], width: usize, x: usize, y: usize) -> Rgb {
        let r = self.params.radius as usize;
        let size = 2 * r + 1;
        let spatial = self.spatial.data();
        let range = self.range.weights();
        let center = src[y * width + x].channels();

        // Offsets from the center value are accumulated instead of raw
        // values, so a window of identical values yields the center exactly.
        let mut offset_sum = [0.0f64; CHANNELS];
        let mut weight_sum = [0.0f64; CHANNELS];

        for (ky, spatial_row) in spatial.chunks_exact(size).enumerate() {
            let start = (y + ky - r) * width + (x - r);
            let window_row = &src[start..start + size];
            for (neighbor, &sw) in window_row.iter().zip(spatial_row) {
                for c in 0..CHANNELS {
                    let nv = neighbor.0[c];
                    let w = sw * range[nv.abs_diff(center[c]) as usize];
                    offset_sum[c] += w * (f64::from(nv) - f64::from(center[c]));
                    weight_sum[c] += w;
                }
            }
        }

        // weight_sum[c] >= 1: the center tap has spatial and range weight 1
        let mut out = [0u8; CHANNELS];
        for c in 0..CHANNELS {
            let mean = f64::from(center[c]) + offset_sum[c] / weight_sum[c];
            out[c] = clamp_channel(mean.floor() as i32);
        }
        Rgb(out)
    }
}

/// Apply a bilateral filter with a one-off engine.
///
/// Convenience for single images; build a [`BilateralFilter`] directly to
/// reuse the weight tables across images.
///
/// # Example
/// ```
/// use bilateral_core::{Image, Rgb};
/// use bilateral_filter::{BilateralParams, bilateral_filter};
///
/// let img = Image::new_filled(8, 8, Rgb::new(10, 20, 30)).unwrap();
/// let out = bilateral_filter(&img, &BilateralParams::new(2.0, 30.0, 2)).unwrap();
/// assert_eq!(out.dimensions(), (8, 8));
/// ```
pub fn bilateral_filter(img: &Image, params: &BilateralParams) -> FilterResult<Image> {
    let filter = BilateralFilter::new(*params)?;
    filter.apply(img)
}
