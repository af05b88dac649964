//! bilateral-filter - Edge-preserving smoothing
//!
//! This crate provides the bilateral filtering engine:
//!
//! - Configuration and validation ([`BilateralParams`])
//! - Spatial and range weight tables ([`SpatialKernel`], [`RangeKernel`])
//! - Border policy ([`InteriorRegion`])
//! - Sequential and row-parallel filtering ([`BilateralFilter`])

pub mod bilateral;
pub mod border;
mod error;
pub mod kernel;
pub mod params;

pub use error::{FilterError, FilterResult};
pub use kernel::{RANGE_KERNEL_SIZE, RangeKernel, SpatialKernel};
pub use params::{
    BilateralParams, DEFAULT_RADIUS, DEFAULT_RANGE_SIGMA, DEFAULT_SPATIAL_SIGMA, MAX_RADIUS,
};

// Re-export commonly used functions
pub use bilateral::{BilateralFilter, bilateral_filter, clamp_channel};
pub use border::{InteriorRegion, is_border_pixel};
pub use kernel::make_range_kernel;
