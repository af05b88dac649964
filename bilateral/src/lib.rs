//! bilateral - Edge-preserving smoothing of RGB images
//!
//! Bilateral filtering replaces every pixel with a weighted average of its
//! neighbors, where the weight falls off both with spatial distance and
//! with intensity difference. Flat regions are smoothed and edges are kept.
//!
//! This crate ties the workspace together:
//!
//! - [`filter`] - the filtering engine ([`BilateralFilter`])
//! - [`io`] - PNG / JPEG / PNM reading and writing
//! - [`smooth_file`] - load, filter and save in one call
//!
//! # Example
//!
//! ```
//! use bilateral::{BilateralFilter, BilateralParams, Image, Rgb};
//!
//! let img = Image::new_filled(32, 32, Rgb::gray(128)).unwrap();
//! let filter = BilateralFilter::new(BilateralParams::new(2.0, 30.0, 2)).unwrap();
//! let out = filter.apply_parallel(&img).unwrap();
//! assert!(out.equals(&img));
//! ```

pub mod driver;
mod error;

// Re-export core types (primary data structures used everywhere)
pub use bilateral_core::{DiffStats, Image, ImageFormat, ImageMut, Rgb, color};

// Re-export domain crates as modules to avoid name conflicts
pub use bilateral_filter as filter;
pub use bilateral_io as io;

pub use bilateral_filter::{BilateralFilter, BilateralParams};
pub use driver::{SmoothReport, output_path, smooth_file};
pub use error::{Error, Result};
