//! bilateral-test - Regression test framework for bilateral-rs
//!
//! This crate provides a small regression test framework supporting three
//! modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files (default)
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! It also builds the synthetic inputs the tests run on (see [`synth`]),
//! so no image files need to be checked in.
//!
//! # Usage
//!
//! ```ignore
//! use bilateral_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("bilateral");
//! let img = synth::flat(5, 5, Rgb::gray(128)).unwrap();
//! rp.compare_values(0.0, diffs as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use bilateral_core::Image;

/// Load a test image from the regression output directory
///
/// # Arguments
///
/// * `name` - Image filename (e.g., "bilateral.01.png")
pub fn load_regout_image(name: &str) -> TestResult<Image> {
    let path = format!("{}/{}", regout_dir(), name);
    bilateral_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // bilateral-test is at crates/bilateral-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
