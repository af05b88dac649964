//! File-level smoothing
//!
//! Loads an image, filters it with the row-parallel engine and writes the
//! result in the format the input was read from.

use crate::Result;
use bilateral_core::ImageFormat;
use bilateral_filter::{BilateralFilter, BilateralParams};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Prefix of generated output file names
pub const OUTPUT_PREFIX: &str = "BF";

/// Summary of one [`smooth_file`] run
#[derive(Debug, Clone)]
pub struct SmoothReport {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Format the input was read as (and the output written as)
    pub format: ImageFormat,
    /// Configuration the image was filtered with
    pub params: BilateralParams,
    /// Time spent filtering, excluding decode and encode
    pub filter_time: Duration,
    /// Path the result was written to
    pub output: PathBuf,
}

/// Smooth the image at `input` and write the result to `output`.
///
/// The parameters are validated before the input is opened. The output is
/// encoded in the input's format; an input of unknown format is written as
/// PNG.
///
/// # Errors
///
/// [`crate::Error::InvalidConfiguration`] for rejected parameters or a
/// window larger than the image, [`crate::Error::ImageAccess`] when the
/// input cannot be decoded or the output cannot be written.
pub fn smooth_file<P, Q>(input: P, output: Q, params: &BilateralParams) -> Result<SmoothReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let filter = BilateralFilter::new(*params)?;
    let img = bilateral_io::read_image(input.as_ref())?;

    let start = Instant::now();
    let smoothed = filter.apply_parallel(&img)?;
    let filter_time = start.elapsed();

    let format = img.informat();
    bilateral_io::write_image(&smoothed, output.as_ref(), format)?;
    log::debug!(
        "smoothed {} -> {} ({}x{}, {:?})",
        input.as_ref().display(),
        output.as_ref().display(),
        img.width(),
        img.height(),
        filter_time
    );

    Ok(SmoothReport {
        width: img.width(),
        height: img.height(),
        format,
        params: *params,
        filter_time,
        output: output.as_ref().to_path_buf(),
    })
}

/// Output path for run number `index` over `input`: `BF<index>_<name>`,
/// placed in `out_dir` or, when `None`, next to the input.
pub fn output_path(input: &Path, index: usize, out_dir: Option<&Path>) -> PathBuf {
    let mut name = OsString::from(format!("{}{}_", OUTPUT_PREFIX, index));
    name.push(input.file_name().unwrap_or(input.as_os_str()));
    let dir = out_dir.or_else(|| input.parent()).unwrap_or(Path::new(""));
    dir.join(name)
}
