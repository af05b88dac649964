//! Command-line bilateral smoothing
//!
//! ```text
//! bilateral <input> <radius,spatial_sigma,range_sigma>... [--out-dir DIR]
//! ```
//!
//! Every parameter triple is one run; run `i` (counting from 1) writes
//! `BF<i>_<input name>` next to the input, or into `DIR`.
//! Set `RUST_LOG` to change the log level (default `info`).

use bilateral::{BilateralParams, output_path, smooth_file};
use log::info;
use std::error::Error;
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: bilateral <input> <radius,spatial_sigma,range_sigma>... [--out-dir DIR]";

#[derive(Debug)]
struct Args {
    input: PathBuf,
    runs: Vec<BilateralParams>,
    out_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    for (i, params) in args.runs.iter().enumerate() {
        let output = output_path(&args.input, i + 1, args.out_dir.as_deref());
        info!(
            "run {}: radius={}, spatial_sigma={}, range_sigma={}",
            i + 1,
            params.radius,
            params.spatial_sigma,
            params.range_sigma
        );
        let report = smooth_file(&args.input, &output, params)?;
        info!(
            "run {}: {}x{} image filtered in {:.3}s, saved to {}",
            i + 1,
            report.width,
            report.height,
            report.filter_time.as_secs_f64(),
            report.output.display()
        );
    }
    Ok(())
}

fn parse_args<I>(args: I) -> Result<Args, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut input = None;
    let mut runs = Vec::new();
    let mut out_dir = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(USAGE.into()),
            "--out-dir" => {
                let dir = iter.next().ok_or("--out-dir needs a directory")?;
                out_dir = Some(PathBuf::from(dir));
            }
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ => runs.push(parse_triple(&arg)?),
        }
    }

    let input = input.ok_or(USAGE)?;
    if runs.is_empty() {
        return Err(format!("no parameter triple given\n{}", USAGE).into());
    }
    if let Some(dir) = out_dir.as_deref().filter(|d: &&Path| !d.is_dir()) {
        return Err(format!("output directory {} does not exist", dir.display()).into());
    }
    Ok(Args {
        input,
        runs,
        out_dir,
    })
}

/// Parse `radius,spatial_sigma,range_sigma`.
fn parse_triple(s: &str) -> Result<BilateralParams, Box<dyn Error>> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [radius, spatial, range] = parts.as_slice() else {
        return Err(format!("expected radius,spatial_sigma,range_sigma, got '{}'", s).into());
    };
    let params = BilateralParams::new(spatial.parse()?, range.parse()?, radius.parse()?);
    params.validate()?;
    Ok(params)
}
