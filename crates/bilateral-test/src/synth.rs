//! Synthetic test images
//!
//! Deterministic inputs for the regression tests. The noisy variants are
//! seeded, so a given seed always produces the same image.

use crate::TestResult;
use bilateral_core::{Image, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// An image with every pixel set to `pixel`.
pub fn flat(width: u32, height: u32, pixel: Rgb) -> TestResult<Image> {
    Ok(Image::new_filled(width, height, pixel)?)
}

/// A horizontal gray ramp from 0 at the left edge to 255 at the right edge.
pub fn gradient(width: u32, height: u32) -> TestResult<Image> {
    let mut m = Image::new(width, height)?.into_mut();
    let span = width.saturating_sub(1).max(1);
    for row in m.rows_mut() {
        for (x, p) in row.iter_mut().enumerate() {
            *p = Rgb::gray((x as u32 * 255 / span) as u8);
        }
    }
    Ok(m.into())
}

/// A vertical step edge: columns `< edge` are `left`, the rest `right`.
pub fn step_edge(width: u32, height: u32, edge: u32, left: Rgb, right: Rgb) -> TestResult<Image> {
    let mut m = Image::new(width, height)?.into_mut();
    for row in m.rows_mut() {
        for (x, p) in row.iter_mut().enumerate() {
            *p = if (x as u32) < edge { left } else { right };
        }
    }
    Ok(m.into())
}

/// Add zero-mean Gaussian noise with standard deviation `sigma` to every
/// channel of `img`, clamping to `0..=255`.
pub fn add_gaussian_noise(img: &Image, sigma: f64, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m = img.to_mut();
    for p in m.data_mut() {
        for v in p.0.iter_mut() {
            let noisy = f64::from(*v) + sigma * standard_normal(&mut rng);
            *v = noisy.round().clamp(0.0, 255.0) as u8;
        }
    }
    m.into()
}

/// An image of independent uniformly random pixels.
pub fn random(width: u32, height: u32, seed: u64) -> TestResult<Image> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m = Image::new(width, height)?.into_mut();
    for p in m.data_mut() {
        *p = Rgb::new(
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
        );
    }
    Ok(m.into())
}

// Box-Muller transform
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
