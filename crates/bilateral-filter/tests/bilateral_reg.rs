//! Bilateral filtering regression test
//!
//! Fixed small scenes with known outcomes:
//!   (1) flat mid-gray is returned unchanged
//!   (2) a single bright corner pixel bleeds only into its one interior
//!       neighbor
//!   (3) a noisy step edge is smoothed on both sides without crossing
//!
//! Filtered images are also written to the regout directory and checked
//! against golden files when those exist.

use bilateral_core::{Image, ImageFormat, Rgb};
use bilateral_filter::{BilateralFilter, BilateralParams, FilterError, bilateral_filter};
use bilateral_test::{RegParams, synth};

#[test]
fn bilateral_reg() {
    let mut rp = RegParams::new("bilateral");

    // --- flat 5x5 mid-gray ---
    let flat = synth::flat(5, 5, Rgb::gray(128)).unwrap();
    let out = bilateral_filter(&flat, &BilateralParams::new(2.0, 30.0, 1)).unwrap();
    rp.compare_images(&flat, &out);

    // --- bright corner on black ---
    let mut m = Image::new(5, 5).unwrap().into_mut();
    m.set_pixel(4, 4, Rgb::new(255, 0, 0)).unwrap();
    let corner: Image = m.into();
    let out = bilateral_filter(&corner, &BilateralParams::new(2.0, 200.0, 1)).unwrap();

    // (4,4) is a border pixel and is copied
    let p44 = out.get_pixel(4, 4).unwrap();
    rp.compare_values(255.0, p44.r() as f64, 0.0);
    // (3,3) is the only interior pixel whose window reaches (4,4)
    let p33 = out.get_pixel(3, 3).unwrap();
    eprintln!("  corner scene: (3,3) = {:?}", p33);
    rp.compare_values(1.0, (p33.r() > 0 && p33.r() < 255) as u8 as f64, 0.0);
    rp.compare_values(0.0, p33.g() as f64, 0.0);
    rp.compare_values(0.0, p33.b() as f64, 0.0);
    rp.compare_values(1.0, corner.count_diffs(&out).unwrap() as f64, 0.0);

    // Analytic value: weights 1, 4 x exp(-1/8), 4 x exp(-2/8), the last
    // scaled by exp(-255^2 / (2 * 200^2))
    let edge = (-1.0f64 / 8.0).exp();
    let diag = (-2.0f64 / 8.0).exp();
    let bright = diag * (-(255.0f64 * 255.0) / 80000.0).exp();
    let expected = (255.0 * bright / (1.0 + 4.0 * edge + 3.0 * diag + bright)).floor();
    rp.compare_values(expected, p33.r() as f64, 0.0);

    // --- noisy step edge ---
    let step = synth::step_edge(40, 30, 20, Rgb::gray(40), Rgb::gray(210)).unwrap();
    let noisy = synth::add_gaussian_noise(&step, 6.0, 1234);
    let filter = BilateralFilter::new(BilateralParams::new(3.0, 30.0, 3)).unwrap();
    let out = filter.apply(&noisy).unwrap();
    rp.compare_values(40.0, out.width() as f64, 0.0);
    rp.compare_values(30.0, out.height() as f64, 0.0);

    let region = bilateral_filter::InteriorRegion::new(40, 30, 3).unwrap();
    let (mut dark_ok, mut bright_ok) = (true, true);
    for y in region.rows.clone() {
        for x in region.cols.clone() {
            let p = out.get_pixel(x, y).unwrap();
            if x < 20 {
                dark_ok &= p.channels().iter().all(|&v| v < 80);
            } else {
                bright_ok &= p.channels().iter().all(|&v| v > 170);
            }
        }
    }
    rp.compare_values(1.0, dark_ok as u8 as f64, 0.0);
    rp.compare_values(1.0, bright_ok as u8 as f64, 0.0);

    let before = mean_abs_error(&noisy, &step, &region);
    let after = mean_abs_error(&out, &step, &region);
    eprintln!("  noisy step: mean abs error {:.3} -> {:.3}", before, after);
    rp.compare_values(1.0, (after < before) as u8 as f64, 0.0);

    rp.write_image_and_check(&out, ImageFormat::Png).unwrap();

    assert!(rp.cleanup());
}

#[test]
fn bilateral_invalid_reg() {
    let mut rp = RegParams::new("bilateral_invalid");

    let img = synth::flat(4, 10, Rgb::gray(50)).unwrap();
    let filter = BilateralFilter::new(BilateralParams::new(2.0, 30.0, 2)).unwrap();
    let too_small = matches!(
        filter.apply(&img),
        Err(FilterError::InvalidConfiguration(_))
    );
    rp.compare_values(1.0, too_small as u8 as f64, 0.0);

    for params in [
        BilateralParams::new(0.0, 30.0, 1),
        BilateralParams::new(2.0, 0.0, 1),
        BilateralParams::new(2.0, f64::NAN, 1),
        BilateralParams::new(2.0, 30.0, 0),
    ] {
        let rejected = BilateralFilter::new(params).is_err();
        rp.compare_values(1.0, rejected as u8 as f64, 0.0);
    }

    assert!(rp.cleanup());
}

fn mean_abs_error(img: &Image, truth: &Image, region: &bilateral_filter::InteriorRegion) -> f64 {
    let mut total = 0u64;
    let mut count = 0u64;
    for y in region.rows.clone() {
        for x in region.cols.clone() {
            let a = img.get_pixel(x, y).unwrap();
            let b = truth.get_pixel(x, y).unwrap();
            for c in 0..3 {
                total += u64::from(a.channel(c).abs_diff(b.channel(c)));
                count += 1;
            }
        }
    }
    total as f64 / count as f64
}
