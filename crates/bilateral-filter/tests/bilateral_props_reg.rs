//! Bilateral filtering property regression test
//!
//! Properties checked on seeded random and noisy inputs:
//!   - repeat calls and the row-parallel path are bit-identical
//!   - border pixels are copied unchanged
//!   - a very wide range sigma converges to a plain spatial Gaussian blur
//!   - the range table saturates for a narrow range sigma
//!   - the work estimate grows with the radius

use bilateral_core::{Image, Rgb};
use bilateral_filter::{BilateralFilter, BilateralParams, RangeKernel, is_border_pixel};
use bilateral_test::{RegParams, synth};

#[test]
fn bilateral_determinism_reg() {
    let mut rp = RegParams::new("bilateral_determinism");

    let base = synth::gradient(48, 32).unwrap();
    let noisy = synth::add_gaussian_noise(&base, 12.0, 99);
    for radius in [1, 2, 4] {
        let filter = BilateralFilter::new(BilateralParams::new(2.5, 25.0, radius)).unwrap();
        let first = filter.apply(&noisy).unwrap();
        let second = filter.apply(&noisy).unwrap();
        let parallel = filter.apply_parallel(&noisy).unwrap();
        rp.compare_images(&first, &second);
        rp.compare_images(&first, &parallel);
    }

    assert!(rp.cleanup());
}

#[test]
fn bilateral_border_reg() {
    let mut rp = RegParams::new("bilateral_border");

    let (w, h) = (21, 15);
    let img = synth::random(w, h, 5).unwrap();
    for radius in [1, 3, 7] {
        let out = BilateralFilter::new(BilateralParams::new(3.0, 40.0, radius))
            .unwrap()
            .apply_parallel(&img)
            .unwrap();
        let mut changed = 0;
        for y in 0..h {
            for x in 0..w {
                if is_border_pixel(x, y, w, h, radius) && img.get_pixel(x, y) != out.get_pixel(x, y)
                {
                    changed += 1;
                }
            }
        }
        rp.compare_values(0.0, changed as f64, 0.0);
    }

    // The window exactly fits: only the center pixel is filtered
    let small = synth::random(7, 7, 6).unwrap();
    let out = BilateralFilter::new(BilateralParams::new(2.0, 1000.0, 3))
        .unwrap()
        .apply(&small)
        .unwrap();
    let mut m = out.to_mut();
    m.set_pixel(3, 3, small.get_pixel(3, 3).unwrap()).unwrap();
    rp.compare_images(&small, &m.into());

    assert!(rp.cleanup());
}

#[test]
fn bilateral_gaussian_limit_reg() {
    let mut rp = RegParams::new("bilateral_gaussian_limit");

    let img = synth::random(24, 20, 11).unwrap();
    for (spatial_sigma, radius) in [(1.0, 1), (2.0, 2), (3.0, 4)] {
        let params = BilateralParams::new(spatial_sigma, 10_000.0, radius);
        let out = BilateralFilter::new(params).unwrap().apply(&img).unwrap();
        let reference = gaussian_blur_reference(&img, spatial_sigma, radius);
        let max_diff = out.max_channel_diff(&reference).unwrap();
        eprintln!(
            "  spatial sigma {}, radius {}: max diff vs Gaussian = {}",
            spatial_sigma, radius, max_diff
        );
        rp.compare_values(0.0, max_diff as f64, 1.0);
    }

    assert!(rp.cleanup());
}

#[test]
fn bilateral_range_table_reg() {
    let mut rp = RegParams::new("bilateral_range_table");

    let narrow = RangeKernel::new(1.0).unwrap();
    rp.compare_values(1.0, narrow.weight(0), 0.0);
    rp.compare_values(0.0, narrow.weight(255), 1e-12);

    let wide = RangeKernel::new(10_000.0).unwrap();
    rp.compare_values(1.0, wide.weight(255), 1e-3);

    // With a narrow range sigma only equal neighbors carry weight, so a
    // random image comes back unchanged
    let img = synth::random(12, 12, 3).unwrap();
    let out = BilateralFilter::new(BilateralParams::new(2.0, 0.05, 2))
        .unwrap()
        .apply(&img)
        .unwrap();
    rp.compare_values(0.0, img.max_channel_diff(&out).unwrap() as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn bilateral_work_estimate_reg() {
    let mut rp = RegParams::new("bilateral_work_estimate");

    let mut previous = 0u64;
    for radius in 1..=6 {
        let work = BilateralFilter::new(BilateralParams::new(2.0, 30.0, radius))
            .unwrap()
            .work_estimate(64, 64);
        eprintln!("  radius {}: {} taps", radius, work);
        rp.compare_values(1.0, (work > previous) as u8 as f64, 0.0);
        previous = work;
    }

    let filter = BilateralFilter::new(BilateralParams::new(2.0, 30.0, 2)).unwrap();
    rp.compare_values(0.0, filter.work_estimate(3, 64) as f64, 0.0);
    rp.compare_values(3.0 * 25.0, filter.work_estimate(5, 5) as f64, 0.0);

    assert!(rp.cleanup());
}

/// Normalized spatial Gaussian blur over the interior, border copied.
fn gaussian_blur_reference(img: &Image, sigma: f64, radius: u32) -> Image {
    let (w, h) = img.dimensions();
    let r = radius as i64;
    let mut m = img.to_mut();
    for y in radius..h - radius {
        for x in radius..w - radius {
            let mut acc = [0.0f64; 3];
            let mut norm = 0.0f64;
            for dy in -r..=r {
                for dx in -r..=r {
                    let wgt = (-((dx * dx + dy * dy) as f64) / (2.0 * sigma * sigma)).exp();
                    let p = img
                        .get_pixel((x as i64 + dx) as u32, (y as i64 + dy) as u32)
                        .unwrap();
                    for (c, a) in acc.iter_mut().enumerate() {
                        *a += wgt * f64::from(p.channel(c));
                    }
                    norm += wgt;
                }
            }
            let out = acc.map(|a| (a / norm).floor().clamp(0.0, 255.0) as u8);
            m.set_pixel(x, y, Rgb(out)).unwrap();
        }
    }
    m.into()
}
