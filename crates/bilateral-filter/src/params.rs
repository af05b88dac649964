//! Filter configuration
//!
//! [`BilateralParams`] carries the three externally supplied constants of
//! one filter invocation. It is validated once, when the engine is built.

use crate::{FilterError, FilterResult};

// ============================================================================
// Default parameters
// ============================================================================

/// Default spatial standard deviation (pixels)
pub const DEFAULT_SPATIAL_SIGMA: f64 = 3.0;

/// Default range standard deviation (8-bit intensity levels)
pub const DEFAULT_RANGE_SIGMA: f64 = 30.0;

/// Default window half-width
pub const DEFAULT_RADIUS: u32 = 3;

/// Largest accepted window half-width.
///
/// Bounds the spatial table, which is built before any image is seen, at
/// `(2 * MAX_RADIUS + 1)^2` entries (about 32 MiB of `f64`).
pub const MAX_RADIUS: u32 = 1024;

// ============================================================================
// Option structure
// ============================================================================

/// Options for bilateral filtering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilateralParams {
    /// Standard deviation of the spatial Gaussian (must be > 0)
    pub spatial_sigma: f64,
    /// Standard deviation of the range Gaussian (must be > 0)
    pub range_sigma: f64,
    /// Half-width of the square window; the window side is `2 * radius + 1`
    pub radius: u32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            spatial_sigma: DEFAULT_SPATIAL_SIGMA,
            range_sigma: DEFAULT_RANGE_SIGMA,
            radius: DEFAULT_RADIUS,
        }
    }
}

impl BilateralParams {
    /// Create a configuration.
    ///
    /// Nothing is checked here; see [`BilateralParams::validate`].
    pub fn new(spatial_sigma: f64, range_sigma: f64, radius: u32) -> Self {
        Self {
            spatial_sigma,
            range_sigma,
            radius,
        }
    }

    /// Window side length, `2 * radius + 1`, or `None` if it overflows `u32`.
    #[inline]
    pub fn window_size(&self) -> Option<u32> {
        self.radius.checked_mul(2)?.checked_add(1)
    }

    /// Check that both sigmas are positive and finite and that
    /// `1 <= radius <= MAX_RADIUS`.
    pub fn validate(&self) -> FilterResult<()> {
        check_sigma("spatial_sigma", self.spatial_sigma)?;
        check_sigma("range_sigma", self.range_sigma)?;
        check_radius(self.radius)
    }

    /// Check that the window fits inside a `width x height` image.
    pub fn validate_for(&self, width: u32, height: u32) -> FilterResult<()> {
        let Some(size) = self.window_size() else {
            return Err(FilterError::InvalidConfiguration(format!(
                "radius {} is too large for any image",
                self.radius
            )));
        };
        if size > width || size > height {
            return Err(FilterError::InvalidConfiguration(format!(
                "window {}x{} (radius {}) does not fit a {}x{} image",
                size, size, self.radius, width, height
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_sigma(name: &str, value: f64) -> FilterResult<()> {
    // Written as a negated comparison so that NaN is rejected too
    if !(value > 0.0) || !value.is_finite() {
        return Err(FilterError::InvalidConfiguration(format!(
            "{} must be positive and finite, got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn check_radius(radius: u32) -> FilterResult<()> {
    if radius == 0 {
        return Err(FilterError::InvalidConfiguration(
            "radius must be at least 1".to_string(),
        ));
    }
    if radius > MAX_RADIUS {
        return Err(FilterError::InvalidConfiguration(format!(
            "radius {} exceeds maximum {}",
            radius, MAX_RADIUS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let p = BilateralParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.window_size(), Some(7));
    }

    #[test]
    fn test_invalid_sigmas() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(BilateralParams::new(bad, 30.0, 1).validate().is_err());
            assert!(BilateralParams::new(2.0, bad, 1).validate().is_err());
        }
    }

    #[test]
    fn test_invalid_radius() {
        assert!(BilateralParams::new(2.0, 30.0, 0).validate().is_err());
        assert!(
            BilateralParams::new(2.0, 30.0, MAX_RADIUS + 1)
                .validate()
                .is_err()
        );
        assert!(BilateralParams::new(2.0, 30.0, MAX_RADIUS).validate().is_ok());
    }

    #[test]
    fn test_validate_for_image() {
        let p = BilateralParams::new(2.0, 30.0, 2);
        assert!(p.validate_for(5, 5).is_ok());
        assert!(p.validate_for(4, 5).is_err());
        assert!(p.validate_for(5, 4).is_err());
    }

    #[test]
    fn test_validate_for_huge_radius() {
        let p = BilateralParams::new(2.0, 30.0, u32::MAX);
        assert_eq!(p.window_size(), None);
        assert!(matches!(
            p.validate_for(10, 10),
            Err(FilterError::InvalidConfiguration(_))
        ));
        assert!(p.validate_for(u32::MAX, u32::MAX).is_err());

        let p = BilateralParams::new(2.0, 30.0, u32::MAX / 2);
        assert_eq!(p.window_size(), Some(u32::MAX));
        assert!(p.validate_for(10, 10).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = BilateralParams::new(-2.0, 30.0, 1).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: spatial_sigma must be positive and finite, got -2"
        );
    }
}
