//! Error types for bilateral-filter
//!
//! Filtering itself cannot fail on a valid in-memory image; every error
//! here is raised while validating the configuration, before any weight
//! table is built or any pixel is touched.

use thiserror::Error;

/// Errors that can occur while configuring or running the filter
#[derive(Debug, Error)]
pub enum FilterError {
    /// Sigma or radius out of range, or a window that does not fit the image
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
