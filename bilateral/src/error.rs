//! Error type for the bilateral driver

use bilateral_filter::FilterError;
use bilateral_io::IoError;
use thiserror::Error;

/// Errors that can occur while smoothing an image file
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected filter parameters, or a window larger than the image
    #[error(transparent)]
    InvalidConfiguration(#[from] FilterError),

    /// The image could not be read or written
    #[error("image access failed: {0}")]
    ImageAccess(#[from] IoError),
}

/// Result type for driver operations
pub type Result<T> = std::result::Result<T, Error>;
