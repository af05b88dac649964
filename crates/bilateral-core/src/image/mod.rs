//! Image - The RGB image container
//!
//! The `Image` structure is the only image type in bilateral-rs.
//! Every pixel is an [`Rgb`] triple with 8 bits per channel.
//!
//! # Pixel layout
//!
//! - Image data is one contiguous `Vec<Rgb>`
//! - Rows are stored top to bottom, pixels left to right
//! - There is no row padding: the stride is always `width`
//!
//! # Ownership model
//!
//! `Image` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `ImageMut` via [`Image::try_into_mut`]
//! or [`Image::to_mut`], then convert back with `Into<Image>`.

mod access;
mod compare;

pub use compare::DiffStats;

use crate::color::{CHANNELS, Rgb};
use crate::error::{Error, Result};
use std::sync::Arc;

/// Image file format
///
/// Recorded on images produced by the I/O layer so that results can be
/// written back in the format they were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format (image created in memory)
    #[default]
    Unknown,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// PNM format (PPM / PGM)
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Pnm => "pnm",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    ///
    /// Returns [`ImageFormat::Unknown`] for unrecognized extensions.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jfif" => Self::Jpeg,
            "png" => Self::Png,
            "pnm" | "ppm" | "pgm" => Self::Pnm,
            _ => Self::Unknown,
        }
    }
}

/// Internal image data
#[derive(Debug)]
struct ImageData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Input file format
    informat: ImageFormat,
    /// The image data (row-major, `width * height` pixels)
    data: Vec<Rgb>,
}

impl ImageData {
    fn duplicate(&self) -> Self {
        ImageData {
            width: self.width,
            height: self.height,
            informat: self.informat,
            data: self.data.clone(),
        }
    }
}

/// Image - RGB image container
///
/// `Image` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use bilateral_core::{Image, Rgb};
///
/// let img = Image::new_filled(64, 48, Rgb::gray(128)).unwrap();
/// assert_eq!(img.width(), 64);
/// assert_eq!(img.height(), 48);
/// assert_eq!(img.get_pixel(10, 10), Some(Rgb::gray(128)));
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    inner: Arc<ImageData>,
}

impl Image {
    /// Create a new black image with the specified dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, Rgb::BLACK)
    }

    /// Create a new image with every pixel set to `pixel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_filled(width: u32, height: u32, pixel: Rgb) -> Result<Self> {
        let len = Self::pixel_count(width, height)?;
        Ok(Self::from_parts(width, height, vec![pixel; len]))
    }

    /// Create an image from a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension, or
    /// [`Error::BufferLength`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<Rgb>) -> Result<Self> {
        let expected = Self::pixel_count(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self::from_parts(width, height, data))
    }

    /// Create an image from packed `R, G, B, R, G, B, ...` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] if `bytes.len() != 3 * width * height`.
    pub fn from_rgb_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = Self::pixel_count(width, height)?;
        if bytes.len() != expected * CHANNELS {
            return Err(Error::BufferLength {
                expected,
                actual: bytes.len() / CHANNELS,
            });
        }
        let data = bytes
            .chunks_exact(CHANNELS)
            .map(|c| Rgb([c[0], c[1], c[2]]))
            .collect();
        Ok(Self::from_parts(width, height, data))
    }

    fn from_parts(width: u32, height: u32, data: Vec<Rgb>) -> Self {
        Image {
            inner: Arc::new(ImageData {
                width,
                height,
                informat: ImageFormat::Unknown,
                data,
            }),
        }
    }

    /// Number of pixels for the given dimensions.
    ///
    /// Uses u64 arithmetic to prevent overflow for large dimensions.
    fn pixel_count(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| Error::InvalidDimension { width, height })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the row-major pixel data.
    #[inline]
    pub fn data(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// Get one row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgb] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Pack the pixels as `R, G, B, R, G, B, ...` bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.inner.data.iter().flat_map(|p| p.channels()).collect()
    }

    /// Get the number of strong references to this image.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &Image) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a deep copy of this image.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Image {
            inner: Arc::new(self.inner.duplicate()),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns an [`ImageMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<ImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(ImageMut { inner: data }),
            Err(arc) => Err(Image { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> ImageMut {
        ImageMut {
            inner: self.inner.duplicate(),
        }
    }

    /// Get mutable access, copying only when the data is shared.
    pub fn into_mut(self) -> ImageMut {
        self.try_into_mut().unwrap_or_else(|shared| shared.to_mut())
    }
}

/// Mutable image
///
/// Allows modification of image data. Convert back to an immutable
/// [`Image`] using `Into<Image>`.
#[derive(Debug)]
pub struct ImageMut {
    inner: ImageData,
}

impl ImageMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Set the input file format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// Get mutable access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Rgb] {
        &mut self.inner.data
    }

    /// Get one row of pixels for modification.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [Rgb] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Iterate over the rows for modification.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, Rgb> {
        let w = self.inner.width as usize;
        self.inner.data.chunks_exact_mut(w)
    }

    /// Copy all pixels from `src`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn copy_from(&mut self, src: &Image) -> Result<()> {
        if self.inner.width != src.width() || self.inner.height != src.height() {
            return Err(Error::DimensionMismatch {
                expected: (self.inner.width, self.inner.height),
                actual: (src.width(), src.height()),
            });
        }
        self.inner.data.copy_from_slice(src.data());
        Ok(())
    }

    /// Set every pixel to `pixel`.
    pub fn fill(&mut self, pixel: Rgb) {
        self.inner.data.fill(pixel);
    }
}

impl From<ImageMut> for Image {
    fn from(img_mut: ImageMut) -> Self {
        Image {
            inner: Arc::new(img_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let img = Image::new(100, 200).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 200);
        assert_eq!(img.data().len(), 20_000);
        assert!(img.data().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(Image::new(0, 10).is_err());
        assert!(Image::new(10, 0).is_err());
    }

    #[test]
    fn test_from_raw_length_check() {
        let err = Image::from_raw(2, 2, vec![Rgb::BLACK; 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferLength {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_rgb_bytes() {
        let bytes = [1, 2, 3, 4, 5, 6];
        let img = Image::from_rgb_bytes(2, 1, &bytes).unwrap();
        assert_eq!(img.row(0), &[Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);
        assert_eq!(img.to_rgb_bytes(), bytes);
        assert!(Image::from_rgb_bytes(2, 1, &bytes[..5]).is_err());
    }

    #[test]
    fn test_clone_shares_data() {
        let img = Image::new(10, 10).unwrap();
        let img2 = img.clone();
        assert_eq!(img.ref_count(), 2);

        // Shared data can't be taken mutably
        let img = img.try_into_mut().unwrap_err();
        drop(img2);
        assert!(img.try_into_mut().is_ok());
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let img = Image::new_filled(4, 4, Rgb::gray(9)).unwrap();
        let copy = img.deep_clone();
        assert_eq!(img.ref_count(), 1);

        let mut m = copy.try_into_mut().unwrap();
        m.fill(Rgb::WHITE);
        let copy: Image = m.into();
        assert_eq!(img.get_pixel(0, 0), Some(Rgb::gray(9)));
        assert_eq!(copy.get_pixel(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn test_rows_mut() {
        let mut m = Image::new(3, 2).unwrap().into_mut();
        for (y, row) in m.rows_mut().enumerate() {
            row.fill(Rgb::gray(y as u8 * 100));
        }
        let img: Image = m.into();
        assert_eq!(img.row(0), &[Rgb::gray(0); 3]);
        assert_eq!(img.row(1), &[Rgb::gray(100); 3]);
    }

    #[test]
    fn test_copy_from_size_mismatch() {
        let mut m = Image::new(3, 3).unwrap().into_mut();
        let other = Image::new(4, 3).unwrap();
        assert!(m.copy_from(&other).is_err());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::from_extension("JPG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("ppm"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_extension("tif"), ImageFormat::Unknown);
    }
}
