//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! The `_unchecked` variants skip the `Option`/`Result` wrapping but
//! still rely on slice indexing, so out-of-range coordinates panic.

use super::{Image, ImageMut};
use crate::color::Rgb;
use crate::error::{Error, Result};

#[inline]
fn index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

impl Image {
    /// Get a pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel without the `Option` wrapper.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Rgb {
        self.data()[index(self.width(), x, y)]
    }

    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y).map(Into::into)
    }
}

impl ImageMut {
    /// Get a pixel at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel without the `Option` wrapper.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> Rgb {
        self.data()[index(self.width(), x, y)]
    }

    /// Set a pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgb) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        if x >= width || y >= height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        self.set_pixel_unchecked(x, y, pixel);
        Ok(())
    }

    /// Set a pixel without the `Result` wrapper.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, pixel: Rgb) {
        let i = index(self.width(), x, y);
        self.data_mut()[i] = pixel;
    }

    /// Set an RGB pixel at (x, y).
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_pixel(x, y, Rgb::new(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_pixel() {
        let mut m = Image::new(4, 3).unwrap().into_mut();
        m.set_rgb(3, 2, 1, 2, 3).unwrap();
        assert_eq!(m.get_pixel(3, 2), Some(Rgb::new(1, 2, 3)));

        let img: Image = m.into();
        assert_eq!(img.get_rgb(3, 2), Some((1, 2, 3)));
        assert_eq!(img.get_pixel(0, 0), Some(Rgb::BLACK));
        // Row-major layout
        assert_eq!(img.data()[2 * 4 + 3], Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut m = Image::new(4, 3).unwrap().into_mut();
        assert!(m.get_pixel(4, 0).is_none());
        assert!(matches!(
            m.set_pixel(0, 3, Rgb::WHITE),
            Err(Error::OutOfBounds { x: 0, y: 3, .. })
        ));
    }
}
