//! bilateral-core - Basic data structures for image smoothing
//!
//! This crate provides the fundamental data structures used throughout
//! the bilateral-rs workspace:
//!
//! - [`Image`] / [`ImageMut`] - The RGB image container (immutable / mutable)
//! - [`Rgb`] - A single 8-bit-per-channel pixel
//! - [`ImageFormat`] - File format tag recorded by the I/O layer
//!
//! Pixels are stored in a single contiguous row-major buffer, so a pixel
//! at `(x, y)` lives at index `y * width + x`.

pub mod error;
pub mod image;

pub use color::Rgb;
pub use error::{Error, Result};
pub use image::{DiffStats, Image, ImageFormat, ImageMut};

/// Color channel indices and helper functions for RGB pixels.
///
/// # Pixel format
///
/// Each pixel is three 8-bit samples in R, G, B order.
pub mod color {
    /// Red channel index
    pub const RED: usize = 0;
    /// Green channel index
    pub const GREEN: usize = 1;
    /// Blue channel index
    pub const BLUE: usize = 2;

    /// Number of color channels per pixel
    pub const CHANNELS: usize = 3;

    /// An RGB pixel with 8 bits per channel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Rgb(pub [u8; CHANNELS]);

    impl Rgb {
        /// Black (0, 0, 0)
        pub const BLACK: Rgb = Rgb([0, 0, 0]);
        /// White (255, 255, 255)
        pub const WHITE: Rgb = Rgb([255, 255, 255]);

        /// Create a pixel from its three components.
        #[inline]
        pub const fn new(r: u8, g: u8, b: u8) -> Self {
            Rgb([r, g, b])
        }

        /// Create a gray pixel (all channels equal).
        #[inline]
        pub const fn gray(v: u8) -> Self {
            Rgb([v, v, v])
        }

        /// Red component.
        #[inline]
        pub fn r(self) -> u8 {
            self.0[RED]
        }

        /// Green component.
        #[inline]
        pub fn g(self) -> u8 {
            self.0[GREEN]
        }

        /// Blue component.
        #[inline]
        pub fn b(self) -> u8 {
            self.0[BLUE]
        }

        /// Component by channel index (0 = R, 1 = G, 2 = B).
        ///
        /// # Panics
        ///
        /// Panics if `channel >= CHANNELS`.
        #[inline]
        pub fn channel(self, channel: usize) -> u8 {
            self.0[channel]
        }

        /// All three components as an array.
        #[inline]
        pub fn channels(self) -> [u8; CHANNELS] {
            self.0
        }
    }

    impl From<(u8, u8, u8)> for Rgb {
        fn from((r, g, b): (u8, u8, u8)) -> Self {
            Rgb([r, g, b])
        }
    }

    impl From<Rgb> for (u8, u8, u8) {
        fn from(p: Rgb) -> Self {
            (p.0[RED], p.0[GREEN], p.0[BLUE])
        }
    }

}
