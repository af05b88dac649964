//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and writes them with
//! `jpeg-encoder`.  Grayscale sources are replicated to RGB; CMYK and any
//! other pixel formats are rejected.

use crate::{IoError, IoResult};
use bilateral_core::{Image, ImageFormat, Rgb};
use jpeg_decoder::PixelFormat;
use std::io::{Read, Write};

/// Default encoder quality (1-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let pixels: Vec<Rgb> = match info.pixel_format {
        PixelFormat::L8 => data.iter().map(|&v| Rgb::gray(v)).collect(),
        // Big-endian 16-bit samples; keep the high byte
        PixelFormat::L16 => data.chunks_exact(2).map(|s| Rgb::gray(s[0])).collect(),
        PixelFormat::RGB24 => data
            .chunks_exact(3)
            .map(|s| Rgb::new(s[0], s[1], s[2]))
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    let mut img = Image::from_raw(width, height, pixels)?.into_mut();
    img.set_informat(ImageFormat::Jpeg);
    Ok(img.into())
}

/// Write an image as baseline RGB JPEG.
///
/// # Arguments
/// * `img`     - The image to encode
/// * `writer`  - Destination writer
/// * `quality` - Encoder quality, clamped to 1..=100
pub fn write_jpeg<W: Write>(img: &Image, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(img.width()).map_err(|_| {
        IoError::EncodeError(format!("JPEG width {} exceeds 65535", img.width()))
    })?;
    let height = u16::try_from(img.height()).map_err(|_| {
        IoError::EncodeError(format!("JPEG height {} exceeds 65535", img.height()))
    })?;

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(
            &img.to_rgb_bytes(),
            width,
            height,
            jpeg_encoder::ColorType::Rgb,
        )
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_flat() {
        // Flat color survives lossy coding almost exactly
        let img = Image::new_filled(16, 16, Rgb::new(200, 100, 50)).unwrap();
        let mut buffer = Vec::new();
        write_jpeg(&img, &mut buffer, 95).unwrap();

        let img2 = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(img2.dimensions(), (16, 16));
        assert_eq!(img2.informat(), ImageFormat::Jpeg);
        assert!(img.max_channel_diff(&img2).unwrap() <= 4);
    }

    #[test]
    fn test_jpeg_garbage() {
        let res = read_jpeg(Cursor::new(vec![0xFF, 0xD8, 0xFF, 0x00, 0x01]));
        assert!(matches!(res, Err(IoError::DecodeError(_))));
    }
}
