//! bilateral-io - Image I/O for bilateral-rs
//!
//! Loads a rectangular grid of RGB triples from a file and writes one back.
//! Supported formats (each behind a Cargo feature, all enabled by default):
//!
//! - PNG (`png-format`)
//! - JPEG (`jpeg`)
//! - PNM: PPM / PGM (`pnm`)
//!
//! Every decoded image is 8-bit RGB and remembers the format it was read
//! from (see [`bilateral_core::Image::informat`]).

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use bilateral_core::ImageFormat;
pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};

use bilateral_core::Image;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// The format is detected from the file's magic number, not its extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    let img = read_image_format(BufReader::new(file), format)?;
    log::debug!(
        "read {}x{} {:?} image from {}",
        img.width(),
        img.height(),
        format,
        path.display()
    );
    Ok(img)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Read an image of a known format from a buffered, seekable reader.
pub fn read_image_format<R>(reader: R, format: ImageFormat) -> IoResult<Image>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} reading not available",
            other
        ))),
    }
}

/// Write an image to a file path.
///
/// [`ImageFormat::Unknown`] is written as PNG.
pub fn write_image<P: AsRef<Path>>(img: &Image, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(img, &mut writer, format)?;
    writer.flush()?;
    log::debug!(
        "wrote {}x{} image to {} as {:?}",
        img.width(),
        img.height(),
        path.display(),
        format
    );
    Ok(())
}

/// Encode an image into an in-memory buffer.
pub fn write_image_mem(img: &Image, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(img, &mut buffer, format)?;
    Ok(buffer)
}

/// Encode an image to any writer.
///
/// [`ImageFormat::Unknown`] is written as PNG.
pub fn write_image_format<W: Write>(img: &Image, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png | ImageFormat::Unknown => png::write_png(img, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(img, writer, jpeg::DEFAULT_JPEG_QUALITY),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(img, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} writing not available",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Image {
        let mut m = Image::new(4, 3).unwrap().into_mut();
        for y in 0..3 {
            for x in 0..4 {
                m.set_rgb(x, y, (x * 60) as u8, (y * 100) as u8, 42).unwrap();
            }
        }
        m.into()
    }

    #[test]
    fn test_mem_roundtrip_lossless() {
        let img = sample();
        for format in [ImageFormat::Png, ImageFormat::Pnm] {
            let bytes = write_image_mem(&img, format).unwrap();
            let back = read_image_mem(&bytes).unwrap();
            assert!(back.equals(&img), "{:?} roundtrip changed pixels", format);
            assert_eq!(back.informat(), format);
        }
    }

    #[test]
    fn test_unknown_writes_png() {
        let bytes = write_image_mem(&sample(), ImageFormat::Unknown).unwrap();
        assert_eq!(detect_format_from_bytes(&bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_read_missing_file() {
        let res = read_image("/nonexistent/dir/none.png");
        assert!(matches!(res, Err(IoError::Io(_))));
    }

    #[test]
    fn test_read_unknown_bytes() {
        assert!(read_image_mem(b"hello world").is_err());
    }

    #[test]
    fn test_read_header_overstating_size() {
        let result = read_image_mem(b"P3\n100000 100000\n255\n1 2 3");
        assert!(matches!(result, Err(IoError::InvalidData(_))));
    }
}
