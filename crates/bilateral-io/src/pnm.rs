//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary).
//! Grayscale maps are replicated to RGB, and samples with a maxval other
//! than 255 are rescaled to 8 bits.  Writing always produces binary P6.
//! Bitmaps (P1/P4) and PAM (P7) are not supported.

use crate::{IoError, IoResult};
use bilateral_core::{Image, ImageFormat, Rgb};
use std::io::{BufRead, Read, Write};

/// Header of a PNM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PnmHeader {
    /// Magic number digit (2, 3, 5 or 6)
    kind: u8,
    width: u32,
    height: u32,
    maxval: u32,
}

impl PnmHeader {
    fn channels(&self) -> usize {
        match self.kind {
            2 | 5 => 1,
            _ => 3,
        }
    }

    fn is_ascii(&self) -> bool {
        matches!(self.kind, 2 | 3)
    }
}

/// Read a PNM image (P2/P3/P5/P6) from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the `P` of the magic number
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Image> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let mut pos = 0usize;
    let header = read_header(&bytes, &mut pos)?;
    let npix = header.width as usize * header.height as usize;
    let nsamples = npix
        .checked_mul(header.channels())
        .ok_or_else(|| IoError::InvalidData("PNM dimensions too large".to_string()))?;
    let remaining = bytes.len().saturating_sub(pos);

    let samples: Vec<u32> = if header.is_ascii() {
        // Every sample needs a digit and all but the last a separator
        if remaining < nsamples.saturating_mul(2).saturating_sub(1) {
            return Err(IoError::InvalidData(format!(
                "PNM data holds at most {} samples, header needs {}",
                remaining.div_ceil(2),
                nsamples
            )));
        }
        let mut out = Vec::with_capacity(nsamples);
        for _ in 0..nsamples {
            out.push(next_number(&bytes, &mut pos)?);
        }
        out
    } else {
        // Exactly one whitespace byte separates the header from the raster
        pos += 1;
        let bytes_per_sample = if header.maxval > 255 { 2 } else { 1 };
        let raster = nsamples
            .checked_mul(bytes_per_sample)
            .and_then(|len| bytes.get(pos..pos.checked_add(len)?))
            .ok_or_else(|| IoError::InvalidData("PNM raster truncated".to_string()))?;
        if bytes_per_sample == 2 {
            raster
                .chunks_exact(2)
                .map(|s| (u32::from(s[0]) << 8) | u32::from(s[1]))
                .collect()
        } else {
            raster.iter().map(|&s| u32::from(s)).collect()
        }
    };

    let scale = |v: u32| -> IoResult<u8> {
        if v > header.maxval {
            return Err(IoError::InvalidData(format!(
                "PNM sample {} exceeds maxval {}",
                v, header.maxval
            )));
        }
        Ok(if header.maxval == 255 {
            v as u8
        } else {
            ((v * 255 + header.maxval / 2) / header.maxval) as u8
        })
    };

    let mut pixels = Vec::with_capacity(npix);
    for s in samples.chunks_exact(header.channels()) {
        let pixel = match *s {
            [v] => Rgb::gray(scale(v)?),
            _ => Rgb::new(scale(s[0])?, scale(s[1])?, scale(s[2])?),
        };
        pixels.push(pixel);
    }

    let mut img = Image::from_raw(header.width, header.height, pixels)?.into_mut();
    img.set_informat(ImageFormat::Pnm);
    Ok(img.into())
}

/// Write an image as binary PPM (P6, maxval 255).
///
/// # Arguments
/// * `img`    - The image to encode
/// * `writer` - Destination writer
pub fn write_pnm<W: Write>(img: &Image, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", img.width(), img.height())?;
    writer.write_all(&img.to_rgb_bytes())?;
    writer.flush()?;
    Ok(())
}

fn read_header(bytes: &[u8], pos: &mut usize) -> IoResult<PnmHeader> {
    let kind = match bytes.get(..2) {
        Some(b"P2") => 2,
        Some(b"P3") => 3,
        Some(b"P5") => 5,
        Some(b"P6") => 6,
        _ => {
            return Err(IoError::UnsupportedFormat(
                "not a P2/P3/P5/P6 PNM file".to_string(),
            ));
        }
    };
    *pos = 2;

    let width = next_number(bytes, pos)?;
    let height = next_number(bytes, pos)?;
    let maxval = next_number(bytes, pos)?;
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid PNM dimensions: {}x{}",
            width, height
        )));
    }
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!(
            "invalid PNM maxval: {}",
            maxval
        )));
    }

    Ok(PnmHeader {
        kind,
        width,
        height,
        maxval,
    })
}

/// Parse the next decimal number, skipping whitespace and `#` comments.
fn next_number(bytes: &[u8], pos: &mut usize) -> IoResult<u32> {
    loop {
        match bytes.get(*pos) {
            Some(b'#') => {
                while let Some(&b) = bytes.get(*pos) {
                    *pos += 1;
                    if b == b'\n' {
                        break;
                    }
                }
            }
            Some(b) if b.is_ascii_whitespace() => *pos += 1,
            Some(_) => break,
            None => {
                return Err(IoError::InvalidData("unexpected end of PNM data".to_string()));
            }
        }
    }

    let start = *pos;
    while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
        *pos += 1;
    }
    if start == *pos {
        return Err(IoError::InvalidData(format!(
            "expected a number at byte {} of PNM data",
            start
        )));
    }

    std::str::from_utf8(&bytes[start..*pos])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| IoError::InvalidData("PNM number out of range".to_string()))
}
