//! JPEG image format support
//!
//! Reads baseline/progressive JPEG through `jpeg-decoder` and writes
//! single-component (luma) JFIF through `jpeg-encoder`.

use crate::{IoError, IoResult, luminance};
use jpeg_decoder::PixelFormat;
use log::trace;
use std::io::{Read, Write};
use unshade_core::Grid;

/// Default JPEG quality used when writing.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Read a JPEG image from a reader.
///
/// Colour images are reduced to luminance.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Grid> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    trace!("read_jpeg: {}x{} {:?}", width, height, info.pixel_format);

    let samples: Vec<u8> = match info.pixel_format {
        PixelFormat::L8 => pixels,
        PixelFormat::L16 => pixels.chunks_exact(2).map(|c| c[0]).collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|c| luminance(c[0], c[1], c[2]))
            .collect(),
        PixelFormat::CMYK32 => {
            return Err(IoError::UnsupportedFormat(
                "CMYK JPEG is not supported".to_string(),
            ));
        }
    };

    Ok(Grid::from_samples(width, height, samples)?)
}

/// Write a grid as a grayscale JPEG with the given quality (1..=100).
pub fn write_jpeg<W: Write>(grid: &Grid, mut writer: W, quality: u8) -> IoResult<()> {
    let (w, h) = grid.dimensions();
    let width = u16::try_from(w)
        .map_err(|_| IoError::EncodeError(format!("JPEG width {w} exceeds 65535")))?;
    let height = u16::try_from(h)
        .map_err(|_| IoError::EncodeError(format!("JPEG height {h} exceeds 65535")))?;
    let quality = quality.clamp(1, 100);
    trace!("write_jpeg: {}x{} quality={}", w, h, quality);

    let mut jpeg_buf = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut jpeg_buf, quality);
    encoder
        .encode(grid.data(), width, height, jpeg_encoder::ColorType::Luma)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;

    writer.write_all(&jpeg_buf)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_is_close() {
        let samples: Vec<u8> = (0..32 * 32).map(|i| ((i % 32) * 8) as u8).collect();
        let grid = Grid::from_samples(32, 32, samples).unwrap();

        let mut buf = Vec::new();
        write_jpeg(&grid, &mut buf, DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(&buf[..3], &[0xFF, 0xD8, 0xFF]);

        let decoded = read_jpeg(Cursor::new(buf)).unwrap();
        assert_eq!(decoded.dimensions(), (32, 32));
        let max_err = grid
            .data()
            .iter()
            .zip(decoded.data())
            .map(|(a, b)| a.abs_diff(*b))
            .max()
            .unwrap();
        assert!(max_err <= 8, "max error {max_err}");
    }

    #[test]
    fn test_constant_survives_lossy_coding() {
        let grid = Grid::new_filled(16, 16, 191).unwrap();
        let mut buf = Vec::new();
        write_jpeg(&grid, &mut buf, 90).unwrap();
        let decoded = read_jpeg(Cursor::new(buf)).unwrap();
        assert!(decoded.data().iter().all(|&v| v.abs_diff(191) <= 1));
    }
}
