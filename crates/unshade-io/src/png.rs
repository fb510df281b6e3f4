//! PNG image format support
//!
//! Any PNG colour type is accepted on read: palettes and low bit depths
//! are expanded, 16-bit samples are stripped to 8 bits, and colour is
//! reduced to luminance. Writing always produces 8-bit grayscale.

use crate::{IoError, IoResult, luminance};
use log::trace;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};
use unshade_core::Grid;

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Grid> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let (color_type, bit_depth) = reader.output_color_type();
    trace!(
        "read_png: {}x{} {:?} {:?}",
        width, height, color_type, bit_depth
    );
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth {:?}",
            bit_depth
        )));
    }

    let channels = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        _ => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut samples = Vec::with_capacity(width as usize * height as usize);

    for row in data.chunks(bytes_per_row).take(height as usize) {
        for px in row.chunks_exact(channels).take(width as usize) {
            let v = match channels {
                1 | 2 => px[0],
                _ => luminance(px[0], px[1], px[2]),
            };
            samples.push(v);
        }
    }

    Ok(Grid::from_samples(width, height, samples)?)
}

/// Write a PNG image (8-bit grayscale)
pub fn write_png<W: Write>(grid: &Grid, writer: W) -> IoResult<()> {
    trace!("write_png: {}x{}", grid.width(), grid.height());
    let mut encoder = Encoder::new(writer, grid.width(), grid.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(grid.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
