//! unshade-io - Grayscale image I/O
//!
//! Reads and writes 8-bit grayscale grids:
//!
//! - PGM (`P2`/`P5` read, `P5` write)
//! - PNG (any colour type read, 8-bit gray write)
//! - JPEG (baseline/progressive read, luma write)
//!
//! Colour inputs are reduced to luminance with [`luminance`].
//! The [`sink`] module provides the output abstraction used by the
//! restoration pipeline.

mod error;
pub mod format;
pub mod sink;

#[cfg(feature = "pnm")]
pub mod pnm;

#[cfg(feature = "png-format")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use sink::{FileSink, GridSink, MemorySink};

#[cfg(feature = "jpeg")]
pub use jpeg::DEFAULT_JPEG_QUALITY;

/// JPEG quality used when the `jpeg` feature is disabled.
#[cfg(not(feature = "jpeg"))]
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use unshade_core::Grid;

/// Reduce an RGB triple to 8-bit luminance.
///
/// Uses the integer weights `(77 r + 150 g + 29 b) >> 8`.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8
}

/// Read an image file, detecting the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Grid> {
    let path = path.as_ref();
    let mut data = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut data)?;
    debug!("read_image: {} ({} bytes)", path.display(), data.len());
    read_image_mem(&data)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Grid> {
    let format = detect_format_from_bytes(data)?;
    read_with_format(data, format)
}

fn read_with_format(data: &[u8], format: ImageFormat) -> IoResult<Grid> {
    match format {
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(data),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data),
        #[allow(unreachable_patterns)]
        other => Err(disabled(other)),
    }
}

/// Write a grid to a file in the given format.
pub fn write_image<P: AsRef<Path>>(grid: &Grid, path: P, format: ImageFormat) -> IoResult<()> {
    write_image_with_quality(grid, path, format, DEFAULT_JPEG_QUALITY)
}

/// Write a grid to a file, using `quality` for lossy formats.
pub fn write_image_with_quality<P: AsRef<Path>>(
    grid: &Grid,
    path: P,
    format: ImageFormat,
    quality: u8,
) -> IoResult<()> {
    let path = path.as_ref();
    debug!(
        "write_image: {} {}x{} {:?}",
        path.display(),
        grid.width(),
        grid.height(),
        format
    );
    let mut writer = BufWriter::new(File::create(path)?);
    write_with_format(grid, &mut writer, format, quality)?;
    writer.flush()?;
    Ok(())
}

/// Encode a grid into an in-memory buffer.
pub fn write_image_mem(grid: &Grid, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_with_format(grid, &mut buf, format, DEFAULT_JPEG_QUALITY)?;
    Ok(buf)
}

#[allow(unused_variables)]
fn write_with_format<W: Write>(
    grid: &Grid,
    writer: W,
    format: ImageFormat,
    quality: u8,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(grid, writer),
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(grid, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(grid, writer, quality),
        #[allow(unreachable_patterns)]
        other => Err(disabled(other)),
    }
}

#[allow(dead_code)]
fn disabled(format: ImageFormat) -> IoError {
    IoError::UnsupportedFormat(format!("{:?} support is not enabled", format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(0, 0, 0), 0);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(255, 0, 0), 76);
        assert_eq!(luminance(0, 255, 0), 149);
        assert_eq!(luminance(0, 0, 255), 28);
    }

    #[test]
    fn test_mem_roundtrip_lossless_formats() {
        let samples: Vec<u8> = (0..20u32).map(|i| (i * 13) as u8).collect();
        let grid = Grid::from_samples(5, 4, samples).unwrap();
        for format in [ImageFormat::Pnm, ImageFormat::Png] {
            let bytes = write_image_mem(&grid, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            assert_eq!(read_image_mem(&bytes).unwrap(), grid);
        }
    }

    #[test]
    fn test_read_unknown_bytes() {
        assert!(matches!(
            read_image_mem(b"GIF89a"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
