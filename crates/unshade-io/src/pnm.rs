//! PGM (portable graymap) format support
//!
//! Reads ASCII (`P2`) and binary (`P5`) graymaps and writes binary `P5`.
//! Header comments (`#` to end of line) are skipped. Samples with a
//! `maxval` other than 255 are rescaled to the 8-bit range.

use crate::{IoError, IoResult};
use log::trace;
use std::io::{Read, Write};
use unshade_core::{Grid, round_saturate_u8};

/// Cursor over the raw PGM bytes that understands header tokens.
struct HeaderParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderParser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while self.pos < self.data.len() {
            match self.data[self.pos] {
                b'#' => {
                    while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                c if c.is_ascii_whitespace() => self.pos += 1,
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> IoResult<&'a [u8]> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.pos < self.data.len() && !self.data[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData("truncated PGM header".to_string()));
        }
        let data = self.data;
        Ok(&data[start..self.pos])
    }

    fn next_u32(&mut self) -> IoResult<u32> {
        let token = self.next_token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                IoError::InvalidData(format!(
                    "invalid PGM number '{}'",
                    String::from_utf8_lossy(token)
                ))
            })
    }
}

fn rescale(value: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        value.min(255) as u8
    } else {
        round_saturate_u8(value as f64 * 255.0 / maxval as f64)
    }
}

/// Read a PGM image (`P2` or `P5`) from a reader.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Grid> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut parser = HeaderParser::new(&data);
    let magic = parser.next_token()?;
    let binary = match magic {
        b"P5" => true,
        b"P2" => false,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant '{}' is not a graymap",
                String::from_utf8_lossy(other)
            )));
        }
    };

    let width = parser.next_u32()?;
    let height = parser.next_u32()?;
    let maxval = parser.next_u32()?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PGM maxval {maxval}")));
    }
    trace!("read_pnm: {}x{} maxval={} binary={}", width, height, maxval, binary);

    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| IoError::InvalidData(format!("PGM size {width}x{height} overflows")))?;

    let samples: Vec<u8> = if binary {
        // Exactly one whitespace byte separates maxval from the raster
        let start = parser.pos + 1;
        let bytes_per_sample = if maxval > 255 { 2 } else { 1 };
        let raster = count
            .checked_mul(bytes_per_sample)
            .and_then(|len| start.checked_add(len))
            .and_then(|end| data.get(start..end))
            .ok_or_else(|| IoError::InvalidData("truncated PGM raster".to_string()))?;
        if bytes_per_sample == 1 {
            raster.iter().map(|&v| rescale(v as u32, maxval)).collect()
        } else {
            raster
                .chunks_exact(2)
                .map(|c| rescale(u16::from_be_bytes([c[0], c[1]]) as u32, maxval))
                .collect()
        }
    } else {
        // Every ASCII sample takes at least two bytes
        let mut samples = Vec::with_capacity(count.min(data.len() / 2));
        for _ in 0..count {
            let v = parser.next_u32()?;
            samples.push(rescale(v, maxval));
        }
        samples
    };

    Ok(Grid::from_samples(width, height, samples)?)
}

/// Write a grid as a binary (`P5`) PGM.
pub fn write_pnm<W: Write>(grid: &Grid, mut writer: W) -> IoResult<()> {
    trace!("write_pnm: {}x{}", grid.width(), grid.height());
    write!(writer, "P5\n{} {}\n255\n", grid.width(), grid.height())?;
    writer.write_all(grid.data())?;
    writer.flush()?;
    Ok(())
}
