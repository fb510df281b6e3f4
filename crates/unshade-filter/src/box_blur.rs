//! Box blur (uniform window average)
//!
//! Each output sample is the integer mean of the `size x size` window
//! around it, truncated toward zero. Borders are handled by replicating
//! edge samples.

use crate::FilterResult;
use crate::window::check_odd_window;
use log::debug;
use rayon::prelude::*;
use unshade_core::{Grid, GridMut};

/// Blur a grid with a `size x size` uniform kernel.
///
/// # Arguments
/// * `grid` - Input grid
/// * `size` - Window side (odd, no larger than either grid dimension)
pub fn box_blur(grid: &Grid, size: u32) -> FilterResult<Grid> {
    check_odd_window(grid, "box", size)?;
    debug!("box_blur: {}x{} size={}", grid.width(), grid.height(), size);

    let (w, h) = grid.dimensions();
    let half = size / 2;
    let padded = grid.pad_replicate(half)?;
    let pw = padded.width() as usize;
    let pdata = padded.data();
    let area = size as u64 * size as u64;
    let size = size as usize;

    let mut out = GridMut::new(w, h)?;
    out.data_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, dst) in row.iter_mut().enumerate() {
                // Window top-left in padded coordinates is (x, y)
                *dst = (window_sum(pdata, pw, x, y, size) / area) as u8;
            }
        });

    Ok(out.into())
}

/// Sum of the `size x size` block of a row-major buffer with row stride
/// `stride`, whose top-left sample is at `(x, y)`.
fn window_sum(data: &[u8], stride: usize, x: usize, y: usize, size: usize) -> u64 {
    (y..y + size)
        .map(|py| {
            data[py * stride + x..py * stride + x + size]
                .iter()
                .map(|&v| v as u64)
                .sum::<u64>()
        })
        .sum()
}
