//! Rank filtering operations
//!
//! Provides rank (order-statistic) filters including median, min, and max
//! filters over square windows. Reads outside the grid are clamped to the
//! nearest edge sample, so no padded copy is needed.

use crate::window::check_odd_window;
use crate::{FilterError, FilterResult};
use log::debug;
use rayon::prelude::*;
use unshade_core::{Grid, GridMut};

/// Apply a rank filter with a square `size x size` window.
///
/// The output at each pixel is the sample at index `round(rank * (n - 1))`
/// of the ascending-sorted window, where `n = size * size`.
///
/// # Arguments
/// * `grid` - Input grid
/// * `size` - Window side (odd, no larger than either grid dimension)
/// * `rank` - Rank value in [0.0, 1.0] (0.0=min, 0.5=median, 1.0=max)
pub fn rank_filter(grid: &Grid, size: u32, rank: f32) -> FilterResult<Grid> {
    check_odd_window(grid, "rank", size)?;
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameters(format!(
            "rank must be in [0, 1], got {rank}"
        )));
    }
    let n = (size * size) as usize;
    let index = (rank as f64 * (n - 1) as f64).round() as usize;
    debug!(
        "rank_filter: {}x{} size={} rank={}",
        grid.width(),
        grid.height(),
        size,
        rank
    );
    rank_select(grid, size, index)
}

/// Apply a median filter with a square `size x size` window.
///
/// Selects index `n / 2` of the sorted window, the true median for odd `n`.
pub fn median_filter(grid: &Grid, size: u32) -> FilterResult<Grid> {
    check_odd_window(grid, "median", size)?;
    debug!(
        "median_filter: {}x{} size={}",
        grid.width(),
        grid.height(),
        size
    );
    median_unchecked(grid, size)
}

/// Apply a minimum filter (rank = 0.0).
pub fn min_filter(grid: &Grid, size: u32) -> FilterResult<Grid> {
    rank_filter(grid, size, 0.0)
}

/// Apply a maximum filter (rank = 1.0).
pub fn max_filter(grid: &Grid, size: u32) -> FilterResult<Grid> {
    rank_filter(grid, size, 1.0)
}

/// Median over an edge-clamped window without checking `size` against the
/// grid dimensions.
///
/// Used on padded scratch grids, where the window may be wider than the
/// grid but clamped reads still stay in bounds. `size` must be odd.
pub(crate) fn median_unchecked(grid: &Grid, size: u32) -> FilterResult<Grid> {
    let n = (size * size) as usize;
    rank_select(grid, size, n / 2)
}

fn rank_select(grid: &Grid, size: u32, index: usize) -> FilterResult<Grid> {
    let (w, h) = grid.dimensions();
    let half = (size / 2) as i64;
    let n = (size * size) as usize;

    let mut out = GridMut::new(w, h)?;
    out.data_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let mut window = Vec::with_capacity(n);
            for (x, dst) in row.iter_mut().enumerate() {
                window.clear();
                for ky in -half..=half {
                    for kx in -half..=half {
                        window.push(grid.get_clamped(x as i64 + kx, y as i64 + ky));
                    }
                }
                let (_, value, _) = window.select_nth_unstable(index);
                *dst = *value;
            }
        });

    Ok(out.into())
}
