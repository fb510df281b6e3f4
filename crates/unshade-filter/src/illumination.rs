//! Illumination compensation
//!
//! Flattens uneven lighting by comparing each sample `x` with its
//! estimated background `xb` and applying a background-dependent gain
//! `k(xb)`:
//!
//! | `xb`              | `k`                         |
//! |-------------------|-----------------------------|
//! | `xb < 20`         | `2.5`                       |
//! | `20 <= xb <= 100` | `1 + 1.5 * (100 - xb) / 80` |
//! | `100 < xb < 200`  | `1`                         |
//! | `xb >= 200`       | `1 + (xb - 200) / 35`       |
//!
//! Samples darker than their background become a fixed foreground level
//! (191) when the scaled difference is at most `0.75 * 255`, and white
//! otherwise. Samples at or above their background map to
//! `255 - k * (xb - x)`, saturated to the 8-bit range.

use crate::FilterResult;
use log::debug;
use rayon::prelude::*;
use unshade_core::{Grid, GridMut, MAX_INTENSITY, saturate_u8};

/// Fraction of full scale separating weak from strong foreground contrast
pub const FOREGROUND_FRACTION: f64 = 0.75;

/// Output level for weak-contrast foreground, `round(0.75 * 255)`
pub const FOREGROUND_LEVEL: u8 = 191;

/// Gain applied to the foreground/background difference.
pub fn gain(xb: u8) -> f64 {
    let xb = xb as f64;
    if xb < 20.0 {
        2.5
    } else if xb <= 100.0 {
        1.0 + 1.5 * (100.0 - xb) / 80.0
    } else if xb < 200.0 {
        1.0
    } else {
        1.0 + (xb - 200.0) / 35.0
    }
}

/// Compensate a single sample against its background value.
#[inline]
pub fn compensate_pixel(x: u8, xb: u8) -> u8 {
    let k = gain(xb);
    let diff = xb as f64 - x as f64;
    if xb > x {
        if k * diff <= FOREGROUND_FRACTION * MAX_INTENSITY as f64 {
            FOREGROUND_LEVEL
        } else {
            MAX_INTENSITY
        }
    } else {
        saturate_u8(MAX_INTENSITY as f64 - k * diff)
    }
}

/// Compensate `original` against `background`, returning a new grid.
///
/// # Errors
/// Returns a core `DimensionMismatch` error if the grids differ in size.
pub fn compensate(original: &Grid, background: &Grid) -> FilterResult<Grid> {
    original.check_same_size(background)?;
    debug!(
        "compensate: {}x{}",
        original.width(),
        original.height()
    );

    let mut out = original.to_mut();
    apply(&mut out, background);
    Ok(out.into())
}

/// Compensate a grid in place against `background`.
///
/// Each sample is read once and overwritten with its own result, so no
/// scratch copy is needed.
pub fn compensate_in_place(grid: &mut GridMut, background: &Grid) -> FilterResult<()> {
    if grid.dimensions() != background.dimensions() {
        return Err(unshade_core::Error::DimensionMismatch {
            expected: background.dimensions(),
            actual: grid.dimensions(),
        }
        .into());
    }
    debug!("compensate_in_place: {}x{}", grid.width(), grid.height());
    apply(grid, background);
    Ok(())
}

fn apply(grid: &mut GridMut, background: &Grid) {
    let w = grid.width() as usize;
    grid.data_mut()
        .par_chunks_mut(w)
        .zip(background.data().par_chunks(w))
        .for_each(|(row, bg_row)| {
            for (x, &xb) in row.iter_mut().zip(bg_row) {
                *x = compensate_pixel(*x, xb);
            }
        });
}
