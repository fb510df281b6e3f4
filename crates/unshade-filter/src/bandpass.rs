//! Band-pass extraction as a difference of box blurs
//!
//! Two uniform blurs of different sizes are subtracted and re-centred
//! on mid-gray: `clamp(blur(inner) - blur(outer) + 128, 0, 255)`.
//! Samples brighter than their surroundings come out above 128, darker
//! ones below.

use crate::FilterResult;
use crate::box_blur::box_blur;
use crate::window::check_odd_window;
use log::debug;
use rayon::prelude::*;
use unshade_core::{Grid, GridMut, saturate_i32_u8};

/// Default inner (smaller) blur size
pub const DEFAULT_INNER_SIZE: u32 = 3;

/// Default outer (larger) blur size
pub const DEFAULT_OUTER_SIZE: u32 = 5;

/// Offset added to the signed difference
pub const BANDPASS_OFFSET: i32 = 128;

/// Options for band-pass extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandpassOptions {
    /// Size of the first blur (odd)
    pub inner_size: u32,
    /// Size of the subtracted blur (odd)
    pub outer_size: u32,
}

impl Default for BandpassOptions {
    fn default() -> Self {
        Self {
            inner_size: DEFAULT_INNER_SIZE,
            outer_size: DEFAULT_OUTER_SIZE,
        }
    }
}

impl BandpassOptions {
    /// Check both blur windows against the grid they will be applied to.
    pub fn validate(&self, grid: &Grid) -> FilterResult<()> {
        check_odd_window(grid, "inner", self.inner_size)?;
        check_odd_window(grid, "outer", self.outer_size)
    }
}

/// Difference of two box blurs, offset by 128 and clamped.
///
/// # Arguments
/// * `grid` - Input grid
/// * `size1` - Window of the blur that is kept (odd)
/// * `size2` - Window of the blur that is subtracted (odd)
pub fn difference_of_boxes(grid: &Grid, size1: u32, size2: u32) -> FilterResult<Grid> {
    debug!(
        "difference_of_boxes: {}x{} sizes={}/{}",
        grid.width(),
        grid.height(),
        size1,
        size2
    );
    BandpassOptions {
        inner_size: size1,
        outer_size: size2,
    }
    .validate(grid)?;
    let blur1 = box_blur(grid, size1)?;
    let blur2 = box_blur(grid, size2)?;

    let (w, h) = grid.dimensions();
    let mut out = GridMut::new(w, h)?;
    out.data_mut()
        .par_iter_mut()
        .zip(blur1.data().par_iter().zip(blur2.data().par_iter()))
        .for_each(|(dst, (&a, &b))| {
            *dst = saturate_i32_u8(a as i32 - b as i32 + BANDPASS_OFFSET);
        });

    Ok(out.into())
}

/// Band-pass a grid with explicit options.
pub fn bandpass_with(grid: &Grid, options: &BandpassOptions) -> FilterResult<Grid> {
    difference_of_boxes(grid, options.inner_size, options.outer_size)
}
