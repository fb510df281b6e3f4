//! Non-local means denoising
//!
//! Replaces each sample with a weighted average of the samples in a
//! search window around it. A candidate's weight is
//! `exp(-d / h^2)`, where `d` is the sum of squared differences between
//! the block around the reference sample and the block around the
//! candidate.
//!
//! The grid is padded by `search_window / 2 + block_size / 2` with edge
//! replication so every candidate block lies inside the padded buffer.
//!
//! Cost is `O(W * H * search_window^2 * block_size^2)`; rows are
//! processed in parallel.

use crate::window::check_odd_window;
use crate::{FilterError, FilterResult};
use log::debug;
use rayon::prelude::*;
use unshade_core::{Grid, GridMut, round_saturate_u8};

/// Default search window side
pub const DEFAULT_SEARCH_WINDOW: u32 = 7;

/// Default block (patch) side
pub const DEFAULT_BLOCK_SIZE: u32 = 3;

/// Default filtering parameter
pub const DEFAULT_H: f32 = 10.0;

/// Options for non-local means denoising
#[derive(Debug, Clone, PartialEq)]
pub struct NlMeansOptions {
    /// Side of the search window (odd)
    pub search_window: u32,
    /// Side of the comparison block (odd)
    pub block_size: u32,
    /// Filtering parameter; larger values smooth more (must be > 0)
    pub h: f32,
}

impl Default for NlMeansOptions {
    fn default() -> Self {
        Self {
            search_window: DEFAULT_SEARCH_WINDOW,
            block_size: DEFAULT_BLOCK_SIZE,
            h: DEFAULT_H,
        }
    }
}

impl NlMeansOptions {
    /// Check the options against the grid they will be applied to.
    pub fn validate(&self, grid: &Grid) -> FilterResult<()> {
        check_odd_window(grid, "search", self.search_window)?;
        check_odd_window(grid, "block", self.block_size)?;
        if !(self.h.is_finite() && self.h > 0.0) {
            return Err(FilterError::DivisionByZero(format!(
                "non-local means h must be positive, got {}",
                self.h
            )));
        }
        Ok(())
    }
}

/// Denoise a grid with explicit options.
pub fn nl_means_with(grid: &Grid, options: &NlMeansOptions) -> FilterResult<Grid> {
    nl_means_denoise(grid, options.search_window, options.block_size, options.h)
}

/// Denoise a grid with non-local means.
///
/// # Arguments
/// * `grid` - Input grid
/// * `search_window` - Side of the search window (odd, fits the grid)
/// * `block_size` - Side of the comparison block (odd, fits the grid)
/// * `h` - Filtering parameter (finite and > 0)
pub fn nl_means_denoise(
    grid: &Grid,
    search_window: u32,
    block_size: u32,
    h: f32,
) -> FilterResult<Grid> {
    NlMeansOptions {
        search_window,
        block_size,
        h,
    }
    .validate(grid)?;
    debug!(
        "nl_means_denoise: {}x{} search={} block={} h={}",
        grid.width(),
        grid.height(),
        search_window,
        block_size,
        h
    );

    let (w, h_px) = grid.dimensions();
    let half_search = (search_window / 2) as isize;
    let half_block = (block_size / 2) as isize;
    let pad = (half_search + half_block) as u32;
    let padded = grid.pad_replicate(pad)?;
    let pw = padded.width() as isize;
    let pdata = padded.data();
    let inv_h2 = 1.0 / (h as f64 * h as f64);

    let mut out = GridMut::new(w, h_px)?;
    out.data_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let cy = y as isize + pad as isize;
            for (x, dst) in row.iter_mut().enumerate() {
                let cx = x as isize + pad as isize;
                let mut sum_weights = 0.0f64;
                let mut sum_values = 0.0f64;

                for dy in -half_search..=half_search {
                    for dx in -half_search..=half_search {
                        let mut dist = 0u64;
                        for by in -half_block..=half_block {
                            let ref_row = (cy + by) * pw + cx;
                            let cand_row = (cy + dy + by) * pw + cx + dx;
                            for bx in -half_block..=half_block {
                                let a = pdata[(ref_row + bx) as usize] as i32;
                                let b = pdata[(cand_row + bx) as usize] as i32;
                                dist += ((a - b) * (a - b)) as u64;
                            }
                        }

                        let weight = (-(dist as f64) * inv_h2).exp();
                        sum_weights += weight;
                        sum_values += weight * pdata[((cy + dy) * pw + cx + dx) as usize] as f64;
                    }
                }

                // The zero offset always contributes weight 1
                *dst = round_saturate_u8(sum_values / sum_weights);
            }
        });

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nlmeans_constant() {
        let grid = Grid::new_filled(9, 8, 123).unwrap();
        let out = nl_means_denoise(&grid, 7, 3, 10.0).unwrap();
        assert!(out.is_uniform(123));
    }

    #[test]
    fn test_nlmeans_single_block_is_identity() {
        // 1x1 search window only sees the sample itself
        let data: Vec<u8> = (0..16).map(|i| (i * 15) as u8).collect();
        let grid = Grid::from_samples(4, 4, data).unwrap();
        assert_eq!(nl_means_denoise(&grid, 1, 3, 5.0).unwrap(), grid);
    }

    #[test]
    fn test_nlmeans_smooths_outlier() {
        let mut gm = GridMut::new(9, 9).unwrap();
        gm.fill(100);
        gm.set(4, 4, 180).unwrap();
        let grid: Grid = gm.into();
        // Large h makes every weight close to one
        let out = nl_means_denoise(&grid, 5, 3, 1000.0).unwrap();
        let v = out.get(4, 4).unwrap();
        assert!(v < 110, "outlier kept value {v}");
    }

    #[test]
    fn test_nlmeans_defaults() {
        let options = NlMeansOptions::default();
        assert_eq!(options.search_window, 7);
        assert_eq!(options.block_size, 3);
        assert_eq!(options.h, 10.0);
        let grid = Grid::new_filled(8, 8, 40).unwrap();
        assert!(nl_means_with(&grid, &options).unwrap().is_uniform(40));
    }

    #[test]
    fn test_nlmeans_rejects_bad_parameters() {
        let grid = Grid::new(8, 8).unwrap();
        assert!(matches!(
            nl_means_denoise(&grid, 7, 3, 0.0),
            Err(FilterError::DivisionByZero(_))
        ));
        assert!(matches!(
            nl_means_denoise(&grid, 7, 3, f32::NAN),
            Err(FilterError::DivisionByZero(_))
        ));
        assert!(matches!(
            nl_means_denoise(&grid, 6, 3, 10.0),
            Err(FilterError::InvalidWindow { name: "search", .. })
        ));
        assert!(matches!(
            nl_means_denoise(&grid, 7, 2, 10.0),
            Err(FilterError::InvalidWindow { name: "block", .. })
        ));
        assert!(matches!(
            nl_means_denoise(&grid, 9, 3, 10.0),
            Err(FilterError::InvalidWindow { .. })
        ));
    }
}
