//! Local background estimation
//!
//! Models illumination as the locally brightest content of the image:
//!
//! 1. Pad the grid by the half window with edge replication
//! 2. Median-filter the padded grid to remove small-scale noise
//! 3. For every pixel, sort the `(2 * half_window + 1)^2` window of the
//!    denoised grid and average its largest samples
//!
//! This assumes foreground features are darker than the background
//! (dark text or objects on a lighter page).
//!
//! # Example
//!
//! ```ignore
//! use unshade_filter::background::estimate_background;
//!
//! let background = estimate_background(&grid, 4)?;
//! ```

use crate::rank::median_unchecked;
use crate::{FilterError, FilterResult};
use log::debug;
use rayon::prelude::*;
use unshade_core::{Grid, GridMut};

// ============================================================================
// Default parameters
// ============================================================================

/// Default half width of the aggregation window
pub const DEFAULT_HALF_WINDOW: u32 = 4;

/// Default median pre-pass window size
pub const DEFAULT_DENOISE_SIZE: u32 = 9;

/// Default number of largest window samples averaged
pub const DEFAULT_TOP_COUNT: u32 = 5;

/// Options for background estimation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundOptions {
    /// Half width of the aggregation window (window side is `2 * half_window + 1`)
    pub half_window: u32,
    /// Side of the median pre-pass window (odd)
    pub denoise_size: u32,
    /// Number of largest samples averaged per window (at least 1)
    pub top_count: u32,
}

impl Default for BackgroundOptions {
    fn default() -> Self {
        Self {
            half_window: DEFAULT_HALF_WINDOW,
            denoise_size: DEFAULT_DENOISE_SIZE,
            top_count: DEFAULT_TOP_COUNT,
        }
    }
}

impl BackgroundOptions {
    /// Options with the given half window and default pre-pass/top count.
    pub fn with_half_window(half_window: u32) -> Self {
        Self {
            half_window,
            ..Self::default()
        }
    }

    /// Check the pre-pass window and top count.
    ///
    /// The half window needs no check: the grid is padded by it.
    pub fn validate(&self) -> FilterResult<()> {
        if self.denoise_size == 0 || self.denoise_size % 2 == 0 {
            return Err(FilterError::InvalidWindow {
                name: "denoise",
                size: self.denoise_size,
                reason: "must be odd",
            });
        }
        if self.top_count == 0 {
            return Err(FilterError::DivisionByZero(
                "background top_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Estimate the background of a grid with a `2 * half_window + 1` window.
///
/// Uses the default median pre-pass and top count.
pub fn estimate_background(grid: &Grid, half_window: u32) -> FilterResult<Grid> {
    estimate_background_with(grid, &BackgroundOptions::with_half_window(half_window))
}

/// Estimate the background of a grid with explicit options.
///
/// When the window holds fewer samples than `top_count`, all window
/// samples are averaged.
pub fn estimate_background_with(grid: &Grid, options: &BackgroundOptions) -> FilterResult<Grid> {
    options.validate()?;
    debug!(
        "estimate_background: {}x{} half_window={} denoise={} top={}",
        grid.width(),
        grid.height(),
        options.half_window,
        options.denoise_size,
        options.top_count
    );

    let (w, h) = grid.dimensions();
    let hw = options.half_window;
    let padded = grid.pad_replicate(hw)?;

    // The median pass completes into its own grid before aggregation reads it
    let denoised = median_unchecked(&padded, options.denoise_size)?;

    let win = (2 * hw + 1) as usize;
    let n = win * win;
    let k = (options.top_count as usize).min(n);
    let pw = denoised.width() as usize;
    let pdata = denoised.data();

    let mut out = GridMut::new(w, h)?;
    out.data_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let mut window = Vec::with_capacity(n);
            for (x, dst) in row.iter_mut().enumerate() {
                window.clear();
                for py in y..y + win {
                    window.extend_from_slice(&pdata[py * pw + x..py * pw + x + win]);
                }
                *dst = top_mean(&mut window, k);
            }
        });

    Ok(out.into())
}

/// Floored mean of the `k` largest samples; reorders `window`.
///
/// `k` must be in `1..=window.len()`.
fn top_mean(window: &mut [u8], k: usize) -> u8 {
    let n = window.len();
    // Largest k samples end up in window[n - k..]
    window.select_nth_unstable(n - k);
    let sum: u64 = window[n - k..].iter().map(|&v| v as u64).sum();
    (sum / k as u64) as u8
}
