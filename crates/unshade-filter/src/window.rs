//! Window size validation shared by the filters

use crate::{FilterError, FilterResult};
use unshade_core::Grid;

/// Check that `size` is an odd, positive window that fits inside `grid`.
pub(crate) fn check_odd_window(grid: &Grid, name: &'static str, size: u32) -> FilterResult<()> {
    if size == 0 {
        return Err(FilterError::InvalidWindow {
            name,
            size,
            reason: "must be positive",
        });
    }
    if size % 2 == 0 {
        return Err(FilterError::InvalidWindow {
            name,
            size,
            reason: "must be odd",
        });
    }
    if size > grid.width() || size > grid.height() {
        return Err(FilterError::InvalidWindow {
            name,
            size,
            reason: "exceeds grid dimensions",
        });
    }
    Ok(())
}
