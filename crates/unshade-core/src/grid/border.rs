//! Border operations for grids
//!
//! Window operations near the edges read from a padded copy instead of
//! special-casing the boundary:
//!
//! - [`Grid::pad_replicate`] enlarges a grid by replicating edges and corners
//! - [`Grid::remove_border`] crops a uniform border back off

use super::{Grid, GridMut};
use crate::error::{Error, Result};

impl Grid {
    /// Add a border of `amount` pixels on every side by edge replication.
    ///
    /// The result is `(width + 2*amount) x (height + 2*amount)`. Every
    /// padded sample equals the source sample at the nearest in-bounds
    /// coordinate, clamped independently per axis:
    ///
    /// - the interior is an exact copy of `self`
    /// - top/bottom margins repeat row `0` / row `height-1`
    /// - left/right margins repeat column `0` / column `width-1`
    /// - each `amount x amount` corner block is the nearest corner sample
    ///
    /// `amount == 0` returns an independent copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the padded size overflows.
    pub fn pad_replicate(&self, amount: u32) -> Result<Grid> {
        let (w, h) = self.dimensions();
        if amount == 0 {
            return Ok(self.deep_clone());
        }

        let new_w = amount
            .checked_mul(2)
            .and_then(|d| w.checked_add(d))
            .ok_or(Error::InvalidDimension {
                width: w,
                height: h,
            })?;
        let new_h = amount
            .checked_mul(2)
            .and_then(|d| h.checked_add(d))
            .ok_or(Error::InvalidDimension {
                width: w,
                height: h,
            })?;

        let mut out = GridMut::new(new_w, new_h)?;
        let pad = amount as usize;
        let (w, h, pw) = (w as usize, h as usize, new_w as usize);
        let dst = out.data_mut();

        // Interior rows with their left and right margins
        for y in 0..h {
            let src_row = self.row(y as u32);
            let start = (y + pad) * pw;
            let dst_row = &mut dst[start..start + pw];
            dst_row[..pad].fill(src_row[0]);
            dst_row[pad..pad + w].copy_from_slice(src_row);
            dst_row[pad + w..].fill(src_row[w - 1]);
        }

        // Top and bottom margins repeat the completed first/last rows,
        // which carries the corner samples into the corner blocks
        let first = pad * pw;
        let last = (pad + h - 1) * pw;
        for y in 0..pad {
            dst.copy_within(first..first + pw, y * pw);
            dst.copy_within(last..last + pw, (pad + h + y) * pw);
        }

        Ok(out.into())
    }

    /// Remove a uniform border of `amount` pixels from every side.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the border leaves no interior.
    pub fn remove_border(&self, amount: u32) -> Result<Grid> {
        let (w, h) = self.dimensions();
        if amount == 0 {
            return Ok(self.deep_clone());
        }
        if amount.saturating_mul(2) >= w || amount.saturating_mul(2) >= h {
            return Err(Error::InvalidParameter(format!(
                "border {amount} too large for {w}x{h} grid"
            )));
        }

        let new_w = w - 2 * amount;
        let new_h = h - 2 * amount;
        let mut samples = Vec::with_capacity(new_w as usize * new_h as usize);
        for y in amount..amount + new_h {
            let row = self.row(y);
            samples.extend_from_slice(&row[amount as usize..(amount + new_w) as usize]);
        }
        Grid::from_samples(new_w, new_h, samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_zero_is_copy() {
        let grid = Grid::from_samples(2, 2, vec![1, 2, 3, 4]).unwrap();
        let padded = grid.pad_replicate(0).unwrap();
        assert_eq!(padded, grid);
        assert_eq!(grid.ref_count(), 1);
    }

    #[test]
    fn test_pad_3x3_by_1() {
        let grid = Grid::from_samples(3, 3, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]).unwrap();
        let padded = grid.pad_replicate(1).unwrap();
        assert_eq!(padded.dimensions(), (5, 5));
        #[rustfmt::skip]
        let expected = vec![
            10, 10, 20, 30, 30,
            10, 10, 20, 30, 30,
            40, 40, 50, 60, 60,
            70, 70, 80, 90, 90,
            70, 70, 80, 90, 90,
        ];
        assert_eq!(padded.data(), expected.as_slice());
    }

    #[test]
    fn test_pad_single_pixel() {
        let grid = Grid::new_filled(1, 1, 77).unwrap();
        let padded = grid.pad_replicate(3).unwrap();
        assert_eq!(padded.dimensions(), (7, 7));
        assert!(padded.data().iter().all(|&v| v == 77));
    }

    #[test]
    fn test_remove_border_inverts_pad() {
        let grid = Grid::from_samples(4, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let padded = grid.pad_replicate(2).unwrap();
        assert_eq!(padded.remove_border(2).unwrap(), grid);
    }

    #[test]
    fn test_remove_border_too_large() {
        let grid = Grid::new(4, 10).unwrap();
        assert!(grid.remove_border(2).is_err());
        assert!(grid.remove_border(1).is_ok());
    }
}
