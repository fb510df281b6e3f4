//! Sample access for grids
//!
//! Checked, unchecked and edge-clamped reads, plus writes on [`GridMut`].

use super::{Grid, GridMut};
use crate::error::{Error, Result};

impl Grid {
    /// Get the sample at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.inner.width && y < self.inner.height {
            Some(self.inner.data[self.inner.index(x, y)])
        } else {
            None
        }
    }

    /// Get the sample at `(x, y)` without a bounds check on the coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the computed index falls outside the buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[self.inner.index(x, y)]
    }

    /// Get the sample nearest to `(x, y)`, clamping each axis independently.
    ///
    /// Coordinates outside the grid read the closest edge or corner sample,
    /// which is the replication rule used by padding and the rank filters.
    #[inline]
    pub fn get_clamped(&self, x: i64, y: i64) -> u8 {
        let cx = x.clamp(0, self.inner.width as i64 - 1) as u32;
        let cy = y.clamp(0, self.inner.height as i64 - 1) as u32;
        self.inner.data[self.inner.index(cx, cy)]
    }
}

impl GridMut {
    /// Get the sample at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.inner.width && y < self.inner.height {
            Some(self.inner.data[self.inner.index(x, y)])
        } else {
            None
        }
    }

    /// Get the sample at `(x, y)` without a bounds check on the coordinates.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        self.inner.data[self.inner.index(x, y)]
    }

    /// Set the sample at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the grid.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = value;
        Ok(())
    }

    /// Set the sample at `(x, y)` without a bounds check on the coordinates.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, value: u8) {
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = value;
    }
}
