//! Grid - The intensity image container
//!
//! `Grid` is the single data type flowing through the restoration
//! pipeline: a row-major array of `width * height` 8-bit samples.
//!
//! # Ownership model
//!
//! `Grid` uses `Arc` for cheap cloning (shared ownership). Every stage
//! reads its inputs through `&Grid` and builds a fresh [`GridMut`] for its
//! output, which is frozen back into a `Grid` with `Into<Grid>`.
//! To modify an existing grid, convert it with [`Grid::try_into_mut`] or
//! [`Grid::to_mut`].

mod access;
mod border;
mod statistics;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Largest representable intensity.
pub const MAX_INTENSITY: u8 = u8::MAX;

/// Internal grid data
#[derive(Debug, Clone, PartialEq, Eq)]
struct GridData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major samples, always `width * height` long
    data: Vec<u8>,
}

impl GridData {
    fn zeroed(width: u32, height: u32, fill: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            data: vec![fill; len],
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Immutable single-channel 8-bit intensity grid
///
/// # Examples
///
/// ```
/// use unshade_core::Grid;
///
/// let grid = Grid::new_filled(64, 48, 200).unwrap();
/// assert_eq!(grid.dimensions(), (64, 48));
/// assert_eq!(grid.get(10, 10), Some(200));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    inner: Arc<GridData>,
}

impl Grid {
    /// Create a new grid with every sample set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new grid with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, value: u8) -> Result<Self> {
        Ok(Grid {
            inner: Arc::new(GridData::zeroed(width, height, value)?),
        })
    }

    /// Wrap an existing row-major sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty extent and
    /// [`Error::SampleCountMismatch`] if `samples.len() != width * height`.
    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(Error::SampleCountMismatch {
                width,
                height,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Grid {
            inner: Arc::new(GridData {
                width,
                height,
                data: samples,
            }),
        })
    }

    /// Get the grid width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the row-major sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.inner.index(0, y);
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Check if two grids have the same width and height.
    pub fn sizes_equal(&self, other: &Grid) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Fail with [`Error::DimensionMismatch`] unless `other` matches in size.
    pub fn check_same_size(&self, other: &Grid) -> Result<()> {
        if self.sizes_equal(other) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            })
        }
    }

    /// Get the number of strong references to the shared storage.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a deep copy that shares nothing with `self`.
    pub fn deep_clone(&self) -> Self {
        Grid {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Consume the grid and return its sample buffer.
    pub fn into_samples(self) -> Vec<u8> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => data.data,
            Err(arc) => arc.data.clone(),
        }
    }

    /// Try to get mutable access to the samples.
    ///
    /// Succeeds only if there is exactly one reference to the storage.
    pub fn try_into_mut(self) -> std::result::Result<GridMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(GridMut { inner: data }),
            Err(arc) => Err(Grid { inner: arc }),
        }
    }

    /// Create a mutable copy of this grid.
    pub fn to_mut(&self) -> GridMut {
        GridMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable intensity grid
///
/// Allows modification of samples. Convert back to an immutable
/// [`Grid`] using `Into<Grid>`.
#[derive(Debug)]
pub struct GridMut {
    inner: GridData,
}

impl GridMut {
    /// Create a new zero-filled mutable grid.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(GridMut {
            inner: GridData::zeroed(width, height, 0)?,
        })
    }

    /// Get the grid width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the grid height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the row-major sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the row-major sample buffer.
    ///
    /// The length of the buffer is fixed; rows are `width` samples apart,
    /// which makes `chunks_mut(width)` iterate the rows.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<GridMut> for Grid {
    fn from(grid: GridMut) -> Self {
        Grid {
            inner: Arc::new(grid.inner),
        }
    }
}
