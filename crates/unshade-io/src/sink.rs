//! Output sinks
//!
//! Stages never name files. A caller injects a [`GridSink`] and the
//! pipeline hands it each result with a destination label.

use crate::{ImageFormat, IoError, IoResult, write_image_with_quality};
use log::debug;
use std::path::{Path, PathBuf};
use unshade_core::Grid;

/// Destination for finished grids.
pub trait GridSink {
    /// Persist `grid` under the label `destination`.
    fn write(&mut self, grid: &Grid, destination: &str) -> IoResult<()>;
}

impl<S: GridSink + ?Sized> GridSink for &mut S {
    fn write(&mut self, grid: &Grid, destination: &str) -> IoResult<()> {
        (**self).write(grid, destination)
    }
}

/// Writes each grid to `<dir>/<destination>.<ext>`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    format: ImageFormat,
    quality: u8,
}

impl FileSink {
    /// Create a sink writing into `dir` (created on first write).
    pub fn new<P: AsRef<Path>>(dir: P, format: ImageFormat) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            format,
            quality: crate::DEFAULT_JPEG_QUALITY,
        }
    }

    /// Set the JPEG quality (ignored by lossless formats).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Path a destination label maps to.
    pub fn path_for(&self, destination: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", destination, self.format.extension()))
    }
}

impl GridSink for FileSink {
    fn write(&mut self, grid: &Grid, destination: &str) -> IoResult<()> {
        if destination.is_empty() || destination.contains(['/', '\\']) {
            return Err(IoError::InvalidData(format!(
                "invalid destination label '{destination}'"
            )));
        }
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(destination);
        debug!(
            "FileSink: writing {}x{} to {}",
            grid.width(),
            grid.height(),
            path.display()
        );
        write_image_with_quality(grid, &path, self.format, self.quality)
    }
}

/// Keeps written grids in memory, in write order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Vec<(String, Grid)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the most recent grid written under `destination`.
    pub fn get(&self, destination: &str) -> Option<&Grid> {
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| name == destination)
            .map(|(_, grid)| grid)
    }

    /// Destination labels in write order.
    pub fn destinations(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of writes received.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GridSink for MemorySink {
    fn write(&mut self, grid: &Grid, destination: &str) -> IoResult<()> {
        // Grid clones share storage
        self.entries.push((destination.to_string(), grid.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_order_and_lookup() {
        let mut sink = MemorySink::new();
        assert!(sink.is_empty());
        let a = Grid::new_filled(2, 2, 1).unwrap();
        let b = Grid::new_filled(2, 2, 2).unwrap();
        sink.write(&a, "first").unwrap();
        sink.write(&b, "second").unwrap();
        sink.write(&b, "first").unwrap();

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.destinations(), vec!["first", "second", "first"]);
        assert_eq!(sink.get("first"), Some(&b));
        assert_eq!(sink.get("missing"), None);
    }

    #[test]
    fn test_file_sink_path() {
        let sink = FileSink::new("/tmp/out", ImageFormat::Png);
        assert_eq!(sink.path_for("denoised"), PathBuf::from("/tmp/out/denoised.png"));
    }

    #[test]
    fn test_file_sink_rejects_path_labels() {
        let mut sink = FileSink::new(std::env::temp_dir(), ImageFormat::Pnm);
        let grid = Grid::new(1, 1).unwrap();
        assert!(sink.write(&grid, "../escape").is_err());
        assert!(sink.write(&grid, "").is_err());
    }
}
