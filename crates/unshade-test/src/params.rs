//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use std::fs;
use std::path::Path;
use unshade_core::Grid;
use unshade_io::ImageFormat;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from environment variable or string
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "background")
    pub test_name: String,
    /// Current test index (incremented before each test)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        // Ensure directories exist
        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two grids for exact equality
    pub fn compare_grid(&mut self, grid1: &Grid, grid2: &Grid) -> bool {
        self.compare_grid_within(grid1, grid2, 0)
    }

    /// Compare two grids, allowing each sample to differ by `max_diff`
    pub fn compare_grid_within(&mut self, grid1: &Grid, grid2: &Grid, max_diff: u8) -> bool {
        self.index += 1;

        if !grid1.sizes_equal(grid2) {
            let msg = format!(
                "Failure in {}_reg: grid comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                grid1.dimensions(),
                grid2.dimensions()
            );
            self.record_failure(msg);
            return false;
        }

        let width = grid1.width() as usize;
        let mismatch = grid1
            .data()
            .iter()
            .zip(grid2.data())
            .position(|(a, b)| a.abs_diff(*b) > max_diff);

        if let Some(i) = mismatch {
            let msg = format!(
                "Failure in {}_reg: grid comparison for index {} - sample mismatch at ({}, {}): {} vs {}",
                self.test_name,
                self.index,
                i % width,
                i / width,
                grid1.data()[i],
                grid2.data()[i]
            );
            self.record_failure(msg);
            return false;
        }

        true
    }

    /// Check individual samples of a grid against known values
    ///
    /// Each entry of `expected` is `(x, y, value)`. All mismatches are
    /// reported under a single index.
    pub fn compare_samples(&mut self, grid: &Grid, expected: &[(u32, u32, u8)]) -> bool {
        self.index += 1;

        let mismatches: Vec<String> = expected
            .iter()
            .filter_map(|&(x, y, want)| match grid.get(x, y) {
                Some(got) if got == want => None,
                got => Some(format!("({x}, {y}): expected {want}, got {got:?}")),
            })
            .collect();

        if mismatches.is_empty() {
            return true;
        }
        let msg = format!(
            "Failure in {}_reg: sample comparison for index {}\n  {}",
            self.test_name,
            self.index,
            mismatches.join("\n  ")
        );
        self.record_failure(msg);
        false
    }

    /// Write a grid to file and check against the golden file
    pub fn write_grid_and_check(&mut self, grid: &Grid, format: ImageFormat) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );

        unshade_io::write_image(grid, &local_path, format).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with the golden file; a missing golden
    /// file is a failure.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    let msg = format!(
                        "Failure in {}_reg: golden file not found: {}",
                        self.test_name, golden_path
                    );
                    self.record_failure(msg);
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;

                if local_data != golden_data && !Self::compare_image_files(local_path, &golden_path)
                {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.record_failure(msg);
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Compare two image files sample-by-sample
    fn compare_image_files(path1: &str, path2: &str) -> bool {
        match (
            unshade_io::read_image(path1),
            unshade_io::read_image(path2),
        ) {
            (Ok(grid1), Ok(grid2)) => grid1 == grid2,
            _ => false,
        }
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
