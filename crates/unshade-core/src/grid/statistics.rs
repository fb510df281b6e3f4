//! Whole-grid statistics

use super::Grid;

impl Grid {
    /// Get the smallest and largest sample.
    pub fn min_max(&self) -> (u8, u8) {
        self.data()
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Get the mean sample value.
    pub fn mean(&self) -> f64 {
        let sum: u64 = self.data().iter().map(|&v| v as u64).sum();
        sum as f64 / self.data().len() as f64
    }

    /// Count the samples equal to `value`.
    pub fn count_value(&self, value: u8) -> usize {
        self.data().iter().filter(|&&v| v == value).count()
    }

    /// Check whether every sample equals `value`.
    pub fn is_uniform(&self, value: u8) -> bool {
        self.data().iter().all(|&v| v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats() {
        let grid = Grid::from_samples(2, 2, vec![0, 100, 100, 200]).unwrap();
        assert_eq!(grid.min_max(), (0, 200));
        assert_eq!(grid.mean(), 100.0);
        assert_eq!(grid.count_value(100), 2);
        assert!(!grid.is_uniform(100));
        assert!(Grid::new_filled(3, 3, 5).unwrap().is_uniform(5));
    }
}
