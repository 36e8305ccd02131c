//! Incremental (running) mean
//!
//! After `t` samples the stored value is blended with the next sample using
//! weight `w = 1/(t+1)`:
//!
//! ```text
//! mean <- mean * (1 - w) + value * w
//! ```
//!
//! Applied from the first sample this reduces exactly to the arithmetic mean
//! at every step, while holding only one accumulator.

use serde::{Deserialize, Serialize};

/// Running arithmetic mean over single-precision samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningMean {
    mean: f32,
    count: usize,
}

impl RunningMean {
    /// Create an empty running mean
    pub fn new() -> Self {
        Self::default()
    }

    /// Blend in the next sample
    ///
    /// The first sample initializes the mean directly.
    pub fn push(&mut self, value: f32) {
        if self.count == 0 {
            self.mean = value;
        } else {
            let w = 1.0 / (self.count as f32 + 1.0);
            self.mean = self.mean * (1.0 - w) + value * w;
        }
        self.count += 1;
    }

    /// Current mean (0.0 before any sample)
    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Number of samples folded so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Check if no sample has been folded
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Extend<f32> for RunningMean {
    fn extend<I: IntoIterator<Item = f32>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f32> for RunningMean {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        let mut running = Self::new();
        running.extend(iter);
        running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_push_initializes() {
        let mut running = RunningMean::new();
        assert!(running.is_empty());

        running.push(7.5);
        assert_eq!(running.mean(), 7.5);
        assert_eq!(running.count(), 1);
    }

    #[test]
    fn test_matches_arithmetic_mean() {
        let running: RunningMean = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
        assert_eq!(running.count(), 4);
        assert!((running.mean() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_intermediate_means() {
        let mut running = RunningMean::new();
        let expected = [1.0, 1.5, 2.0, 2.5];
        for (value, mean) in [1.0, 2.0, 3.0, 4.0].into_iter().zip(expected) {
            running.push(value);
            assert!((running.mean() - mean).abs() < 1e-6);
        }
    }

    #[test]
    fn test_constant_sequence_is_stable() {
        let running: RunningMean = std::iter::repeat(0.3).take(10_000).collect();
        assert!((running.mean() - 0.3).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn test_running_mean_equals_batch_mean(values in prop::collection::vec(0.0f32..2.0, 1..200)) {
            let running: RunningMean = values.iter().copied().collect();
            let batch = values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64;
            prop_assert!((running.mean() as f64 - batch).abs() < 1e-4);
        }
    }
}
