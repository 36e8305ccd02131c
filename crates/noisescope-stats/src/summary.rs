//! Summary statistics for magnitude data
//!
//! Provides common statistical summaries:
//! - Mean, variance, standard deviation
//! - Min, max, range
//! - Band-restricted summaries of a spectrum

use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of finite values
    pub count: usize,
    /// Number of missing/NaN values
    pub missing: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    /// Standard deviation
    pub std_dev: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data
    pub fn from_data(data: &[f64]) -> Self {
        let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = data.len() - finite.len();

        if finite.is_empty() {
            return Self::empty(missing);
        }

        let count = finite.len();
        let mean = finite.iter().sum::<f64>() / count as f64;
        let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count,
            missing,
            min,
            max,
            mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }

    /// Create empty statistics (all NaN)
    fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            variance: f64::NAN,
            std_dev: f64::NAN,
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Check if no finite value was seen
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Summary of spectrum magnitudes whose `|hz|` lies in an inclusive band
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandSummary {
    /// Smallest `|hz|` included
    pub min_abs_hz: u32,
    /// Largest `|hz|` included
    pub max_abs_hz: u32,
    /// Statistics of the magnitudes in the band
    pub stats: SummaryStats,
}

impl BandSummary {
    /// Summarize `(hz, magnitude)` pairs restricted to `min_abs_hz <= |hz| <= max_abs_hz`
    pub fn from_rows<I>(rows: I, min_abs_hz: u32, max_abs_hz: u32) -> Self
    where
        I: IntoIterator<Item = (i32, f32)>,
    {
        let magnitudes: Vec<f64> = rows
            .into_iter()
            .filter(|(hz, _)| (min_abs_hz..=max_abs_hz).contains(&hz.unsigned_abs()))
            .map(|(_, mag)| mag as f64)
            .collect();

        Self {
            min_abs_hz,
            max_abs_hz,
            stats: SummaryStats::from_data(&magnitudes),
        }
    }

    /// Mean magnitude in the band
    pub fn mean(&self) -> f64 {
        self.stats.mean
    }

    /// Ratio of this band's mean to another band's mean
    ///
    /// Values well below 1.0 indicate suppression relative to `reference`.
    pub fn ratio_to(&self, reference: &BandSummary) -> f64 {
        self.stats.mean / reference.stats.mean
    }
}
