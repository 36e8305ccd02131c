//! Direct discrete Fourier transform of irregular point sets.
//!
//! Each point `f` is treated as a unit impulse at position `f` on the unit
//! interval. For every integer frequency `hz` in an inclusive range:
//!
//! ```text
//! re(hz)    = (1/n) * Σ cos(2π·hz·f)
//! im(hz)    = (1/n) * Σ sin(2π·hz·f)
//! mag(hz)   = sqrt(re² + im²)
//! phase(hz) = atan2(im, re)
//! ```
//!
//! The points are not uniformly spaced, so this is evaluated directly rather
//! than through an FFT. Cost is O(span · n), which is small for the sample
//! counts and frequency spans used here.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, Result};

/// Inclusive range of integer frequencies
///
/// Always holds at least one frequency; deserialization goes through
/// [`FrequencyRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFrequencyRange")]
pub struct FrequencyRange {
    min_hz: i32,
    max_hz: i32,
}

#[derive(Deserialize)]
struct RawFrequencyRange {
    min_hz: i32,
    max_hz: i32,
}

impl TryFrom<RawFrequencyRange> for FrequencyRange {
    type Error = NoiseError;

    fn try_from(raw: RawFrequencyRange) -> Result<Self> {
        Self::new(raw.min_hz, raw.max_hz)
    }
}

impl FrequencyRange {
    /// Range `[min_hz, max_hz]`, rejecting an inverted range
    pub fn new(min_hz: i32, max_hz: i32) -> Result<Self> {
        if min_hz > max_hz {
            return Err(NoiseError::InvalidConfig(format!(
                "frequency range is inverted: min_hz {} > max_hz {}",
                min_hz, max_hz
            )));
        }
        Ok(Self { min_hz, max_hz })
    }

    /// Range `[-max_hz, max_hz]`
    pub fn symmetric(max_hz: u32) -> Self {
        let max_hz = max_hz.min(i32::MAX as u32) as i32;
        Self {
            min_hz: -max_hz,
            max_hz,
        }
    }

    pub fn min_hz(&self) -> i32 {
        self.min_hz
    }

    pub fn max_hz(&self) -> i32 {
        self.max_hz
    }

    /// Number of frequencies in the range
    pub fn len(&self) -> usize {
        usize::try_from(i64::from(self.max_hz) - i64::from(self.min_hz) + 1).unwrap_or(0)
    }

    /// Never true for a range built through [`FrequencyRange::new`]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frequencies in ascending order
    pub fn iter(&self) -> impl Iterator<Item = i32> {
        self.min_hz..=self.max_hz
    }

    pub fn contains(&self, hz: i32) -> bool {
        (self.min_hz..=self.max_hz).contains(&hz)
    }
}

/// One frequency of a raw DFT
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralRow {
    pub hz: i32,
    pub re: f32,
    pub im: f32,
    pub mag: f32,
    pub phase: f32,
}

impl SpectralRow {
    fn from_parts(hz: i32, re: f32, im: f32) -> Self {
        Self {
            hz,
            re,
            im,
            mag: (re * re + im * im).sqrt(),
            phase: im.atan2(re),
        }
    }

    /// Drop everything but the magnitude
    pub fn magnitude(&self) -> MagnitudeRow {
        MagnitudeRow {
            hz: self.hz,
            mag: self.mag,
        }
    }
}

/// One frequency of a magnitude-only spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeRow {
    pub hz: i32,
    pub mag: f32,
}

/// Evaluate the DFT of `points` at every integer frequency in `range`
///
/// Rows are returned in ascending `hz` order. Fails on an empty point set.
pub fn evaluate(points: &[f32], range: FrequencyRange) -> Result<Vec<SpectralRow>> {
    if points.is_empty() {
        return Err(NoiseError::EmptyPointSet);
    }

    let n = points.len() as f32;
    let rows = range
        .iter()
        .map(|hz| {
            let (re, im) = points.iter().fold((0.0f32, 0.0f32), |(re, im), &f| {
                let angle = TAU * hz as f32 * f;
                (re + angle.cos(), im + angle.sin())
            });
            SpectralRow::from_parts(hz, re / n, im / n)
        })
        .collect();

    Ok(rows)
}

/// Evaluate only the magnitude spectrum of `points`
pub fn evaluate_magnitudes(points: &[f32], range: FrequencyRange) -> Result<Vec<MagnitudeRow>> {
    Ok(evaluate(points, range)?
        .iter()
        .map(SpectralRow::magnitude)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_POINTS: [f32; 3] = [0.0, 0.25, 0.75];

    #[test]
    fn test_empty_point_set_rejected() {
        let result = evaluate(&[], FrequencyRange::symmetric(3));
        assert!(matches!(result, Err(NoiseError::EmptyPointSet)));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(FrequencyRange::new(3, -3).is_err());
        assert_eq!(FrequencyRange::new(-3, 3).unwrap(), FrequencyRange::symmetric(3));
    }

    #[test]
    fn test_inverted_range_rejected_on_deserialize() {
        let inverted = serde_json::from_str::<FrequencyRange>(r#"{"min_hz":3,"max_hz":-3}"#);
        assert!(inverted.is_err());

        let range: FrequencyRange =
            serde_json::from_str(r#"{"min_hz":-2,"max_hz":5}"#).unwrap();
        assert_eq!((range.min_hz(), range.max_hz()), (-2, 5));
        assert_eq!(range.len(), 8);
        assert!(!range.is_empty());
    }

    #[test]
    fn test_full_width_range_len() {
        let range = FrequencyRange::new(i32::MIN, i32::MAX).unwrap();
        assert_eq!(range.len() as u64, 1u64 << 32);
    }

    #[test]
    fn test_range_len_and_order() {
        let range = FrequencyRange::symmetric(20);
        assert_eq!(range.len(), 41);

        let rows = evaluate(&KNOWN_POINTS, range).unwrap();
        assert_eq!(rows.len(), 41);
        assert_eq!(rows.first().unwrap().hz, -20);
        assert_eq!(rows.last().unwrap().hz, 20);
        assert!(rows.windows(2).all(|w| w[0].hz + 1 == w[1].hz));
    }

    #[test]
    fn test_dc_component_is_exact() {
        let rows = evaluate(&KNOWN_POINTS, FrequencyRange::symmetric(3)).unwrap();
        let dc = rows.iter().find(|r| r.hz == 0).unwrap();

        assert_eq!(dc.re, 1.0);
        assert_eq!(dc.im, 0.0);
        assert_eq!(dc.mag, 1.0);
        assert_eq!(dc.phase, 0.0);
    }

    #[test]
    fn test_conjugate_symmetry() {
        let rows = evaluate(&KNOWN_POINTS, FrequencyRange::symmetric(3)).unwrap();

        for hz in 1..=3 {
            let pos = rows.iter().find(|r| r.hz == hz).unwrap();
            let neg = rows.iter().find(|r| r.hz == -hz).unwrap();
            assert!((pos.re - neg.re).abs() < 1e-6, "re differs at {}", hz);
            assert!((pos.im + neg.im).abs() < 1e-6, "im not negated at {}", hz);
            assert!((pos.mag - neg.mag).abs() < 1e-6);
        }
    }

    #[test]
    fn test_division_uses_current_size() {
        let range = FrequencyRange::symmetric(0);
        let one = evaluate(&[0.5], range).unwrap();
        let four = evaluate(&[0.1, 0.2, 0.3, 0.4], range).unwrap();

        assert_eq!(one[0].mag, 1.0);
        assert!((four[0].mag - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_single_point_has_unit_magnitude() {
        let rows = evaluate(&[0.37], FrequencyRange::symmetric(10)).unwrap();
        for row in rows {
            assert!((row.mag - 1.0).abs() < 1e-5, "hz {} mag {}", row.hz, row.mag);
        }
    }

    #[test]
    fn test_magnitude_only() {
        let rows = evaluate_magnitudes(&KNOWN_POINTS, FrequencyRange::new(0, 2).unwrap()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], MagnitudeRow { hz: 0, mag: 1.0 });
    }
}
