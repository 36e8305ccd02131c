//! Trial averaging of magnitude spectra.
//!
//! A [`TrialAverager`] runs `test_count` independent trials. Each trial draws
//! one point set from a sampler, evaluates its DFT over the configured range
//! and folds the magnitudes into a [`SpectrumAccumulator`]. The accumulator
//! keeps one running mean per frequency, blended in strict trial order.
//!
//! # Parallel Processing
//!
//! When the `parallel` feature is enabled, [`TrialAverager::run_seeded`]
//! evaluates trials with rayon. Every trial owns its own random stream, and
//! the per-trial spectra are collected in trial order and folded on one
//! thread, so the result matches the sequential path exactly.

use noisescope_stats::{BandSummary, RunningMean};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::dft::{self, FrequencyRange, MagnitudeRow, SpectralRow};
use crate::error::{NoiseError, Result};
use crate::sampler::PointSampler;

const PROGRESS_INTERVAL: usize = 1000;

/// Running per-frequency mean of trial magnitudes
#[derive(Debug, Clone)]
pub struct SpectrumAccumulator {
    range: FrequencyRange,
    means: Vec<RunningMean>,
    trials: usize,
}

impl SpectrumAccumulator {
    pub fn new(range: FrequencyRange) -> Self {
        Self {
            range,
            means: vec![RunningMean::new(); range.len()],
            trials: 0,
        }
    }

    /// Fold one trial spectrum into the running average
    ///
    /// The spectrum must cover exactly the accumulator's frequency range.
    pub fn fold(&mut self, spectrum: &[SpectralRow]) -> Result<()> {
        self.check_grid(spectrum.len(), spectrum.first().map(|r| r.hz))?;
        for (mean, row) in self.means.iter_mut().zip(spectrum) {
            mean.push(row.mag);
        }
        self.trials += 1;
        Ok(())
    }

    /// Fold a magnitude-only spectrum into the running average
    pub fn fold_magnitudes(&mut self, spectrum: &[MagnitudeRow]) -> Result<()> {
        self.check_grid(spectrum.len(), spectrum.first().map(|r| r.hz))?;
        for (mean, row) in self.means.iter_mut().zip(spectrum) {
            mean.push(row.mag);
        }
        self.trials += 1;
        Ok(())
    }

    fn check_grid(&self, len: usize, start: Option<i32>) -> Result<()> {
        let start = start.unwrap_or(self.range.min_hz());
        if len != self.means.len() || start != self.range.min_hz() {
            return Err(NoiseError::FrequencyMismatch {
                expected: self.means.len(),
                expected_start: self.range.min_hz(),
                actual: len,
                actual_start: start,
            });
        }
        Ok(())
    }

    /// Number of trials folded so far
    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn range(&self) -> FrequencyRange {
        self.range
    }

    /// Snapshot of the current averages
    pub fn rows(&self) -> Vec<MagnitudeRow> {
        self.range
            .iter()
            .zip(&self.means)
            .map(|(hz, mean)| MagnitudeRow {
                hz,
                mag: mean.mean(),
            })
            .collect()
    }

    /// Finish accumulation; fails if no trial was folded
    pub fn finish(self) -> Result<AveragedSpectrum> {
        if self.trials == 0 {
            return Err(NoiseError::NoTrials);
        }
        Ok(AveragedSpectrum {
            range: self.range,
            trials: self.trials,
            rows: self.rows(),
        })
    }
}

/// Magnitude spectrum averaged over a number of trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragedSpectrum {
    pub range: FrequencyRange,
    pub trials: usize,
    pub rows: Vec<MagnitudeRow>,
}

impl AveragedSpectrum {
    /// Averaged magnitude at `hz`, if it lies in the range
    pub fn magnitude_at(&self, hz: i32) -> Option<f32> {
        if !self.range.contains(hz) {
            return None;
        }
        self.rows
            .get((hz as i64 - self.range.min_hz() as i64) as usize)
            .map(|row| row.mag)
    }

    /// Summary of magnitudes with `min_abs_hz <= |hz| <= max_abs_hz`
    pub fn band_summary(&self, min_abs_hz: u32, max_abs_hz: u32) -> BandSummary {
        BandSummary::from_rows(
            self.rows.iter().map(|row| (row.hz, row.mag)),
            min_abs_hz,
            max_abs_hz,
        )
    }
}

/// Runs repeated sample-then-evaluate trials and averages their magnitudes
#[derive(Debug, Clone, Copy)]
pub struct TrialAverager {
    sample_count: usize,
    test_count: usize,
    range: FrequencyRange,
}

impl TrialAverager {
    /// Both counts must be at least 1
    pub fn new(sample_count: usize, test_count: usize, range: FrequencyRange) -> Result<Self> {
        if sample_count == 0 {
            return Err(NoiseError::InvalidConfig(
                "sample count must be at least 1".to_string(),
            ));
        }
        if test_count == 0 {
            return Err(NoiseError::InvalidConfig(
                "test count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            sample_count,
            test_count,
            range,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn test_count(&self) -> usize {
        self.test_count
    }

    pub fn range(&self) -> FrequencyRange {
        self.range
    }

    /// Run one trial: sample a point set and evaluate its spectrum
    pub fn trial(
        &self,
        sampler: &dyn PointSampler,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<SpectralRow>> {
        let points = sampler.sample(self.sample_count, rng)?;
        dft::evaluate(points.as_slice(), self.range)
    }

    /// Run all trials sequentially, drawing from one injected random source
    pub fn run(
        &self,
        sampler: &dyn PointSampler,
        rng: &mut dyn RngCore,
    ) -> Result<AveragedSpectrum> {
        let id = &sampler.metadata().id;
        debug!(sampler = %id, trials = self.test_count, "averaging spectrum");

        let mut accumulator = SpectrumAccumulator::new(self.range);
        for t in 0..self.test_count {
            accumulator.fold(&self.trial(sampler, rng)?)?;
            log_progress(id, t, self.test_count);
        }

        let averaged = accumulator.finish()?;
        info!(sampler = %id, trials = averaged.trials, "averaged spectrum complete");
        Ok(averaged)
    }

    /// Run all trials with an independent random stream per trial
    ///
    /// Trial `t` draws from ChaCha stream `t` under `seed`, so the result
    /// depends only on `seed`, not on how trials are scheduled.
    pub fn run_seeded(&self, sampler: &dyn PointSampler, seed: u64) -> Result<AveragedSpectrum> {
        let id = &sampler.metadata().id;
        debug!(sampler = %id, trials = self.test_count, seed, "averaging spectrum");

        let mut accumulator = SpectrumAccumulator::new(self.range);

        #[cfg(feature = "parallel")]
        {
            let spectra: Vec<Vec<SpectralRow>> = (0..self.test_count)
                .into_par_iter()
                .map(|t| self.trial(sampler, &mut trial_rng(seed, t)))
                .collect::<Result<_>>()?;
            debug!(sampler = %id, done = spectra.len(), total = self.test_count, "trials evaluated");
            for spectrum in &spectra {
                accumulator.fold(spectrum)?;
            }
        }

        #[cfg(not(feature = "parallel"))]
        for t in 0..self.test_count {
            accumulator.fold(&self.trial(sampler, &mut trial_rng(seed, t))?)?;
            log_progress(id, t, self.test_count);
        }

        let averaged = accumulator.finish()?;
        info!(sampler = %id, trials = averaged.trials, seed, "averaged spectrum complete");
        Ok(averaged)
    }
}

/// Independent random source for trial `t` of a seeded run
pub fn trial_rng(seed: u64, t: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(t as u64);
    rng
}

fn log_progress(id: &str, t: usize, total: usize) {
    let done = t + 1;
    if done % PROGRESS_INTERVAL == 0 && done < total {
        debug!(sampler = %id, done, total, "trials folded");
    }
}
