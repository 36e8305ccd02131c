//! Experiment plan for a noisescope run.
//!
//! An [`ExperimentPlan`] expands an [`ExperimentConfig`] into an ordered list
//! of experiments, each with a stable output file stem, and runs them one at
//! a time. Running produces in-memory [`ExperimentOutput`]s only; writing
//! them out is left to the caller.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::averager::{AveragedSpectrum, TrialAverager};
use crate::config::ExperimentConfig;
use crate::dft::{self, FrequencyRange, SpectralRow};
use crate::error::{NoiseError, Result};
use crate::sampler::SamplerRegistry;

/// Fixed point set whose raw DFT is emitted as a reference fixture
pub const REFERENCE_POINTS: [f32; 3] = [0.0, 0.25, 0.75];

/// Frequency spans the reference DFT is evaluated over
pub const REFERENCE_SPANS: [u32; 2] = [3, 10];

/// What an experiment computes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExperimentKind {
    /// Raw DFT of [`REFERENCE_POINTS`]
    KnownDft { range: FrequencyRange },

    /// Magnitude spectrum averaged over all trials of one sampler
    AveragedSpectrum { sampler: String },

    /// One generated point set, sorted
    PointDump { sampler: String },
}

/// One planned experiment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Output file stem, unique within a plan
    pub stem: String,
    pub kind: ExperimentKind,
}

/// Result of running an experiment
#[derive(Clone, Debug, PartialEq)]
pub enum ExperimentOutput {
    /// `hz, re, im, mag, phase` rows
    Spectrum(Vec<SpectralRow>),

    /// `hz, mag` rows averaged over trials
    Averaged(AveragedSpectrum),

    /// Sorted coordinates
    Points(Vec<f32>),
}

/// Ordered experiments plus everything needed to run them
pub struct ExperimentPlan {
    experiments: Vec<Experiment>,
    registry: SamplerRegistry,
    averager: TrialAverager,
    sample_count: usize,
    seed: u64,
}

impl ExperimentPlan {
    /// Build the plan for a validated configuration, drawing from `seed`
    pub fn from_config(config: &ExperimentConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        let mut experiments = Vec::new();

        if config.known_dft {
            for span in REFERENCE_SPANS {
                experiments.push(Experiment {
                    stem: format!("dft-reference-{}", span),
                    kind: ExperimentKind::KnownDft {
                        range: FrequencyRange::symmetric(span),
                    },
                });
            }
        }

        for id in &config.samplers {
            experiments.push(Experiment {
                stem: format!("avg-{}", id),
                kind: ExperimentKind::AveragedSpectrum {
                    sampler: id.clone(),
                },
            });
        }

        if config.point_dumps {
            for id in &config.samplers {
                experiments.push(Experiment {
                    stem: format!("points-{}", id),
                    kind: ExperimentKind::PointDump {
                        sampler: id.clone(),
                    },
                });
            }
        }

        Ok(Self {
            experiments,
            registry: SamplerRegistry::with_multiplier(config.multiplier)?,
            averager: TrialAverager::new(
                config.sample_count,
                config.test_count,
                config.frequency_range(),
            )?,
            sample_count: config.sample_count,
            seed,
        })
    }

    pub fn experiments(&self) -> &[Experiment] {
        &self.experiments
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn registry(&self) -> &SamplerRegistry {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    /// Run the experiment at `index` in the plan
    ///
    /// Each experiment draws from its own seed derived from the plan seed
    /// and its position, so experiments can be rerun individually.
    pub fn run(&self, index: usize) -> Result<ExperimentOutput> {
        let experiment = self.experiments.get(index).ok_or_else(|| {
            NoiseError::InvalidConfig(format!(
                "no experiment at index {} (plan has {})",
                index,
                self.experiments.len()
            ))
        })?;
        let seed = derive_seed(self.seed, index);
        info!(stem = %experiment.stem, "running experiment");

        match &experiment.kind {
            ExperimentKind::KnownDft { range } => {
                Ok(ExperimentOutput::Spectrum(dft::evaluate(&REFERENCE_POINTS, *range)?))
            }
            ExperimentKind::AveragedSpectrum { sampler } => {
                let sampler = self.registry.require(sampler)?;
                Ok(ExperimentOutput::Averaged(
                    self.averager.run_seeded(sampler, seed)?,
                ))
            }
            ExperimentKind::PointDump { sampler } => {
                let sampler = self.registry.require(sampler)?;
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let points = sampler.sample(self.sample_count, &mut rng)?;
                Ok(ExperimentOutput::Points(points.sorted()))
            }
        }
    }

    /// Run every experiment in order
    pub fn run_all(&self) -> Result<Vec<(Experiment, ExperimentOutput)>> {
        (0..self.experiments.len())
            .map(|index| Ok((self.experiments[index].clone(), self.run(index)?)))
            .collect()
    }
}

/// Per-experiment seed, decorrelated from neighbouring indices
fn derive_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
