//! noisescope-core - Spectral evaluation of one-dimensional sample distributions
//!
//! This crate generates point sets in [0, 1) with controlled spectral character
//! and measures their expected power spectrum over many trials.
//!
//! # Key Components
//!
//! - **Sampler**: best-candidate generators (blue/red noise) and a uniform baseline
//! - **DFT**: direct Fourier transform of an irregular point set at integer frequencies
//! - **Averager**: running average of magnitude spectra across independent trials
//! - **Experiment**: configuration and the ordered plan of experiments a run performs
//!
//! # Data Flow
//!
//! ```text
//! sampler -> PointSet -> dft::evaluate -> SpectralRow* -> SpectrumAccumulator -> AveragedSpectrum
//! ```
//!
//! All random draws go through an injected `RngCore`, so every run is
//! reproducible from its seed.

pub mod averager;
pub mod config;
pub mod dft;
pub mod error;
pub mod experiment;
pub mod points;
pub mod sampler;

pub use averager::{AveragedSpectrum, SpectrumAccumulator, TrialAverager};
pub use config::{entropy_seed, ExperimentConfig, MAX_SEED};
pub use dft::{evaluate, FrequencyRange, MagnitudeRow, SpectralRow};
pub use error::{NoiseError, Result};
pub use experiment::{Experiment, ExperimentKind, ExperimentOutput, ExperimentPlan};
pub use points::{toroidal_distance, PointSet};
pub use sampler::{
    BestCandidate, CandidateScore, PointSampler, SamplerKind, SamplerMetadata, SamplerRegistry,
    Selection, SelectionStrategy, UniformSampler,
};
