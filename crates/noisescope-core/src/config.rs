//! Configuration for noisescope experiments
//!
//! Centralized parameters for a run: sample and trial counts, the frequency
//! span, the best-candidate multiplier, and which experiments are enabled.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dft::FrequencyRange;
use crate::error::{NoiseError, Result};
use crate::sampler::SamplerRegistry;

/// Largest seed a TOML config can hold (TOML integers are signed 64-bit)
pub const MAX_SEED: u64 = i64::MAX as u64;

/// Draw a seed from system entropy that can be written back into a config
pub fn entropy_seed() -> u64 {
    rand::random::<u64>() >> 1
}

/// Run-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Directory all output tables are written to
    pub output_dir: String,
    /// Base seed, at most [`MAX_SEED`]; `None` draws one from system entropy
    pub seed: Option<u64>,
    /// Points per generated set
    pub sample_count: usize,
    /// Trials averaged per spectrum
    pub test_count: usize,
    /// Spectra cover `[-max_hz, max_hz]`
    pub max_hz: u32,
    /// Best-candidate multiplier (candidates for point k = k * multiplier + 1)
    pub multiplier: usize,
    /// Sampler ids whose averaged spectra (and point dumps) are produced
    pub samplers: Vec<String>,
    /// Emit the raw DFT of the fixed reference point set
    pub known_dft: bool,
    /// Emit one sorted point set per enabled sampler
    pub point_dumps: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            output_dir: "out".to_string(),
            seed: None,
            sample_count: 10,
            test_count: 10_000,
            max_hz: 20,
            multiplier: 1,
            samplers: vec![
                "white-noise".to_string(),
                "blue-noise".to_string(),
                "red-noise".to_string(),
            ],
            known_dft: true,
            point_dumps: true,
        }
    }
}

impl ExperimentConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| NoiseError::ConfigParse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Frequency range shared by all averaged spectra
    pub fn frequency_range(&self) -> FrequencyRange {
        FrequencyRange::symmetric(self.max_hz)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(NoiseError::InvalidConfig(
                "sample_count must be at least 1".to_string(),
            ));
        }

        if self.test_count == 0 {
            return Err(NoiseError::InvalidConfig(
                "test_count must be at least 1".to_string(),
            ));
        }

        if self.max_hz > i32::MAX as u32 {
            return Err(NoiseError::InvalidConfig(format!(
                "max_hz must not exceed {}",
                i32::MAX
            )));
        }

        if let Some(seed) = self.seed.filter(|&seed| seed > MAX_SEED) {
            return Err(NoiseError::InvalidConfig(format!(
                "seed {} exceeds {}",
                seed, MAX_SEED
            )));
        }

        let registry = SamplerRegistry::with_multiplier(self.multiplier)?;
        if let Some(unknown) = self.samplers.iter().find(|id| registry.get(id).is_none()) {
            return Err(NoiseError::UnknownSampler(unknown.clone()));
        }

        // Output stems are derived from sampler ids
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.samplers.iter().find(|id| !seen.insert(id.as_str())) {
            return Err(NoiseError::InvalidConfig(format!(
                "sampler {} is listed more than once",
                duplicate
            )));
        }

        if self.output_dir.trim().is_empty() {
            return Err(NoiseError::InvalidConfig(
                "output_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
