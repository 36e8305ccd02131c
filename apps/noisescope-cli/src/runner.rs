//! Experiment driver
//!
//! Loads the configuration, resolves the seed, runs every planned experiment
//! and hands each result to the CSV writer, recording it in the manifest.

use std::fs;
use std::path::Path;

use noisescope_core::{entropy_seed, ExperimentConfig, ExperimentPlan, NoiseError};
use noisescope_io::{CsvWriter, DataWriter, IoError, ManifestEntry, RunManifest};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that end a run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to read config {path}: {source}")]
    ReadConfig {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Noise(#[from] NoiseError),

    #[error(transparent)]
    Output(#[from] IoError),
}

/// Load configuration from a TOML file, or defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<ExperimentConfig, RunError> {
    let Some(path) = path else {
        info!("no config file given, using defaults");
        return Ok(ExperimentConfig::default());
    };

    let text = fs::read_to_string(Path::new(path)).map_err(|source| RunError::ReadConfig {
        path: path.to_string(),
        source,
    })?;
    let config = ExperimentConfig::from_toml(&text)?;
    info!(path, "loaded config");
    Ok(config)
}

/// Run all experiments and write their tables plus the manifest
pub fn run(config: ExperimentConfig) -> Result<RunManifest, RunError> {
    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = entropy_seed();
            info!(seed, "no seed configured, drew one from entropy");
            seed
        }
    };

    let plan = ExperimentPlan::from_config(&config, seed)?;
    info!(
        experiments = plan.len(),
        sample_count = config.sample_count,
        test_count = config.test_count,
        max_hz = config.max_hz,
        multiplier = config.multiplier,
        "starting run"
    );

    let mut writer = CsvWriter::create(&config.output_dir)?;
    let mut manifest = RunManifest::new(config.clone(), seed);

    for (index, experiment) in plan.experiments().iter().enumerate() {
        let output = plan.run(index)?;
        let path = writer.write_output(&experiment.stem, &output)?;
        let entry = ManifestEntry::new(experiment, &output, path);

        if let Some(ratio) = entry.suppression_ratio() {
            info!(stem = %entry.stem, ratio, "low/high band magnitude ratio");
        }
        manifest.push(entry);
    }

    if manifest.entries.is_empty() {
        warn!("all experiments are disabled, nothing was written");
    }

    let path = manifest.write_to(writer.dir())?;
    info!(path = %path.display(), "wrote manifest");
    Ok(manifest)
}
