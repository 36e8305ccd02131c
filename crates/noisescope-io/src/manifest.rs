//! Run manifest
//!
//! A JSON record written next to the tables: the configuration, the seed that
//! reproduces the run, and one entry per experiment with the file written and,
//! for averaged spectra, low- and high-band magnitude summaries.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use noisescope_core::{Experiment, ExperimentConfig, ExperimentKind, ExperimentOutput};
use noisescope_stats::BandSummary;
use serde::{Deserialize, Serialize};

use crate::writer::IoResult;

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// One written experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub stem: String,
    pub kind: ExperimentKind,
    pub file: PathBuf,
    pub rows: usize,
    /// Averaged magnitudes near DC, excluding DC itself
    pub low_band: Option<BandSummary>,
    /// Averaged magnitudes in the top quarter of the range
    pub high_band: Option<BandSummary>,
}

impl ManifestEntry {
    pub fn new(experiment: &Experiment, output: &ExperimentOutput, file: PathBuf) -> Self {
        let (rows, low_band, high_band) = match output {
            ExperimentOutput::Spectrum(rows) => (rows.len(), None, None),
            ExperimentOutput::Points(points) => (points.len(), None, None),
            // Bands need at least one non-zero frequency
            ExperimentOutput::Averaged(spectrum) if spectrum.range.max_hz() >= 1 => {
                let max_hz = spectrum.range.max_hz() as u32;
                let low = spectrum.band_summary(1, (max_hz / 4).max(1));
                let three_quarters = (u64::from(max_hz) * 3 / 4) as u32;
                let high = spectrum.band_summary(three_quarters.max(1), max_hz);
                (spectrum.rows.len(), Some(low), Some(high))
            }
            ExperimentOutput::Averaged(spectrum) => (spectrum.rows.len(), None, None),
        };

        Self {
            stem: experiment.stem.clone(),
            kind: experiment.kind.clone(),
            file,
            rows,
            low_band,
            high_band,
        }
    }

    /// Low-band mean over high-band mean, for averaged spectra
    pub fn suppression_ratio(&self) -> Option<f64> {
        match (&self.low_band, &self.high_band) {
            (Some(low), Some(high)) => Some(low.ratio_to(high)),
            _ => None,
        }
    }
}

/// Record of a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub config: ExperimentConfig,
    pub seed: u64,
    pub entries: Vec<ManifestEntry>,
}

impl RunManifest {
    pub fn new(config: ExperimentConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Write the manifest as pretty JSON into `dir`
    pub fn write_to(&self, dir: impl AsRef<Path>) -> IoResult<PathBuf> {
        let path = dir.as_ref().join(MANIFEST_FILE);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(path)
    }

    /// Read a manifest back from `dir`
    pub fn read_from(dir: impl AsRef<Path>) -> IoResult<Self> {
        let file = File::open(dir.as_ref().join(MANIFEST_FILE))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
