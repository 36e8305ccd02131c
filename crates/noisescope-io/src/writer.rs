//! Data writer trait and common types
//!
//! The `DataWriter` trait provides a uniform interface for emitting the row
//! shapes a run produces, independent of the file format.

use std::path::PathBuf;

use noisescope_core::{ExperimentOutput, MagnitudeRow, SpectralRow};
use thiserror::Error;

/// Errors that can occur during output
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid file stem: {0:?}")]
    InvalidStem(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type IoResult<T> = Result<T, IoError>;

/// Trait for writing experiment results
///
/// Each method writes one table named after `stem` and returns the path
/// written.
pub trait DataWriter {
    /// Write a raw DFT table
    fn write_spectrum(&mut self, stem: &str, rows: &[SpectralRow]) -> IoResult<PathBuf>;

    /// Write a magnitude-only table
    fn write_magnitudes(&mut self, stem: &str, rows: &[MagnitudeRow]) -> IoResult<PathBuf>;

    /// Write point coordinates, one per row
    fn write_points(&mut self, stem: &str, points: &[f32]) -> IoResult<PathBuf>;

    /// Get the format name
    fn format_name(&self) -> &'static str;

    /// Write any experiment output in its natural row shape
    fn write_output(&mut self, stem: &str, output: &ExperimentOutput) -> IoResult<PathBuf> {
        match output {
            ExperimentOutput::Spectrum(rows) => self.write_spectrum(stem, rows),
            ExperimentOutput::Averaged(spectrum) => self.write_magnitudes(stem, &spectrum.rows),
            ExperimentOutput::Points(points) => self.write_points(stem, points),
        }
    }
}

/// Reject stems that would escape the output directory or name nothing
pub fn check_stem(stem: &str) -> IoResult<()> {
    let valid = !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !stem.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(IoError::InvalidStem(stem.to_string()))
    }
}
