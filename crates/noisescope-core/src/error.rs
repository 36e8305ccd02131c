//! Error types for noisescope-core
//!
//! Every error here is a configuration error: the algorithms themselves have
//! no recoverable failure path, so inputs are validated up front and rejected
//! before any arithmetic runs.

use thiserror::Error;

/// Result type alias for noisescope operations
pub type Result<T> = std::result::Result<T, NoiseError>;

/// Main error type for noisescope operations
#[derive(Error, Debug)]
pub enum NoiseError {
    /// A spectrum was requested for a point set with no points
    #[error("Cannot evaluate the spectrum of an empty point set")]
    EmptyPointSet,

    /// A point coordinate fell outside [0, 1)
    #[error("Point {value} at index {index} is outside [0, 1)")]
    PointOutOfRange { index: usize, value: f32 },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A trial spectrum did not share the accumulator's frequency grid
    #[error("Frequency grid mismatch: expected {expected} rows starting at {expected_start} hz, got {actual} rows starting at {actual_start} hz")]
    FrequencyMismatch {
        expected: usize,
        expected_start: i32,
        actual: usize,
        actual_start: i32,
    },

    /// The accumulator was finished before any trial was folded
    #[error("No trials were accumulated")]
    NoTrials,

    /// No sampler is registered under the given id
    #[error("Unknown sampler: {0}")]
    UnknownSampler(String),

    /// Configuration could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),
}

impl From<toml::de::Error> for NoiseError {
    fn from(err: toml::de::Error) -> Self {
        NoiseError::ConfigParse(err.to_string())
    }
}

impl From<serde_json::Error> for NoiseError {
    fn from(err: serde_json::Error) -> Self {
        NoiseError::ConfigParse(err.to_string())
    }
}
