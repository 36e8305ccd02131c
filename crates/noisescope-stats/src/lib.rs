//! noisescope-stats - Statistical primitives for spectral experiments
//!
//! This crate provides the small amount of statistics the spectral pipeline needs:
//!
//! - **RunningMean**: incremental mean with bounded memory, folded in strict order
//! - **SummaryStats**: mean, spread and extremes of a dataset
//! - **BandSummary**: summary of magnitudes restricted to a frequency band
//!
//! # Design Philosophy
//!
//! Trial counts run into the tens of thousands, so averages are blended one
//! sample at a time instead of storing every sample and summing at the end.

pub mod running;
pub mod summary;

pub use running::*;
pub use summary::*;
