//! noisescope-io - Output tables for spectral experiments
//!
//! This crate writes the results of a noisescope run:
//!
//! - **Raw DFT**: `hz, re, im, mag, phase`, one row per frequency
//! - **Averaged spectrum**: `hz, mag`, one row per frequency
//! - **Point dump**: one sorted coordinate per row, no header
//! - **Manifest**: JSON record of the configuration, seed and every file written
//!
//! # Design
//!
//! All writers implement the `DataWriter` trait for uniform output. The
//! writer owns file naming and directory creation; callers only hand it
//! rows and a file stem.

pub mod csv_writer;
pub mod manifest;
pub mod writer;

pub use csv_writer::*;
pub use manifest::*;
pub use writer::*;
