//! CSV table writer

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use noisescope_core::{MagnitudeRow, SpectralRow};
use serde::Serialize;
use tracing::debug;

use crate::writer::{check_stem, DataWriter, IoError, IoResult};

/// Writes each table as `<dir>/<stem>.csv`
pub struct CsvWriter {
    dir: PathBuf,
    delimiter: u8,
}

impl CsvWriter {
    /// Create a writer for `dir`, creating the directory if needed
    pub fn create(dir: impl AsRef<Path>) -> IoResult<Self> {
        Self::create_with_options(dir, b',')
    }

    /// Create a writer with a custom delimiter
    pub fn create_with_options(dir: impl AsRef<Path>, delimiter: u8) -> IoResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| IoError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir, delimiter })
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a table with `stem` is written to
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", stem))
    }

    /// Serialize rows lazily from any iterator
    ///
    /// With `has_headers`, the header row is taken from the row type's field names.
    pub fn write_rows<I, T>(&mut self, stem: &str, rows: I, has_headers: bool) -> IoResult<PathBuf>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        check_stem(stem)?;
        let path = self.path_for(stem);

        let file = File::create(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(has_headers)
            .from_writer(BufWriter::new(file));

        let mut count = 0usize;
        for row in rows {
            writer.serialize(row)?;
            count += 1;
        }
        writer.flush()?;

        debug!(path = %path.display(), rows = count, "wrote table");
        Ok(path)
    }
}

impl DataWriter for CsvWriter {
    fn write_spectrum(&mut self, stem: &str, rows: &[SpectralRow]) -> IoResult<PathBuf> {
        self.write_rows(stem, rows, true)
    }

    fn write_magnitudes(&mut self, stem: &str, rows: &[MagnitudeRow]) -> IoResult<PathBuf> {
        self.write_rows(stem, rows, true)
    }

    fn write_points(&mut self, stem: &str, points: &[f32]) -> IoResult<PathBuf> {
        // Single-field records serialize as one column.
        self.write_rows(stem, points.iter().map(|&p| (p,)), false)
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}
