//! Output CSV writer

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

/// One output row: `repository, sha, status`
#[derive(Debug, Serialize)]
struct StatusRow<'a> {
    repository: &'a str,
    sha: &'a str,
    status: &'a str,
}

/// Appends `repository, sha, status` rows, flushing after each one
///
/// The file has no header row. Flushing per row bounds what a killed run
/// loses to the row in flight.
pub struct StatusWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl StatusWriter<File> {
    /// Create (or truncate) the output file
    pub fn create(path: &Path) -> Result<Self, csv::Error> {
        Ok(Self::from_writer(File::create(path)?))
    }
}

impl<W: Write> StatusWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().has_headers(false).from_writer(writer),
            rows: 0,
        }
    }

    pub fn write_row(&mut self, repository: &str, sha: &str, status: &str) -> Result<(), csv::Error> {
        self.writer.serialize(StatusRow {
            repository,
            sha,
            status,
        })?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[cfg(test)]
    pub fn into_inner(self) -> Result<W, csv::Error> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(io::Error::new(e.error().kind(), e.error().to_string())))
    }
}
