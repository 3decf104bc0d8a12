//! Input CSV parsing
//!
//! The input files are raw dumps: the first column is a repository slug,
//! the second (when present) a commit SHA, and anything after that is
//! ignored. Quote parsing is disabled because the dumps never quote fields
//! and may contain stray quote characters inside commit data.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use cistat_core::domain::Commit;
use clap::ValueEnum;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use thiserror::Error;

/// Errors raised while reading an input CSV
#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A row is too short to hold the required column
    #[error("line {line}: missing {column} column")]
    MissingColumn { line: u64, column: &'static str },
}

/// Whether the first row of an input CSV is a header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HeaderMode {
    /// Treat the first row as a header unless it starts with an `owner/name` slug
    #[default]
    Auto,
    /// Always skip the first row
    Present,
    /// Never skip the first row
    Absent,
}

impl HeaderMode {
    fn is_header(&self, first: &StringRecord) -> bool {
        match self {
            HeaderMode::Present => true,
            HeaderMode::Absent => false,
            HeaderMode::Auto => !first.get(0).is_some_and(looks_like_slug),
        }
    }
}

/// Repository slugs are `owner/name`
fn looks_like_slug(field: &str) -> bool {
    matches!(field.trim().split_once('/'), Some((owner, name)) if !owner.is_empty() && !name.is_empty())
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).flexible(true).quoting(false);
    builder
}

/// Lazily yields the `(repository, sha)` pairs of an input CSV in file order
pub struct CommitReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    header: HeaderMode,
    first: bool,
}

impl CommitReader<File> {
    pub fn open(path: &Path, header: HeaderMode) -> Result<Self, InputError> {
        let file = File::open(path).map_err(csv::Error::from)?;
        Ok(Self::from_reader(file, header))
    }
}

impl<R: Read> CommitReader<R> {
    pub fn from_reader(reader: R, header: HeaderMode) -> Self {
        Self {
            records: reader_builder().from_reader(reader).into_records(),
            header,
            first: true,
        }
    }

    fn to_commit(record: &StringRecord) -> Result<Commit, InputError> {
        let line = record.position().map_or(0, |p| p.line());
        let repository = record.get(0).ok_or(InputError::MissingColumn {
            line,
            column: "repository",
        })?;
        let sha = record
            .get(1)
            .filter(|sha| !sha.trim().is_empty())
            .ok_or(InputError::MissingColumn { line, column: "sha" })?;

        Ok(Commit::new(repository.trim(), sha.trim()))
    }
}

impl<R: Read> Iterator for CommitReader<R> {
    type Item = Result<Commit, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };

            let first = std::mem::replace(&mut self.first, false);
            if first && self.header.is_header(&record) {
                continue;
            }

            return Some(Self::to_commit(&record));
        }
    }
}

/// Unique repository names from the first column, in first-seen order
pub fn read_repository_names<R: Read>(
    reader: R,
    header: HeaderMode,
) -> Result<Vec<String>, InputError> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for (index, record) in reader_builder().from_reader(reader).into_records().enumerate() {
        let record = record?;
        if index == 0 && header.is_header(&record) {
            continue;
        }

        let Some(name) = record.get(0).map(str::trim).filter(|name| !name.is_empty()) else {
            continue;
        };

        if seen.insert(name.to_string()) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

/// [`read_repository_names`] over a file
pub fn read_repository_names_from_path(
    path: &Path,
    header: HeaderMode,
) -> Result<Vec<String>, InputError> {
    read_repository_names(File::open(path).map_err(csv::Error::from)?, header)
}
