//! Joining exported statuses back onto a commits CSV

use std::collections::HashMap;
use std::io::{Read, Write};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use tracing::debug;

use crate::input::InputError;

/// Counts reported by [`join_statuses`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinSummary {
    /// Distinct `(repository, sha)` keys loaded from the status file
    pub statuses: usize,
    /// Commit rows written with a status appended
    pub written: usize,
    /// Commit rows without a status, left out
    pub dropped: usize,
}

fn field<'a>(record: &'a StringRecord, index: usize, column: &'static str) -> Result<&'a str, InputError> {
    record.get(index).ok_or(InputError::MissingColumn {
        line: record.position().map_or(0, |p| p.line()),
        column,
    })
}

/// Append each commit's status as a final column
///
/// `statuses` holds `repository, sha, status` rows; a later row for the
/// same key replaces an earlier one. Every row of `commits` whose
/// `(repository, sha)` has a status is copied to `output` with the status
/// appended and every field quoted. Rows without a status are dropped.
pub fn join_statuses<S: Read, C: Read, W: Write>(
    statuses: S,
    commits: C,
    output: W,
) -> Result<JoinSummary, InputError> {
    let mut by_commit: HashMap<(String, String), String> = HashMap::new();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(statuses);
    for record in reader.records() {
        let record = record?;
        let repository = field(&record, 0, "repository")?;
        let sha = field(&record, 1, "sha")?;
        let status = field(&record, 2, "status")?;
        by_commit.insert((repository.to_string(), sha.to_string()), status.to_string());
    }

    let mut summary = JoinSummary {
        statuses: by_commit.len(),
        ..JoinSummary::default()
    };
    debug!("Loaded {} status(es)", summary.statuses);

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .from_writer(output);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(commits);

    for record in reader.records() {
        let mut record = record?;
        let key = (
            field(&record, 0, "repository")?.to_string(),
            field(&record, 1, "sha")?.to_string(),
        );

        match by_commit.get(&key) {
            Some(status) => {
                record.push_field(status);
                writer.write_record(&record)?;
                summary.written += 1;
            }
            None => summary.dropped += 1,
        }
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(summary)
}
