//! Join command

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::service::join_statuses;

/// Handle the `join` command
pub fn handle_join_command(statuses: &Path, commits: &Path, combined: &Path) -> Result<()> {
    let statuses_file = File::open(statuses)
        .with_context(|| format!("Failed to open {}", statuses.display()))?;
    let commits_file =
        File::open(commits).with_context(|| format!("Failed to open {}", commits.display()))?;
    let output = File::create(combined)
        .with_context(|| format!("Failed to create {}", combined.display()))?;

    let summary = join_statuses(statuses_file, commits_file, BufWriter::new(output))
        .context("Failed to join statuses")?;

    info!(
        "Wrote {} row(s) to {} ({} without status dropped)",
        summary.written,
        combined.display(),
        summary.dropped
    );

    Ok(())
}
