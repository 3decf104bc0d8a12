//! Commit status export
//!
//! Reads `repository, sha` pairs, resolves each commit's CI status through
//! the GitHub status API and writes one row per commit.

use std::io::{Read, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use cistat_client::{GitHubClient, StatusApi};
use tracing::info;

use crate::config::Config;
use crate::input::CommitReader;
use crate::service::{StatusFetcher, StatusWriter};
use crate::token::{TokenProvider, require_token};

/// Handle the `statuses` command
pub async fn handle_statuses_command(config: &Config) -> Result<()> {
    let token = require_token(&config.github_token_file, TokenProvider::GitHub)?;
    let provider = config.provider()?;

    let api: Arc<dyn StatusApi> = Arc::new(GitHubClient::new(&config.github_api_url, token));
    let fetcher = StatusFetcher::new(api, provider, config.low_water_mark);

    let commits = CommitReader::open(&config.input, config.header)
        .with_context(|| format!("Failed to open {}", config.input.display()))?;
    let mut writer = StatusWriter::create(&config.output)
        .with_context(|| format!("Failed to create {}", config.output.display()))?;

    let rows = export_statuses(&fetcher, commits, &mut writer).await?;
    info!("Wrote {} row(s) to {}", rows, config.output.display());

    Ok(())
}

/// Resolve and write the status of every commit, strictly one at a time
///
/// A row is written only after its fetch resolves. Returns the number of
/// rows written.
pub async fn export_statuses<R: Read, W: Write>(
    fetcher: &StatusFetcher,
    commits: CommitReader<R>,
    writer: &mut StatusWriter<W>,
) -> Result<usize> {
    for (index, commit) in commits.enumerate() {
        let commit = commit.context("Failed to read input row")?;

        let status = fetcher
            .fetch_status(&commit.repository, &commit.sha)
            .await
            .with_context(|| format!("Failed to fetch status of {}", commit))?;

        writer
            .write_row(&commit.repository, &commit.sha, status.label())
            .context("Failed to write output row")?;

        info!("[{}] {} {}", index + 1, commit, status.label());
    }

    Ok(writer.rows())
}
