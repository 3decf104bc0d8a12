//! Build history export
//!
//! For every repository named in the input, walks its Travis-CI build
//! history and writes one row per unique commit with its build state.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use cistat_client::{BuildHistoryApi, TravisClient};
use tracing::{info, warn};

use crate::config::Config;
use crate::input::read_repository_names_from_path;
use crate::service::{CommitCursor, StatusWriter};
use crate::token::{TokenProvider, require_token};

/// Counts reported by [`export_builds`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BuildExportSummary {
    pub repositories: usize,
    pub skipped: usize,
    pub rows: usize,
}

/// Handle the `builds` command
pub async fn handle_builds_command(config: &Config) -> Result<()> {
    let token = require_token(&config.travis_token_file, TokenProvider::Travis)?;
    let api: Arc<dyn BuildHistoryApi> = Arc::new(TravisClient::new(&config.travis_api_url, token));

    let names = read_repository_names_from_path(&config.input, config.header)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;
    info!("Found {} repositor(ies) in {}", names.len(), config.input.display());

    let mut writer = StatusWriter::create(&config.output)
        .with_context(|| format!("Failed to create {}", config.output.display()))?;

    let summary = export_builds(api, &names, &mut writer).await?;
    info!(
        "Wrote {} row(s) for {} repositor(ies), skipped {}",
        summary.rows, summary.repositories, summary.skipped
    );

    Ok(())
}

/// Write `repository, sha, build state` for every unique commit
///
/// Repositories the CI service does not know are skipped with a warning.
pub async fn export_builds<W: Write>(
    api: Arc<dyn BuildHistoryApi>,
    names: &[String],
    writer: &mut StatusWriter<W>,
) -> Result<BuildExportSummary> {
    let mut summary = BuildExportSummary::default();

    for (index, name) in names.iter().enumerate() {
        info!("[{}/{}] {}", index + 1, names.len(), name);

        let Some(mut cursor) = CommitCursor::open(Arc::clone(&api), name)
            .await
            .with_context(|| format!("Failed to look up repository {}", name))?
        else {
            warn!(" [!] Could not find repository {}", name);
            summary.skipped += 1;
            continue;
        };

        while let Some(record) = cursor
            .next_commit()
            .await
            .with_context(|| format!("Failed to list builds of {}", name))?
        {
            writer
                .write_row(cursor.repository(), &record.commit.sha, &record.state)
                .context("Failed to write output row")?;
            summary.rows += 1;
        }

        summary.repositories += 1;
    }

    Ok(summary)
}
