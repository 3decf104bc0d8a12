//! Probe command
//!
//! Checks a handful of commits by hand and prints a verdict for each.

use std::sync::Arc;

use anyhow::{Context, Result};
use cistat_client::{GitHubClient, StatusApi};
use cistat_core::domain::{CommitState, CommitStatus};
use colored::*;

use crate::config::Config;
use crate::service::StatusFetcher;
use crate::token::{TokenProvider, require_token};

/// Handle the `probe` command
pub async fn handle_probe_command(config: &Config, repository: &str, shas: &[String]) -> Result<()> {
    let token = require_token(&config.github_token_file, TokenProvider::GitHub)?;
    let api: Arc<dyn StatusApi> = Arc::new(GitHubClient::new(&config.github_api_url, token));
    let fetcher = StatusFetcher::new(api, config.provider()?, config.low_water_mark);

    for sha in shas {
        let status = fetcher
            .fetch_status(repository, sha)
            .await
            .with_context(|| format!("Failed to fetch status of {}@{}", repository, sha))?;

        println!("{} {}", sha.dimmed(), verdict(status));
    }

    Ok(())
}

/// Human verdict for a commit status
fn verdict(status: CommitStatus) -> ColoredString {
    match status {
        CommitStatus::State(CommitState::Success) => "It succeeded!".green(),
        CommitStatus::State(CommitState::Failure) => "It failed.".red(),
        _ => "It's unaccounted for.".yellow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdicts() {
        colored::control::set_override(false);

        assert_eq!(
            verdict(CommitStatus::State(CommitState::Success)).to_string(),
            "It succeeded!"
        );
        assert_eq!(
            verdict(CommitStatus::State(CommitState::Failure)).to_string(),
            "It failed."
        );
        for status in [
            CommitStatus::State(CommitState::Pending),
            CommitStatus::State(CommitState::Error),
            CommitStatus::NotFound,
            CommitStatus::Unaccounted,
        ] {
            assert_eq!(verdict(status).to_string(), "It's unaccounted for.");
        }
    }
}
