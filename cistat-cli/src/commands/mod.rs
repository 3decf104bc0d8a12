//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod builds;
mod join;
mod probe;
mod statuses;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Export the CI status of every commit in the input CSV
    Statuses,
    /// Export the build history of every repository in the input CSV
    Builds,
    /// Print the CI status of a few commits
    Probe {
        /// Repository slug (owner/name)
        repository: String,

        /// Commit SHAs to check
        #[arg(required = true)]
        shas: Vec<String>,
    },
    /// Append exported statuses to the rows of a commits CSV
    Join {
        /// CSV of repository, sha, status rows
        statuses: PathBuf,

        /// CSV whose rows start with repository, sha
        commits: PathBuf,

        /// Where to write the joined rows
        #[arg(long, default_value = "commits-combined.csv")]
        combined: PathBuf,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Statuses => statuses::handle_statuses_command(config).await,
        Commands::Builds => builds::handle_builds_command(config).await,
        Commands::Probe { repository, shas } => {
            probe::handle_probe_command(config, &repository, &shas).await
        }
        Commands::Join {
            statuses,
            commits,
            combined,
        } => join::handle_join_command(&statuses, &commits, &combined),
    }
}
