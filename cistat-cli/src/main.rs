//! Cistat CLI
//!
//! Batch jobs that export CI build and commit status history to CSV.
//!
//! Architecture:
//! - Configuration: flags with environment fallbacks, every one defaulted
//! - Input: CSV readers for repository names and commit pairs
//! - Services: rate limiter, status fetcher, build-history cursor, writer
//! - Commands: one handler per batch job
//!
//! Every job processes its items strictly in sequence and flushes each
//! output row as soon as it is resolved.

mod commands;
mod config;
mod input;
mod service;
mod token;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Commands, handle_command};
use config::{Config, DEFAULT_GITHUB_API_URL, DEFAULT_TRAVIS_API_URL};
use input::HeaderMode;

#[derive(Parser)]
#[command(name = "cistat")]
#[command(about = "Export CI build and commit status history to CSV", long_about = None)]
struct Cli {
    /// GitHub API URL
    #[arg(long, global = true, env = "CISTAT_GITHUB_API_URL", default_value = DEFAULT_GITHUB_API_URL)]
    github_api_url: String,

    /// Travis-CI API URL
    #[arg(long, global = true, env = "CISTAT_TRAVIS_API_URL", default_value = DEFAULT_TRAVIS_API_URL)]
    travis_api_url: String,

    /// File holding the GitHub access token
    #[arg(long, global = true, env = "CISTAT_GITHUB_TOKEN_FILE", default_value = "gh-access-token")]
    github_token_file: PathBuf,

    /// File holding the Travis-CI token
    #[arg(long, global = true, env = "CISTAT_TRAVIS_TOKEN_FILE", default_value = "travis-token")]
    travis_token_file: PathBuf,

    /// Input CSV
    #[arg(long, global = true, env = "CISTAT_INPUT", default_value = "commits.csv")]
    input: PathBuf,

    /// Output CSV (overwritten)
    #[arg(long, global = true, env = "CISTAT_OUTPUT", default_value = "commit-status.csv")]
    output: PathBuf,

    /// Whether the input CSV starts with a header row
    #[arg(long, global = true, value_enum, default_value_t = HeaderMode::Auto)]
    header: HeaderMode,

    /// Regular expression matched against status target URLs
    #[arg(long, global = true, env = "CISTAT_PROVIDER_PATTERN", default_value = cistat_core::domain::TRAVIS_CI_PATTERN)]
    provider_pattern: String,

    /// Remaining API calls at or below which fetching waits for the quota reset
    #[arg(long, global = true, default_value_t = cistat_core::domain::LOW_WATER_MARK)]
    low_water_mark: u32,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cistat=info,cistat_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        github_api_url: cli.github_api_url,
        travis_api_url: cli.travis_api_url,
        github_token_file: cli.github_token_file,
        travis_token_file: cli.travis_token_file,
        input: cli.input,
        output: cli.output,
        header: cli.header,
        provider_pattern: cli.provider_pattern,
        low_water_mark: cli.low_water_mark,
    };
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);

    handle_command(cli.command, &config).await
}
