//! Configuration module
//!
//! Settings shared by every export command: API endpoints, token files,
//! input/output paths and the status-matching rules.

use std::path::PathBuf;

use anyhow::Context;
use cistat_core::domain::{LOW_WATER_MARK, ProviderPattern, TRAVIS_CI_PATTERN};

use crate::input::HeaderMode;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TRAVIS_API_URL: &str = "https://api.travis-ci.com";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the GitHub REST API
    pub github_api_url: String,

    /// Base URL of the Travis-CI API
    pub travis_api_url: String,

    /// File holding the GitHub access token
    pub github_token_file: PathBuf,

    /// File holding the Travis-CI token
    pub travis_token_file: PathBuf,

    /// CSV of repositories or `repository, sha` pairs to process
    pub input: PathBuf,

    /// CSV the results are written to (truncated on open)
    pub output: PathBuf,

    /// Whether the input CSV starts with a header row
    pub header: HeaderMode,

    /// Regular expression selecting the CI provider's status entries
    pub provider_pattern: String,

    /// Remaining-call count at or below which fetching waits for a reset
    pub low_water_mark: u32,
}

impl Config {
    /// Compile the provider pattern
    pub fn provider(&self) -> anyhow::Result<ProviderPattern> {
        ProviderPattern::new(&self.provider_pattern)
            .with_context(|| format!("Invalid provider pattern '{}'", self.provider_pattern))
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("github_api_url", &self.github_api_url),
            ("travis_api_url", &self.travis_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.input.as_os_str().is_empty() {
            anyhow::bail!("input path cannot be empty");
        }

        if self.output.as_os_str().is_empty() {
            anyhow::bail!("output path cannot be empty");
        }

        self.provider()?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            travis_api_url: DEFAULT_TRAVIS_API_URL.to_string(),
            github_token_file: PathBuf::from("gh-access-token"),
            travis_token_file: PathBuf::from("travis-token"),
            input: PathBuf::from("commits.csv"),
            output: PathBuf::from("commit-status.csv"),
            header: HeaderMode::Auto,
            provider_pattern: TRAVIS_CI_PATTERN.to_string(),
            low_water_mark: LOW_WATER_MARK,
        }
    }
}
