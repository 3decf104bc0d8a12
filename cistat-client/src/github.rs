//! GitHub commit-status endpoints

use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use cistat_core::domain::{RateLimitState, StatusSet};
use cistat_core::dto::github::RateLimitResponse;

use crate::error::Result;
use crate::{handle_response, normalize_base_url, split_slug};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Statuses requested per call; only the first page is read
const STATUSES_PER_PAGE: u32 = 100;

/// Client for the GitHub REST API
///
/// Authenticates every request with a personal access token.
#[derive(Clone)]
pub struct GitHubClient {
    /// Base URL of the API (e.g., "https://api.github.com")
    base_url: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "https://api.github.com")
    /// * `token` - Personal access token
    ///
    /// # Example
    /// ```
    /// use cistat_client::GitHubClient;
    ///
    /// let client = GitHubClient::new("https://api.github.com", "ghp_token");
    /// ```
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new GitHub client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(USER_AGENT, crate::USER_AGENT)
    }

    fn statuses_url(&self, repository: &str, sha: &str) -> Result<String> {
        let (owner, name) = split_slug(repository)?;
        Ok(format!(
            "{}/repos/{}/{}/statuses/{}",
            self.base_url, owner, name, sha
        ))
    }

    // =============================================================================
    // Rate Limit
    // =============================================================================

    /// Get the current quota for the core API
    ///
    /// This call does not count against the quota.
    pub async fn rate_limit(&self) -> Result<RateLimitState> {
        let url = format!("{}/rate_limit", self.base_url);
        let response = self.get(&url).send().await?;

        let body: RateLimitResponse = handle_response(response, "rate_limit").await?;
        let state = body.to_state(Utc::now());
        debug!(
            remaining = state.remaining,
            resets_in_secs = state.resets_in.as_secs(),
            "Fetched rate limit"
        );
        Ok(state)
    }

    // =============================================================================
    // Commit Statuses
    // =============================================================================

    /// List the statuses of a commit, newest first
    ///
    /// # Arguments
    /// * `repository` - Repository slug (`owner/name`)
    /// * `sha` - Commit SHA
    ///
    /// # Returns
    /// The first page of status entries. Fails with `ClientError::NotFound`
    /// when GitHub does not know the repository or commit.
    pub async fn statuses(&self, repository: &str, sha: &str) -> Result<StatusSet> {
        let url = self.statuses_url(repository, sha)?;
        let response = self
            .get(&url)
            .query(&[("per_page", STATUSES_PER_PAGE)])
            .send()
            .await?;

        handle_response(response, &format!("{}@{}", repository, sha)).await
    }
}
