//! Travis-CI API v3 endpoints

use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder};

use cistat_core::dto::travis::{BuildPage, TravisRepository};

use crate::error::Result;
use crate::{handle_response, normalize_base_url, split_slug};

/// Builds requested per page of build history
pub const BUILDS_PER_PAGE: u32 = 100;

/// Client for the Travis-CI API (version 3)
#[derive(Clone)]
pub struct TravisClient {
    /// Base URL of the API (e.g., "https://api.travis-ci.com")
    base_url: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for TravisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TravisClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl TravisClient {
    /// Create a new Travis-CI client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "https://api.travis-ci.com")
    /// * `token` - API token as printed by `travis token`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    /// Create a new Travis-CI client with a custom HTTP client
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
            .header("Travis-API-Version", "3")
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(USER_AGENT, crate::USER_AGENT)
    }

    /// URL of a repository resource; the slug travels as one path segment
    fn repository_url(&self, slug: &str) -> Result<String> {
        let (owner, name) = split_slug(slug)?;
        Ok(format!("{}/repo/{}%2F{}", self.base_url, owner, name))
    }

    /// Look up a repository by slug
    ///
    /// Fails with `ClientError::NotFound` when Travis-CI does not know it.
    pub async fn repository(&self, slug: &str) -> Result<TravisRepository> {
        let url = self.repository_url(slug)?;
        let response = self.get(&url).send().await?;

        handle_response(response, slug).await
    }

    /// Get one page of a repository's builds, newest first
    ///
    /// # Arguments
    /// * `slug` - Repository slug (`owner/name`)
    /// * `offset` - Number of builds to skip
    pub async fn builds(&self, slug: &str, offset: u32) -> Result<BuildPage> {
        let url = format!("{}/builds", self.repository_url(slug)?);
        let response = self
            .get(&url)
            .query(&[("limit", BUILDS_PER_PAGE), ("offset", offset)])
            .send()
            .await?;

        handle_response(response, slug).await
    }
}
