//! Traits the export pipeline depends on
//!
//! Both traits are implemented by the HTTP clients and by in-memory fakes
//! in tests.

use async_trait::async_trait;
use tracing::debug;

use cistat_core::domain::{RateLimitState, StatusSet};
use cistat_core::dto::travis::{BuildPage, TravisRepository};

use crate::error::{ClientError, Result};
use crate::github::GitHubClient;
use crate::travis::TravisClient;

/// Outcome of a commit-status lookup
///
/// "Not found" is an expected answer for many commits, so it is a value
/// rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusLookup {
    Found(StatusSet),
    NotFound,
}

/// Source of commit statuses and of the quota that gates them
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// Current quota of the status API
    async fn rate_limit(&self) -> Result<RateLimitState>;

    /// Status entries of a commit, newest first
    async fn commit_statuses(&self, repository: &str, sha: &str) -> Result<StatusLookup>;
}

/// Source of repository build histories
#[async_trait]
pub trait BuildHistoryApi: Send + Sync {
    /// Look up a repository; `None` when the service does not know it
    async fn find_repository(&self, slug: &str) -> Result<Option<TravisRepository>>;

    /// One page of builds starting at `offset`
    async fn builds_page(&self, slug: &str, offset: u32) -> Result<BuildPage>;
}

#[async_trait]
impl StatusApi for GitHubClient {
    async fn rate_limit(&self) -> Result<RateLimitState> {
        GitHubClient::rate_limit(self).await
    }

    async fn commit_statuses(&self, repository: &str, sha: &str) -> Result<StatusLookup> {
        match self.statuses(repository, sha).await {
            Ok(set) => Ok(StatusLookup::Found(set)),
            Err(ClientError::NotFound(resource)) => {
                debug!("No statuses for {}", resource);
                Ok(StatusLookup::NotFound)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl BuildHistoryApi for TravisClient {
    async fn find_repository(&self, slug: &str) -> Result<Option<TravisRepository>> {
        match self.repository(slug).await {
            Ok(repo) => Ok(Some(repo)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn builds_page(&self, slug: &str, offset: u32) -> Result<BuildPage> {
        self.builds(slug, offset).await
    }
}
