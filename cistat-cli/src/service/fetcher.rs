//! Commit status fetching

use std::sync::Arc;

use cistat_client::{Result, StatusApi, StatusLookup};
use cistat_core::domain::{CommitStatus, ProviderPattern};
use tracing::debug;

use super::rate_limiter::RateLimiter;

/// Resolves the provider status of one commit at a time
pub struct StatusFetcher {
    api: Arc<dyn StatusApi>,
    limiter: RateLimiter,
    provider: ProviderPattern,
}

impl StatusFetcher {
    pub fn new(api: Arc<dyn StatusApi>, provider: ProviderPattern, low_water_mark: u32) -> Self {
        let limiter = RateLimiter::new(Arc::clone(&api), low_water_mark);
        Self {
            api,
            limiter,
            provider,
        }
    }

    /// Fetch the status of a commit
    ///
    /// Checks the quota first, then makes one status request. The first
    /// entry matching the provider decides the state; a commit the API does
    /// not know resolves to `NotFound` and one without provider entries to
    /// `Unaccounted`.
    pub async fn fetch_status(&self, repository: &str, sha: &str) -> Result<CommitStatus> {
        self.limiter.ensure_quota().await?;

        let status = match self.api.commit_statuses(repository, sha).await? {
            StatusLookup::Found(set) => set.resolve(&self.provider),
            StatusLookup::NotFound => CommitStatus::NotFound,
        };

        debug!("{}@{} -> {:?}", repository, sha, status);
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fakes::FakeStatusApi;
    use cistat_client::ClientError;
    use cistat_core::domain::{CommitState, LOW_WATER_MARK, StatusEntry};

    const TRAVIS_URL: &str = "https://travis-ci.org/org/repo/builds/1";
    const OTHER_URL: &str = "https://circleci.com/gh/org/repo/1";

    fn fetcher(api: Arc<FakeStatusApi>) -> StatusFetcher {
        StatusFetcher::new(api, ProviderPattern::travis_ci(), LOW_WATER_MARK)
    }

    #[tokio::test]
    async fn test_first_provider_entry_decides() {
        let api = Arc::new(FakeStatusApi::new().with_statuses(
            "org/repo",
            "abc123",
            vec![
                StatusEntry::new(CommitState::Pending, OTHER_URL),
                StatusEntry::new(CommitState::Success, TRAVIS_URL),
                StatusEntry::new(CommitState::Failure, TRAVIS_URL),
            ],
        ));

        let status = fetcher(api).fetch_status("org/repo", "abc123").await.unwrap();
        assert_eq!(status, CommitStatus::State(CommitState::Success));
    }

    #[tokio::test]
    async fn test_no_provider_entry_is_unaccounted() {
        let api = Arc::new(FakeStatusApi::new().with_statuses(
            "org/repo",
            "abc123",
            vec![StatusEntry::new(CommitState::Success, OTHER_URL)],
        ));

        let status = fetcher(api).fetch_status("org/repo", "abc123").await.unwrap();
        assert_eq!(status, CommitStatus::Unaccounted);
    }

    #[tokio::test]
    async fn test_unknown_commit_is_not_found() {
        let api = Arc::new(FakeStatusApi::new());

        let status = fetcher(api).fetch_status("org/repo", "deadbeef").await.unwrap();
        assert_eq!(status, CommitStatus::NotFound);
    }

    #[tokio::test]
    async fn test_checks_quota_before_each_fetch() {
        let api = Arc::new(FakeStatusApi::new());
        let fetcher = fetcher(Arc::clone(&api));

        fetcher.fetch_status("org/repo", "a").await.unwrap();
        fetcher.fetch_status("org/repo", "b").await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                "rate_limit",
                "statuses org/repo a",
                "rate_limit",
                "statuses org/repo b"
            ]
        );
    }

    #[tokio::test]
    async fn test_quota_failure_aborts_the_fetch() {
        let api = Arc::new(
            FakeStatusApi::new().with_rate_limit_error(ClientError::api_error(500, "boom")),
        );

        let result = fetcher(Arc::clone(&api)).fetch_status("org/repo", "abc123").await;
        assert!(result.is_err());
        assert_eq!(api.calls(), vec!["rate_limit"]);
    }
}
