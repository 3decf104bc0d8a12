//! In-memory fakes for the remote API traits (testing only)

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cistat_client::{BuildHistoryApi, ClientError, Result, StatusApi, StatusLookup};
use cistat_core::domain::{RateLimitState, StatusEntry, StatusSet};
use cistat_core::dto::travis::{BuildPage, Pagination, TravisBuild, TravisCommit, TravisRepository};

// ---------------------------------------------------------------------------
// FakeStatusApi
// ---------------------------------------------------------------------------

/// Status API answering from a map keyed by `(repository, sha)`
///
/// Unknown commits answer `NotFound`. Rate-limit answers are served from a
/// queue; once it is empty a generous quota is reported.
#[derive(Debug, Default)]
pub struct FakeStatusApi {
    statuses: HashMap<(String, String), Vec<StatusEntry>>,
    rate_limits: Mutex<VecDeque<Result<RateLimitState>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeStatusApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(mut self, repository: &str, sha: &str, entries: Vec<StatusEntry>) -> Self {
        self.statuses
            .insert((repository.to_string(), sha.to_string()), entries);
        self
    }

    pub fn with_rate_limit(self, remaining: u32, resets_in_secs: u64) -> Self {
        self.rate_limits.lock().unwrap().push_back(Ok(RateLimitState::new(
            remaining,
            Duration::from_secs(resets_in_secs),
        )));
        self
    }

    pub fn with_rate_limit_error(self, error: ClientError) -> Self {
        self.rate_limits.lock().unwrap().push_back(Err(error));
        self
    }

    /// Calls made so far, as `rate_limit` or `statuses repo sha`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusApi for FakeStatusApi {
    async fn rate_limit(&self) -> Result<RateLimitState> {
        self.calls.lock().unwrap().push("rate_limit".to_string());
        self.rate_limits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RateLimitState::new(5000, Duration::from_secs(3600))))
    }

    async fn commit_statuses(&self, repository: &str, sha: &str) -> Result<StatusLookup> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("statuses {} {}", repository, sha));
        Ok(self
            .statuses
            .get(&(repository.to_string(), sha.to_string()))
            .map_or(StatusLookup::NotFound, |entries| {
                StatusLookup::Found(StatusSet::new(entries.clone()))
            }))
    }
}

// ---------------------------------------------------------------------------
// FakeBuildHistory
// ---------------------------------------------------------------------------

/// Build-history API serving fixed builds in pages of `page_size`
#[derive(Debug)]
pub struct FakeBuildHistory {
    builds: HashMap<String, Vec<(String, String)>>,
    failing: HashSet<String>,
    page_size: usize,
    page_requests: Mutex<Vec<(String, u32)>>,
}

impl FakeBuildHistory {
    pub fn new(page_size: usize) -> Self {
        Self {
            builds: HashMap::new(),
            failing: HashSet::new(),
            page_size,
            page_requests: Mutex::new(Vec::new()),
        }
    }

    /// Register a repository with `(sha, state)` builds, newest first
    pub fn with_repository(mut self, slug: &str, builds: &[(&str, &str)]) -> Self {
        self.builds.insert(
            slug.to_string(),
            builds
                .iter()
                .map(|(sha, state)| (sha.to_string(), state.to_string()))
                .collect(),
        );
        self
    }

    /// Register a repository whose build listing fails with a server error
    pub fn with_failing_repository(mut self, slug: &str) -> Self {
        self.builds.insert(slug.to_string(), Vec::new());
        self.failing.insert(slug.to_string());
        self
    }

    pub fn page_requests(&self) -> Vec<(String, u32)> {
        self.page_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BuildHistoryApi for FakeBuildHistory {
    async fn find_repository(&self, slug: &str) -> Result<Option<TravisRepository>> {
        Ok(self.builds.contains_key(slug).then(|| TravisRepository {
            id: 1,
            slug: slug.to_string(),
            name: slug.split('/').nth(1).map(str::to_string),
            active: Some(true),
        }))
    }

    async fn builds_page(&self, slug: &str, offset: u32) -> Result<BuildPage> {
        self.page_requests
            .lock()
            .unwrap()
            .push((slug.to_string(), offset));

        if self.failing.contains(slug) {
            return Err(ClientError::api_error(500, "Internal Server Error"));
        }

        let all = self
            .builds
            .get(slug)
            .ok_or_else(|| ClientError::NotFound(slug.to_string()))?;
        let start = (offset as usize).min(all.len());
        let end = (start + self.page_size).min(all.len());

        let builds = all[start..end]
            .iter()
            .enumerate()
            .map(|(i, (sha, state))| TravisBuild {
                id: (start + i) as u64,
                number: None,
                state: state.clone(),
                commit: Some(TravisCommit {
                    sha: sha.clone(),
                    git_ref: None,
                }),
            })
            .collect();

        Ok(BuildPage {
            builds,
            pagination: Pagination {
                limit: self.page_size as u32,
                offset,
                count: all.len() as u32,
                is_last: end == all.len(),
            },
        })
    }
}
