//! Build-history enumeration

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use cistat_client::{BuildHistoryApi, Result};
use cistat_core::domain::{BuildRecord, Commit};
use cistat_core::dto::travis::TravisBuild;
use tracing::debug;

/// Walks a repository's build history one commit at a time
///
/// Pages are fetched on demand, in API order. Each commit SHA is yielded
/// once, with the state of the first build seen for it. A cursor cannot be
/// rewound; open a new one to start over.
pub struct CommitCursor {
    api: Arc<dyn BuildHistoryApi>,
    slug: String,
    seen: HashSet<String>,
    buffer: VecDeque<TravisBuild>,
    offset: u32,
    exhausted: bool,
}

impl CommitCursor {
    /// Open a cursor over a repository's builds
    ///
    /// Returns `None` when the repository does not exist on the CI service.
    pub async fn open(api: Arc<dyn BuildHistoryApi>, slug: &str) -> Result<Option<Self>> {
        if api.find_repository(slug).await?.is_none() {
            return Ok(None);
        }

        Ok(Some(Self {
            api,
            slug: slug.to_string(),
            seen: HashSet::new(),
            buffer: VecDeque::new(),
            offset: 0,
            exhausted: false,
        }))
    }

    pub fn repository(&self) -> &str {
        &self.slug
    }

    /// Next commit not yielded before, or `None` at the end of the history
    pub async fn next_commit(&mut self) -> Result<Option<BuildRecord>> {
        loop {
            if let Some(build) = self.buffer.pop_front() {
                let Some(commit) = build.commit else {
                    debug!("Build {} of {} has no commit", build.id, self.slug);
                    continue;
                };

                if !self.seen.insert(commit.sha.clone()) {
                    continue;
                }

                return Ok(Some(BuildRecord {
                    commit: Commit::new(self.slug.as_str(), commit.sha),
                    state: build.state,
                }));
            }

            if self.exhausted {
                return Ok(None);
            }

            let page = self.api.builds_page(&self.slug, self.offset).await?;
            debug!(
                "Fetched {} build(s) of {} at offset {}",
                page.builds.len(),
                self.slug,
                self.offset
            );

            self.offset += page.builds.len() as u32;
            self.exhausted = page.pagination.is_last || page.builds.is_empty();
            self.buffer.extend(page.builds);
        }
    }
}
