//! Commit domain types

use serde::{Deserialize, Serialize};

/// A commit of a repository
///
/// Identity is the `(repository, sha)` pair; the same SHA in two
/// repositories is two different commits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commit {
    /// Repository slug (e.g., "rust-lang/rust")
    pub repository: String,
    /// Full commit SHA
    pub sha: String,
}

impl Commit {
    pub fn new(repository: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            sha: sha.into(),
        }
    }
}

impl std::fmt::Display for Commit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.repository, self.sha)
    }
}

/// State carried by a single status entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    Success,
    Failure,
    Pending,
    Error,
}

impl CommitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitState::Success => "success",
            CommitState::Failure => "failure",
            CommitState::Pending => "pending",
            CommitState::Error => "error",
        }
    }
}

impl std::fmt::Display for CommitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved status of a commit for one CI provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    /// The most recent provider entry reported this state
    State(CommitState),

    /// The status API has no record of the commit
    NotFound,

    /// The commit has statuses, but none from the provider
    Unaccounted,
}

impl CommitStatus {
    /// Label written to the status column of the output CSV
    pub fn label(&self) -> &'static str {
        match self {
            CommitStatus::State(state) => state.as_str(),
            CommitStatus::NotFound => "not_found",
            CommitStatus::Unaccounted => "",
        }
    }
}

impl From<Option<CommitState>> for CommitStatus {
    fn from(state: Option<CommitState>) -> Self {
        state.map_or(CommitStatus::Unaccounted, CommitStatus::State)
    }
}

/// A commit taken from a repository's build history, with the state of
/// the first build seen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    pub commit: Commit,
    /// Build state as reported by the CI provider (e.g., "passed", "errored")
    pub state: String,
}
