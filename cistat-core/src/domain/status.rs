//! Status entries reported against a commit

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::commit::{CommitState, CommitStatus};

/// Fragment of the public Travis-CI URL that its status entries link to
pub const TRAVIS_CI_PATTERN: &str = r"travis-ci\.org";

/// One status report attached to a commit by a CI provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub state: CommitState,

    /// Link back to the build that produced this entry
    #[serde(default)]
    pub target_url: Option<String>,

    #[serde(default)]
    pub context: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StatusEntry {
    pub fn new(state: CommitState, target_url: impl Into<String>) -> Self {
        Self {
            state,
            target_url: Some(target_url.into()),
            context: None,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Matches the `target_url` of entries that belong to one CI provider
#[derive(Debug, Clone)]
pub struct ProviderPattern(Regex);

impl ProviderPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self)
    }

    /// Pattern for entries posted by Travis-CI
    pub fn travis_ci() -> Self {
        Self(Regex::new(TRAVIS_CI_PATTERN).expect("built-in pattern is valid"))
    }

    /// Entries without a `target_url` never match
    pub fn matches(&self, entry: &StatusEntry) -> bool {
        entry
            .target_url
            .as_deref()
            .is_some_and(|url| self.0.is_match(url))
    }
}

impl Default for ProviderPattern {
    fn default() -> Self {
        Self::travis_ci()
    }
}

/// All status entries of a commit, in the order the API returned them
///
/// The status API lists entries newest first; this type keeps that order
/// and does not re-sort by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusSet(Vec<StatusEntry>);

impl StatusSet {
    pub fn new(entries: Vec<StatusEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.0
    }

    /// Entries posted by the given provider
    pub fn provider_statuses<'a, 'p>(
        &'a self,
        provider: &'p ProviderPattern,
    ) -> impl Iterator<Item = &'a StatusEntry> + use<'a, 'p> {
        self.0.iter().filter(move |entry| provider.matches(entry))
    }

    /// First provider entry, taken as the most recent one
    pub fn most_recent(&self, provider: &ProviderPattern) -> Option<&StatusEntry> {
        self.0.iter().find(|entry| provider.matches(entry))
    }

    pub fn state(&self, provider: &ProviderPattern) -> Option<CommitState> {
        self.most_recent(provider).map(|entry| entry.state)
    }

    /// Resolve to a commit status; no provider entry means unaccounted
    pub fn resolve(&self, provider: &ProviderPattern) -> CommitStatus {
        self.state(provider).into()
    }
}

impl From<Vec<StatusEntry>> for StatusSet {
    fn from(entries: Vec<StatusEntry>) -> Self {
        Self(entries)
    }
}
