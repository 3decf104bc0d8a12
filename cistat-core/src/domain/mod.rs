//! Core domain types
//!
//! These types describe what the exporters read and write: commits, the
//! status reports attached to them, and the API quota that gates fetching.

pub mod commit;
pub mod rate_limit;
pub mod status;

pub use commit::{BuildRecord, Commit, CommitState, CommitStatus};
pub use rate_limit::{LOW_WATER_MARK, RateLimitState};
pub use status::{ProviderPattern, StatusEntry, StatusSet, TRAVIS_CI_PATTERN};
