//! Service layer
//!
//! The pieces of the export pipeline. Each service takes its remote API as
//! an injected trait object so the pipeline can run against in-memory
//! fakes in tests.

mod enumerator;
mod fetcher;
mod join;
mod rate_limiter;
mod writer;

#[cfg(test)]
pub mod fakes;

pub use enumerator::CommitCursor;
pub use fetcher::StatusFetcher;
pub use join::join_statuses;
pub use writer::StatusWriter;
