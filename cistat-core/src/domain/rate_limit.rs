//! API quota state

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Remaining calls at or below which fetching waits for the window to reset
pub const LOW_WATER_MARK: u32 = 10;

/// Snapshot of the API quota
///
/// Re-queried before every fetch and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitState {
    /// Calls left in the current window
    pub remaining: u32,
    /// Time until the window resets
    pub resets_in: Duration,
}

impl RateLimitState {
    pub fn new(remaining: u32, resets_in: Duration) -> Self {
        Self {
            remaining,
            resets_in,
        }
    }

    /// Build a snapshot from an absolute reset time
    ///
    /// A reset time already in the past yields a zero wait.
    pub fn from_reset_at(remaining: u32, reset_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let resets_in = (reset_at - now).to_std().unwrap_or(Duration::ZERO);
        Self::new(remaining, resets_in)
    }

    pub fn is_low(&self, low_water_mark: u32) -> bool {
        self.remaining <= low_water_mark
    }
}
