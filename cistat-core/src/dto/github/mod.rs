//! GitHub REST API DTOs

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::rate_limit::RateLimitState;

/// Response of `GET /rate_limit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResponse {
    pub resources: RateLimitResources,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResources {
    /// Quota for the core REST endpoints, which includes commit statuses
    pub core: RateLimitWindow,
}

/// Quota accounting for one rate-limit window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitWindow {
    pub limit: u32,
    pub remaining: u32,
    /// UNIX timestamp (seconds) at which the window resets
    pub reset: i64,
    #[serde(default)]
    pub used: u32,
}

impl RateLimitWindow {
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.reset, 0).single()
    }

    /// Snapshot relative to `now`; an unrepresentable reset time means no wait
    pub fn to_state(&self, now: DateTime<Utc>) -> RateLimitState {
        let reset_at = self.reset_at().unwrap_or(now);
        RateLimitState::from_reset_at(self.remaining, reset_at, now)
    }
}

impl RateLimitResponse {
    pub fn to_state(&self, now: DateTime<Utc>) -> RateLimitState {
        self.resources.core.to_state(now)
    }
}
