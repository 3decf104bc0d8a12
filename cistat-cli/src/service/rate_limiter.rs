//! Quota guard for the status API

use std::sync::Arc;
use std::time::Duration;

use cistat_client::{Result, StatusApi};
use tracing::{debug, warn};

/// Blocks until the quota window resets whenever the remaining quota is low
pub struct RateLimiter {
    api: Arc<dyn StatusApi>,
    low_water_mark: u32,
}

impl RateLimiter {
    pub fn new(api: Arc<dyn StatusApi>, low_water_mark: u32) -> Self {
        Self {
            api,
            low_water_mark,
        }
    }

    /// Make sure there is quota left for the next request
    ///
    /// Queries the quota and, when `remaining <= low_water_mark`, sleeps for
    /// the time left until the window resets. Returns how long it slept. A
    /// failed quota query is returned as an error without sleeping.
    pub async fn ensure_quota(&self) -> Result<Duration> {
        let limit = self.api.rate_limit().await?;

        if !limit.is_low(self.low_water_mark) {
            debug!(remaining = limit.remaining, "Quota available");
            return Ok(Duration::ZERO);
        }

        warn!(
            remaining = limit.remaining,
            "Rate limit low. Blocking for {} seconds...",
            limit.resets_in.as_secs()
        );
        tokio::time::sleep(limit.resets_in).await;

        Ok(limit.resets_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fakes::FakeStatusApi;
    use cistat_client::ClientError;
    use cistat_core::domain::LOW_WATER_MARK;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_blocks_until_reset_when_quota_is_low() {
        let api = Arc::new(FakeStatusApi::new().with_rate_limit(5, 30));
        let limiter = RateLimiter::new(api, LOW_WATER_MARK);

        let start = Instant::now();
        let waited = limiter.ensure_quota().await.unwrap();

        assert_eq!(waited, Duration::from_secs(30));
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_does_not_block_with_plenty_of_quota() {
        let api = Arc::new(FakeStatusApi::new().with_rate_limit(50, 30));
        let limiter = RateLimiter::new(api, LOW_WATER_MARK);

        let start = Instant::now();
        let waited = limiter.ensure_quota().await.unwrap();

        assert_eq!(waited, Duration::ZERO);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocks_at_exactly_the_low_water_mark() {
        let api = Arc::new(FakeStatusApi::new().with_rate_limit(10, 7));
        let limiter = RateLimiter::new(api, LOW_WATER_MARK);

        assert_eq!(limiter.ensure_quota().await.unwrap(), Duration::from_secs(7));
    }

    #[tokio::test]
    async fn test_quota_query_failure_propagates() {
        let api = Arc::new(
            FakeStatusApi::new().with_rate_limit_error(ClientError::from_status(
                401,
                "rate limit",
                "Bad credentials",
            )),
        );
        let limiter = RateLimiter::new(api, LOW_WATER_MARK);

        let err = limiter.ensure_quota().await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized { status: 401, .. }));
    }
}
