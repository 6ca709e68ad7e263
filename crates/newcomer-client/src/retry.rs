//! Back-off policy for idempotent directory API calls.
//!
//! Only reads go through [`RetryPolicy::run`]. Transient failures (network
//! errors, 429, 5xx) are retried; everything else is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// 404 and other 4xx statuses, malformed bodies, and a bad base URL would
/// produce the same answer again.
pub(crate) fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ClientError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        ClientError::NotFound { .. }
        | ClientError::InvalidBaseUrl { .. }
        | ClientError::Deserialize { .. } => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    /// Nominal sleep before retry number `retry` (1-based): the base doubled
    /// per retry, capped at [`MAX_DELAY`]. Jitter is applied by the caller.
    pub(crate) fn nominal_delay(&self, retry: u32) -> Duration {
        let factor = 1u64 << retry.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor)).min(MAX_DELAY)
    }

    /// Spreads `delay` over ±25 % so parallel callers do not retry in step.
    fn jittered(delay: Duration) -> Duration {
        delay.mul_f64(rand::random_range(0.75..=1.25))
    }

    /// Runs `operation`, retrying transient failures per this policy.
    pub(crate) async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut retries = 0u32;
        let mut outcome = operation().await;
        while let Err(err) = &outcome {
            if retries == self.max_retries || !is_retriable(err) {
                break;
            }
            retries += 1;
            let delay = Self::jittered(self.nominal_delay(retries));
            tracing::warn!(
                retry = retries,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "transient directory API error, backing off"
            );
            tokio::time::sleep(delay).await;
            outcome = operation().await;
        }
        outcome
    }
}
