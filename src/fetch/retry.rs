//! Retry/backoff combinator.
//!
//! [`with_retry`] wraps any fallible async call: it bounds the number of
//! attempts, applies a per-attempt timeout, sleeps on an exponential schedule
//! between attempts, and only retries errors the policy classifies as
//! transient.

use std::future::Future;
use std::time::Duration;

use super::FetchError;

/// Statuses worth another attempt: rate limiting and gateway/server hiccups.
pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Retry/backoff/timeout settings for outbound calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait `backoff_factor * 2^(n-1)` seconds after failed attempt `n`
    pub backoff_factor: f64,
    /// Upper bound on a single backoff wait
    pub max_backoff: Duration,
    /// Timeout applied to each individual attempt
    pub timeout: Duration,
    /// HTTP statuses that are retried
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_factor: 0.5,
            max_backoff: Duration::from_secs(120),
            timeout: Duration::from_secs(15),
            retry_statuses: RETRY_STATUSES.to_vec(),
        }
    }
}

impl RetryPolicy {
    /// Whether an error from a failed attempt should be retried.
    pub fn should_retry(&self, error: &FetchError) -> bool {
        match error {
            FetchError::Status { status, .. } => self.retry_statuses.contains(status),
            FetchError::Timeout | FetchError::Connection(_) => true,
            FetchError::Request(_) | FetchError::Decode(_) => false,
        }
    }

    /// How long to wait after failed attempt number `attempt` (1-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(30) as i32;
        let secs = (self.backoff_factor * 2f64.powi(exponent))
            .max(0.0)
            .min(self.max_backoff.as_secs_f64());
        Duration::from_secs_f64(secs)
    }

    /// Sum of every backoff wait when all attempts fail.
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts.max(1))
            .map(|attempt| self.backoff_delay(attempt))
            .sum()
    }
}

/// Run `operation` until it succeeds, fails terminally, or runs out of attempts.
///
/// `operation` receives the 1-based attempt number. On exhaustion the last
/// observed error is returned.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        let result = match tokio::time::timeout(policy.timeout, operation(attempt)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout),
        };

        match result {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("{} succeeded on attempt {}", label, attempt);
                }
                return Ok(value);
            }
            Err(e) if policy.should_retry(&e) && attempt < max_attempts => {
                let delay = policy.backoff_delay(attempt);
                tracing::warn!(
                    "{} attempt {}/{} failed ({}), retrying in {:?}",
                    label,
                    attempt,
                    max_attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if policy.should_retry(&e) {
                    tracing::warn!("{} failed after {} attempts: {}", label, attempt, e);
                } else {
                    tracing::debug!("{} failed with non-retryable error: {}", label, e);
                }
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.backoff_factor, 0.5);
        assert_eq!(policy.timeout, Duration::from_secs(15));
        assert_eq!(policy.retry_statuses, vec![429, 500, 502, 503, 504]);
    }

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(500));
        assert_eq!(policy.backoff_delay(2), Duration::from_secs(1));
        assert_eq!(policy.backoff_delay(3), Duration::from_secs(2));
        assert_eq!(policy.backoff_delay(4), Duration::from_secs(4));
        assert_eq!(policy.total_backoff(), Duration::from_millis(7500));
    }

    #[test]
    fn test_backoff_is_capped_and_never_negative() {
        let policy = RetryPolicy {
            backoff_factor: 10.0,
            max_backoff: Duration::from_secs(30),
            ..Default::default()
        };
        assert_eq!(policy.backoff_delay(10), Duration::from_secs(30));

        let policy = RetryPolicy {
            backoff_factor: -1.0,
            ..Default::default()
        };
        assert_eq!(policy.backoff_delay(2), Duration::ZERO);
    }

    #[test]
    fn test_classification() {
        let policy = RetryPolicy::default();
        for status in [429, 500, 502, 503, 504] {
            assert!(policy.should_retry(&FetchError::status(status)));
        }
        for status in [400, 401, 403, 404, 501] {
            assert!(!policy.should_retry(&FetchError::status(status)));
        }
        assert!(policy.should_retry(&FetchError::Timeout));
        assert!(policy.should_retry(&FetchError::Connection("reset".into())));
        assert!(!policy.should_retry(&FetchError::Decode("bad json".into())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry(&RetryPolicy::default(), "test", |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err(FetchError::status(503))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error_after_full_backoff() {
        let calls = AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result: Result<(), _> = with_retry(&RetryPolicy::default(), "test", |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            let status = if attempt == 5 { 502 } else { 503 };
            async move { Err(FetchError::status(status)) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert!(start.elapsed() >= Duration::from_millis(7500));
        assert!(matches!(result, Err(FetchError::Status { status: 502, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_fails_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry(&RetryPolicy::default(), "test", |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(FetchError::status(404)) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_attempt_times_out_and_retries() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy {
            max_attempts: 2,
            ..Default::default()
        };

        let result = with_retry(&policy, "test", |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 1 {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }
                Ok(attempt)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
