//! Retrying forwarder for calls into the document-analysis backend.
//!
//! Fixed attempt budget and fixed inter-attempt delay. Failures are
//! classified before an attempt is consumed: transient failures (5xx, 429,
//! timeouts, transport errors) are retried, everything else is surfaced
//! immediately.

use std::time::Duration;

use crate::config::endpoints;
use crate::error::ClientResult;

/// Retry budget and delay for a forwarded call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, first try included.
    pub max_attempts: u32,

    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with an explicit budget and delay.
    #[must_use]
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Policy used when forwarding uploads: 3 attempts, 1000 ms apart.
    #[must_use]
    pub const fn upload() -> Self {
        Self::new(endpoints::UPLOAD_RETRY_ATTEMPTS, endpoints::UPLOAD_RETRY_DELAY)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::upload()
    }
}

/// Run `op` until it succeeds, a non-retryable failure occurs, or the
/// attempt budget is exhausted. Returns the first success or the last
/// failure seen.
pub async fn forward_with_retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                if attempt >= policy.max_attempts {
                    return Err(e);
                }
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %e,
                    "forwarded call failed, retrying"
                );
                attempt += 1;
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::error::ClientError;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt() {
        let calls = AtomicU32::new(0);

        let result = forward_with_retry(fast_policy(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 { Err(ClientError::server(500, "boom")) } else { Ok(n) }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_budget_and_returns_last_failure() {
        let calls = AtomicU32::new(0);

        let result: ClientResult<()> = forward_with_retry(fast_policy(), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Err(ClientError::server(503, format!("attempt {n}"))) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result {
            Err(ClientError::Server { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "attempt 3");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_retryable_fails_fast() {
        let calls = AtomicU32::new(0);

        let result: ClientResult<()> = forward_with_retry(fast_policy(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(ClientError::bad_request("pdf field missing")) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ClientError::BadRequest { .. })));
    }

    #[tokio::test]
    async fn test_first_attempt_success_never_sleeps() {
        let result = forward_with_retry(RetryPolicy::upload(), || async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }
}
