//! Retry utilities with exponential backoff.
//!
//! The approval path retries artifact relocation on transient store failures
//! using the `backon` crate. Relocation is idempotent per identifier (a rename
//! that already happened reports source-missing, handled by the caller), so
//! retrying a half-applied attempt is safe.

use backon::{ExponentialBuilder, Retryable};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not including the initial attempt).
    pub max_retries: u32,
    /// Initial delay before first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub factor: f32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            factor: 2.0,
        }
    }
}

impl RetryConfig {
    /// Config for quick operations (fewer retries, shorter delays).
    #[must_use]
    pub fn quick() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
            factor: 2.0,
        }
    }

    /// Build the exponential backoff strategy.
    fn build_backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries as usize)
            .with_factor(self.factor)
            .with_jitter()
    }
}

/// Retry an async operation that returns `anyhow::Result`.
///
/// Retries only errors matching [`is_transient_error`]; permanent failures
/// (not found, invalid input) surface immediately.
pub async fn retry_anyhow<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    operation: F,
) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let name = operation_name.to_string();
    let backoff = config.build_backoff();
    let max_retries = config.max_retries;

    let mut attempt = 0u32;
    let notify = |err: &anyhow::Error, dur: Duration| {
        attempt += 1;
        warn!(
            operation = %name,
            attempt = attempt,
            max_retries = max_retries,
            next_delay_ms = dur.as_millis() as u64,
            error = %err,
            "Operation failed, will retry"
        );
    };

    operation
        .retry(backoff)
        .when(is_transient_error)
        .notify(notify)
        .await
}

/// Determine if an error is transient and worth retrying.
///
/// Returns `true` for connection failures, timeouts, temporary I/O errors,
/// and store lock contention.
pub fn is_transient_error(error: &anyhow::Error) -> bool {
    let msg = error.to_string().to_lowercase();

    if msg.contains("connection refused")
        || msg.contains("connection reset")
        || msg.contains("broken pipe")
        || msg.contains("network unreachable")
    {
        return true;
    }

    if msg.contains("timed out") || msg.contains("timeout") || msg.contains("deadline exceeded") {
        return true;
    }

    if msg.contains("resource temporarily unavailable")
        || msg.contains("try again")
        || msg.contains("interrupted")
        || msg.contains("would block")
    {
        return true;
    }

    // Embedded database lock contention
    if msg.contains("database is locked") || msg.contains("busy") {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn transient_errors_detected() {
        assert!(is_transient_error(&anyhow::anyhow!("operation timed out")));
        assert!(is_transient_error(&anyhow::anyhow!("connection refused")));
        assert!(is_transient_error(&anyhow::anyhow!("database is locked")));
        assert!(!is_transient_error(&anyhow::anyhow!("file not found")));
    }

    #[tokio::test]
    async fn retries_transient_then_succeeds() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: anyhow::Result<u32> =
            retry_anyhow(&RetryConfig::quick(), "test operation", || {
                let c = counter_clone.clone();
                async move {
                    let attempt = c.fetch_add(1, Ordering::SeqCst);
                    if attempt < 1 {
                        Err(anyhow::anyhow!("connection reset"))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn permanent_error_not_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result: anyhow::Result<u32> =
            retry_anyhow(&RetryConfig::quick(), "test operation", || {
                let c = counter_clone.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err(anyhow::anyhow!("object does not exist"))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
