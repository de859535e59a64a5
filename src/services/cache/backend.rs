//! Backend trait for the link cache.
//!
//! Defines the interface that all cache backends must implement, enabling
//! pluggable storage (in-process map, Redis, memcached, etc.).

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Backend trait for the link cache.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// Implementations serialize `increment` themselves; callers rely on it being
/// atomic under concurrent use.
#[async_trait]
pub trait CacheBackend: Send + Sync + 'static {
    /// Retrieves a cached value by key.
    ///
    /// Returns `Ok(None)` if the key doesn't exist or has expired. A value
    /// must never be returned past its TTL; implementations remove expired
    /// entries lazily on access.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unreachable.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value, overwriting any existing entry and (re)starting the
    /// expiry window.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unreachable.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Atomically adds `delta` to a named counter and returns the new value.
    ///
    /// The counter is created at zero on first increment and never expires.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unreachable.
    async fn increment(&self, name: &str, delta: i64) -> Result<i64>;

    /// Reads a named counter without modifying it. Absent counters read as 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unreachable.
    async fn counter(&self, name: &str) -> Result<i64>;

    /// Discards all cached values and all counters unconditionally.
    ///
    /// Administrative operation for recovery after a signing-policy change;
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store is unreachable.
    async fn purge_all(&self) -> Result<()>;
}
