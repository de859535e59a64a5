//! High-level `LinkCache` wrapper over backend implementations.
//!
//! Beyond dispatching to the backend, the wrapper enforces the cache's
//! availability contract: a dead or unreachable cache behaves as an
//! always-miss cache. Reads fall through to `None`, writes and counter bumps
//! are logged and dropped, and the workflow carries on at re-signing cost.

use super::backend::CacheBackend;
use super::memory::MemoryCacheBackend;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::constants::LINK_KEY_PREFIX;

/// High-level link cache interface.
///
/// `LinkCache` is `Clone` and can be shared across requests; the backend
/// handles concurrent access.
#[derive(Clone)]
pub struct LinkCache {
    backend: Arc<dyn CacheBackend>,
}

impl LinkCache {
    /// Creates a `LinkCache` backed by an in-process map.
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(MemoryCacheBackend::new()),
        }
    }

    /// Creates a `LinkCache` with a custom backend (Redis, memcached, etc.).
    pub fn custom<B: CacheBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Looks up a memoized signed URL for a storage key.
    ///
    /// Returns `None` on miss, expiry, or cache failure; never errors.
    pub async fn get_url(&self, storage_key: &str) -> Option<String> {
        match self.backend.get(&link_key(storage_key)).await {
            Ok(hit) => hit,
            Err(err) => {
                warn!(storage_key, error = %err, "Link cache read failed, treating as miss");
                None
            },
        }
    }

    /// Memoizes a signed URL under its storage key.
    ///
    /// `ttl` must not exceed the URL's signing validity window; the workflow
    /// passes the shared validity value for both. Failures are logged and
    /// dropped.
    pub async fn put_url(&self, storage_key: &str, url: &str, ttl: Duration) {
        if let Err(err) = self
            .backend
            .set(&link_key(storage_key), url.to_string(), ttl)
            .await
        {
            warn!(storage_key, error = %err, "Link cache write failed, skipping memoization");
        }
    }

    /// Atomically increments a named counter, returning the new value.
    ///
    /// On cache failure the increment is lost and 0 is returned; counters are
    /// observability-only and never gate correctness.
    pub async fn bump(&self, name: &str, delta: i64) -> i64 {
        match self.backend.increment(name, delta).await {
            Ok(value) => value,
            Err(err) => {
                warn!(counter = name, error = %err, "Counter increment failed");
                0
            },
        }
    }

    /// Reads a named counter; absent counters and cache failures read as 0.
    pub async fn counter(&self, name: &str) -> i64 {
        match self.backend.counter(name).await {
            Ok(value) => value,
            Err(err) => {
                warn!(counter = name, error = %err, "Counter read failed");
                0
            },
        }
    }

    /// Discards all cached links and counters.
    ///
    /// Unlike the workflow paths, purge surfaces backend failures: the
    /// operator invoking it needs to know the flush did not happen.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable.
    pub async fn purge_all(&self) -> Result<()> {
        self.backend.purge_all().await
    }
}

/// Namespaced cache key for a signed link.
fn link_key(storage_key: &str) -> String {
    format!("{LINK_KEY_PREFIX}{storage_key}")
}
