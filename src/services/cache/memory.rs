//! In-memory link cache backend.
//!
//! Fast, non-persistent cache using DashMap for concurrent access. Suits
//! single-process deployments and tests; a shared deployment would implement
//! [`CacheBackend`] over Redis instead.

use super::backend::CacheBackend;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Cached value with its expiry deadline.
#[derive(Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache backend using DashMap.
///
/// Cached links live in one map with lazy expiry; counters live in a second
/// map with no expiry. Per-key atomicity of `increment` comes from DashMap's
/// shard locking.
#[derive(Clone, Default)]
pub struct MemoryCacheBackend {
    links: DashMap<String, CacheEntry>,
    counters: DashMap<String, i64>,
}

impl MemoryCacheBackend {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(entry) = self.links.get(key) {
            if entry.is_expired() {
                drop(entry);
                self.links.remove(key);
                Ok(None)
            } else {
                Ok(Some(entry.value.clone()))
            }
        } else {
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.links.insert(key.to_string(), CacheEntry::new(value, ttl));
        Ok(())
    }

    async fn increment(&self, name: &str, delta: i64) -> Result<i64> {
        let mut entry = self.counters.entry(name.to_string()).or_insert(0);
        *entry += delta;
        Ok(*entry)
    }

    async fn counter(&self, name: &str) -> Result<i64> {
        Ok(self.counters.get(name).map_or(0, |v| *v))
    }

    async fn purge_all(&self) -> Result<()> {
        self.links.clear();
        self.counters.clear();
        Ok(())
    }
}
