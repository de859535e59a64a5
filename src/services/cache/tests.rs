//! Tests for the link cache wrapper, including its degrade-to-miss contract.

use super::*;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::time::Duration;

/// Backend that fails every operation, standing in for an unreachable cache.
struct DownCacheBackend;

#[async_trait]
impl CacheBackend for DownCacheBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        bail!("connection refused")
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<()> {
        bail!("connection refused")
    }

    async fn increment(&self, _name: &str, _delta: i64) -> Result<i64> {
        bail!("connection refused")
    }

    async fn counter(&self, _name: &str) -> Result<i64> {
        bail!("connection refused")
    }

    async fn purge_all(&self) -> Result<()> {
        bail!("connection refused")
    }
}

#[tokio::test]
async fn url_roundtrip_through_wrapper() {
    let cache = LinkCache::memory();
    cache
        .put_url("processed/inv-1.pdf", "https://signed", Duration::from_secs(60))
        .await;
    assert_eq!(
        cache.get_url("processed/inv-1.pdf").await,
        Some("https://signed".to_string())
    );
    // Different storage key, different cache slot
    assert_eq!(cache.get_url("approved/inv-1.pdf").await, None);
}

#[tokio::test]
async fn expired_url_is_a_miss() {
    let cache = LinkCache::memory();
    cache
        .put_url("processed/inv-1.pdf", "https://signed", Duration::from_millis(10))
        .await;

    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(cache.get_url("processed/inv-1.pdf").await, None);
}

#[tokio::test]
async fn counters_bump_and_read() {
    let cache = LinkCache::memory();
    assert_eq!(cache.bump("views", 1).await, 1);
    assert_eq!(cache.bump("views", 1).await, 2);
    assert_eq!(cache.counter("views").await, 2);
    assert_eq!(cache.counter("approvals").await, 0);
}

#[tokio::test]
async fn purge_then_miss() {
    let cache = LinkCache::memory();
    cache
        .put_url("processed/inv-1.pdf", "https://signed", Duration::from_secs(60))
        .await;
    cache.bump("views", 3).await;

    cache.purge_all().await.unwrap();

    assert_eq!(cache.get_url("processed/inv-1.pdf").await, None);
    assert_eq!(cache.counter("views").await, 0);
}

#[tokio::test]
async fn unreachable_cache_degrades_to_miss() {
    let cache = LinkCache::custom(DownCacheBackend);

    // Reads miss, writes drop, counters read 0; nothing errors.
    assert_eq!(cache.get_url("processed/inv-1.pdf").await, None);
    cache
        .put_url("processed/inv-1.pdf", "https://signed", Duration::from_secs(60))
        .await;
    assert_eq!(cache.bump("views", 1).await, 0);
    assert_eq!(cache.counter("views").await, 0);

    // Purge is the one operation that must report the failure.
    assert!(cache.purge_all().await.is_err());
}
