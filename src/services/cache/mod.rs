//! Link cache service with pluggable backends.
//!
//! Memoizes expensive signed-URL generation and holds the `views` /
//! `approvals` counters, all with per-key expiry. The cache is volatile by
//! contract: losing it only costs re-signing work, never correctness, so the
//! [`LinkCache`] wrapper degrades every failure to a miss instead of
//! propagating it.
//!
//! # Example
//!
//! ```ignore
//! use reviewd::services::cache::LinkCache;
//! use std::time::Duration;
//!
//! let cache = LinkCache::memory();
//! cache.put_url("processed/inv-1.pdf", "https://…", Duration::from_secs(3600)).await;
//! let hit = cache.get_url("processed/inv-1.pdf").await;
//! ```

mod backend;
mod memory;
mod store;

#[cfg(test)]
mod tests;

pub use backend::CacheBackend;
pub use memory::MemoryCacheBackend;
pub use store::LinkCache;
