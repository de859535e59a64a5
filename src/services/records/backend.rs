//! Backend trait for the record store.

use super::types::{Record, ReviewState};
use anyhow::Result;
use async_trait::async_trait;

/// Backend trait for record storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// Writes are full-document overwrites with last-writer-wins semantics; no
/// backend offers optimistic concurrency or multi-document transactions, and
/// callers must not assume them.
#[async_trait]
pub trait RecordBackend: Send + Sync + 'static {
    /// Retrieves a record by its identifier.
    ///
    /// Returns `Ok(None)` if no record exists under `blob_name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn get(&self, blob_name: &str) -> Result<Option<Record>>;

    /// Writes a record, replacing any existing document under the same
    /// identifier in full.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn put(&self, record: Record) -> Result<()>;

    /// Returns all records currently in the given state.
    ///
    /// Ordering is store-defined and not stable across calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn query_by_state(&self, state: ReviewState) -> Result<Vec<Record>>;
}
