//! High-level `RecordStore` wrapper over backend implementations.

use super::backend::RecordBackend;
use super::memory::MemoryRecordBackend;
use super::redb::RedbRecordBackend;
use super::types::{Record, ReviewState};
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// High-level record store interface.
///
/// Wraps a `RecordBackend` implementation and provides a consistent API
/// regardless of the underlying storage mechanism. `RecordStore` is `Clone`
/// and can be shared across threads.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn RecordBackend>,
}

impl RecordStore {
    /// Creates a `RecordStore` backed by a file-based redb database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = RedbRecordBackend::open(path)?;
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    /// Creates a `RecordStore` backed by an in-memory map.
    ///
    /// All data is lost when the process exits.
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(MemoryRecordBackend::new()),
        }
    }

    /// Creates a `RecordStore` with a custom backend.
    pub fn custom<B: RecordBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Retrieves a record by identifier.
    ///
    /// Returns `Ok(None)` if no record exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn get(&self, blob_name: &str) -> Result<Option<Record>> {
        self.backend.get(blob_name).await
    }

    /// Writes a record as a full-document overwrite.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn put(&self, record: Record) -> Result<()> {
        self.backend.put(record).await
    }

    /// Returns all records in the given state (store-defined order).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    pub async fn query_by_state(&self, state: ReviewState) -> Result<Vec<Record>> {
        self.backend.query_by_state(state).await
    }
}
