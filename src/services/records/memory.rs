//! In-memory record store backend.
//!
//! DashMap-backed, non-persistent. Ideal for testing and embedded use.

use super::backend::RecordBackend;
use super::types::{Record, ReviewState};
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// In-memory record storage backend using DashMap.
///
/// Per-record atomicity comes from DashMap's shard locking; concurrent
/// writers to the same identifier resolve last-writer-wins, matching the
/// document-database semantics the durable backend provides.
#[derive(Clone, Default)]
pub struct MemoryRecordBackend {
    records: DashMap<String, Record>,
}

impl MemoryRecordBackend {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordBackend for MemoryRecordBackend {
    async fn get(&self, blob_name: &str) -> Result<Option<Record>> {
        Ok(self.records.get(blob_name).map(|r| r.clone()))
    }

    async fn put(&self, record: Record) -> Result<()> {
        self.records.insert(record.blob_name.clone(), record);
        Ok(())
    }

    async fn query_by_state(&self, state: ReviewState) -> Result<Vec<Record>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.state == state)
            .map(|r| r.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get() {
        let backend = MemoryRecordBackend::new();
        backend.put(Record::pending("inv-1.pdf")).await.unwrap();

        let record = backend.get("inv-1.pdf").await.unwrap().unwrap();
        assert_eq!(record.state, ReviewState::NotApproved);
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let backend = MemoryRecordBackend::new();
        assert!(backend.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_overwrites_whole_document() {
        let backend = MemoryRecordBackend::new();
        let mut record = Record::pending("inv-1.pdf");
        record
            .fields
            .insert("vendor".to_string(), serde_json::json!("Acme"));
        backend.put(record.clone()).await.unwrap();

        record.state = ReviewState::Approved;
        backend.put(record).await.unwrap();

        let stored = backend.get("inv-1.pdf").await.unwrap().unwrap();
        assert_eq!(stored.state, ReviewState::Approved);
        assert_eq!(stored.fields["vendor"], "Acme");
    }

    #[tokio::test]
    async fn query_filters_by_state() {
        let backend = MemoryRecordBackend::new();
        backend.put(Record::pending("a.pdf")).await.unwrap();
        backend.put(Record::pending("b.pdf")).await.unwrap();
        let mut approved = Record::pending("c.pdf");
        approved.state = ReviewState::Approved;
        backend.put(approved).await.unwrap();

        let pending = backend
            .query_by_state(ReviewState::NotApproved)
            .await
            .unwrap();
        assert_eq!(pending.len(), 2);

        let approved = backend.query_by_state(ReviewState::Approved).await.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].blob_name, "c.pdf");
    }
}
