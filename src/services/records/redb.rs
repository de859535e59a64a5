//! Redb-backed record store backend.
//!
//! Persistent record storage with ACID guarantees. Each record is one
//! JSON-serialized document keyed by `blob_name`; state queries scan the
//! table, which is fine at review-queue sizes.

use super::backend::RecordBackend;
use super::types::{Record, ReviewState};
use anyhow::{Context, Result};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Table of records keyed by blob name.
const RECORDS_TABLE: TableDefinition<'static, &'static str, &'static [u8]> =
    TableDefinition::new("records");

/// Redb-backed record storage backend.
///
/// `RedbRecordBackend` is `Clone` and can be shared across threads. The
/// underlying database handles concurrent access safely; each put is one
/// committed transaction, giving the per-document atomicity the workflow
/// relies on.
#[derive(Clone)]
pub struct RedbRecordBackend {
    db: Arc<Database>,
}

impl RedbRecordBackend {
    /// Opens or creates a record database at the given path.
    ///
    /// Creates parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory cannot be created
    /// - Database file cannot be opened or created
    /// - Initialization transaction fails to begin or commit
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create records directory: {}", parent.display())
            })?;
        }

        let db = Database::create(path)
            .with_context(|| format!("Failed to open records database: {}", path.display()))?;

        // Initialize table on first open so reads never see a missing table
        let write_txn = db
            .begin_write()
            .context("Failed to begin initialization transaction")?;
        {
            let _table = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to initialize records table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initialization transaction")?;

        Ok(Self { db: Arc::new(db) })
    }

    fn get_sync(&self, blob_name: &str) -> Result<Option<Record>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(RECORDS_TABLE)
            .context("Failed to open records table")?;

        let result = table
            .get(blob_name)
            .with_context(|| format!("Failed to read record '{blob_name}'"))?;

        match result {
            Some(guard) => {
                let record: Record = serde_json::from_slice(guard.value())
                    .with_context(|| format!("Failed to deserialize record '{blob_name}'"))?;
                Ok(Some(record))
            },
            None => Ok(None),
        }
    }

    fn put_sync(&self, record: &Record) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        {
            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to open records table")?;

            let json = serde_json::to_vec(record).context("Failed to serialize record")?;

            table
                .insert(record.blob_name.as_str(), json.as_slice())
                .with_context(|| format!("Failed to insert record '{}'", record.blob_name))?;
        }

        write_txn
            .commit()
            .context("Failed to commit record write")?;

        Ok(())
    }

    fn query_by_state_sync(&self, state: ReviewState) -> Result<Vec<Record>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(RECORDS_TABLE)
            .context("Failed to open records table")?;

        let mut records = Vec::new();

        for item in table.iter().context("Failed to iterate records table")? {
            let (_, value) = item.context("Failed to read record entry")?;
            if let Ok(record) = serde_json::from_slice::<Record>(value.value())
                && record.state == state
            {
                records.push(record);
            }
        }

        Ok(records)
    }
}

#[async_trait]
impl RecordBackend for RedbRecordBackend {
    async fn get(&self, blob_name: &str) -> Result<Option<Record>> {
        let backend = self.clone();
        let blob_name = blob_name.to_string();
        tokio::task::spawn_blocking(move || backend.get_sync(&blob_name))
            .await
            .context("Task join error")?
    }

    async fn put(&self, record: Record) -> Result<()> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.put_sync(&record))
            .await
            .context("Task join error")?
    }

    async fn query_by_state(&self, state: ReviewState) -> Result<Vec<Record>> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.query_by_state_sync(state))
            .await
            .context("Task join error")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn roundtrip_with_payload() {
        let tmp = TempDir::new().unwrap();
        let backend = RedbRecordBackend::open(tmp.path().join("records.redb")).unwrap();

        let mut record = Record::pending("inv-1.pdf");
        record
            .fields
            .insert("total".to_string(), serde_json::json!(42.0));
        backend.put(record).await.unwrap();

        let stored = backend.get("inv-1.pdf").await.unwrap().unwrap();
        assert_eq!(stored.fields["total"], 42.0);
    }

    #[tokio::test]
    async fn state_query_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let db_path = tmp.path().join("records.redb");

        {
            let backend = RedbRecordBackend::open(&db_path).unwrap();
            backend.put(Record::pending("a.pdf")).await.unwrap();
            let mut approved = Record::pending("b.pdf");
            approved.state = ReviewState::Approved;
            backend.put(approved).await.unwrap();
        }

        let backend = RedbRecordBackend::open(&db_path).unwrap();
        let pending = backend
            .query_by_state(ReviewState::NotApproved)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].blob_name, "a.pdf");
    }
}
