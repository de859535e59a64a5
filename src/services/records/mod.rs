//! Record store service with pluggable backends.
//!
//! Tracks one [`Record`] per submitted invoice, keyed by its stable
//! `blob_name`. The store only needs three operations (get, full-overwrite
//! put, and query-by-state), mirroring what a hosted document database
//! offers: per-document atomicity, last writer wins, no cross-document
//! transactions.
//!
//! Backends:
//!
//! - **RedbRecordBackend**: persistent storage with ACID guarantees (default)
//! - **MemoryRecordBackend**: fast, non-persistent storage for tests/embedding

mod backend;
mod memory;
mod redb;
mod store;
mod types;

pub use backend::RecordBackend;
pub use memory::MemoryRecordBackend;
pub use redb::RedbRecordBackend;
pub use store::RecordStore;
pub use types::{Record, ReviewState};
