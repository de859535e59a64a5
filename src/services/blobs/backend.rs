//! Backend trait for the artifact store.
//!
//! Defines the interface that all blob backends must implement, enabling
//! pluggable storage (filesystem, memory, S3/GCS, etc.).

use super::types::ObjectMeta;
use anyhow::Result;
use async_trait::async_trait;

/// Backend trait for artifact storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
#[async_trait]
pub trait BlobBackend: Send + Sync + 'static {
    /// Stores an artifact under a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    async fn put(&self, key: &str, data: &[u8], content_type: Option<&str>) -> Result<ObjectMeta>;

    /// Retrieves an artifact and its metadata.
    ///
    /// Returns `Ok(None)` if no artifact exists under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the read fails.
    async fn get(&self, key: &str) -> Result<Option<(Vec<u8>, ObjectMeta)>>;

    /// Retrieves artifact metadata without reading the data.
    ///
    /// Returns `Ok(None)` if no artifact exists under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or metadata cannot be read.
    async fn head(&self, key: &str) -> Result<Option<ObjectMeta>>;

    /// Relocates an artifact from one key to another, same content.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` if no artifact exists at
    /// `from`; callers decide whether a missing source is benign (already
    /// relocated) or a real loss by checking the destination.
    ///
    /// # Errors
    ///
    /// Returns an error if either key is invalid or the relocation fails
    /// partway.
    async fn rename(&self, from: &str, to: &str) -> Result<bool>;
}
