//! High-level `ArtifactStore` wrapper over backend implementations.

use super::backend::BlobBackend;
use super::filesystem::FilesystemBlobBackend;
use super::memory::MemoryBlobBackend;
use super::types::ObjectMeta;
use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

/// High-level artifact storage interface.
///
/// Wraps a `BlobBackend` implementation and provides a consistent API
/// regardless of the underlying storage mechanism. `ArtifactStore` is `Clone`
/// and can be shared across threads.
#[derive(Clone)]
pub struct ArtifactStore {
    backend: Arc<dyn BlobBackend>,
}

impl ArtifactStore {
    /// Creates an `ArtifactStore` backed by a filesystem directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or opened.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = FilesystemBlobBackend::open(path)?;
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    /// Creates an `ArtifactStore` backed by an in-memory map.
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(MemoryBlobBackend::new()),
        }
    }

    /// Creates an `ArtifactStore` with a custom backend (S3, GCS, etc.).
    pub fn custom<B: BlobBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Stores an artifact under a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    pub async fn put(
        &self,
        key: &str,
        data: &[u8],
        content_type: Option<&str>,
    ) -> Result<ObjectMeta> {
        self.backend.put(key, data, content_type).await
    }

    /// Retrieves an artifact and its metadata.
    ///
    /// Returns `Ok(None)` if the artifact doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the read fails.
    pub async fn get(&self, key: &str) -> Result<Option<(Vec<u8>, ObjectMeta)>> {
        self.backend.get(key).await
    }

    /// Retrieves artifact metadata without reading the data.
    ///
    /// Returns `Ok(None)` if the artifact doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or metadata cannot be read.
    pub async fn head(&self, key: &str) -> Result<Option<ObjectMeta>> {
        self.backend.head(key).await
    }

    /// Relocates an artifact between keys; `Ok(false)` means no source.
    ///
    /// # Errors
    ///
    /// Returns an error if either key is invalid or the relocation fails.
    pub async fn rename(&self, from: &str, to: &str) -> Result<bool> {
        self.backend.rename(from, to).await
    }
}
