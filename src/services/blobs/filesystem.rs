//! Filesystem-backed artifact store backend.
//!
//! Maps storage keys onto paths under a base directory, so the two state
//! prefixes become sibling directories (`<base>/processed`, `<base>/approved`)
//! and relocation is a filesystem rename. Blocking I/O runs on
//! `spawn_blocking`.

use super::backend::BlobBackend;
use super::types::ObjectMeta;
use super::validation::object_path;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-backed blob storage backend.
///
/// `FilesystemBlobBackend` is `Clone` and can be shared across threads.
/// Metadata is derived from the filesystem on demand; there is no separate
/// index to drift out of sync with the actual files.
#[derive(Clone)]
pub struct FilesystemBlobBackend {
    base_dir: PathBuf,
}

impl FilesystemBlobBackend {
    /// Creates or opens the artifact store at the given base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir).with_context(|| {
            format!("Failed to create artifact directory: {}", base_dir.display())
        })?;

        Ok(Self { base_dir })
    }

    fn meta_from_fs(&self, key: &str, file_path: &Path) -> Result<ObjectMeta> {
        let metadata = fs::metadata(file_path)
            .with_context(|| format!("Failed to stat artifact: {key}"))?;

        let content_type = mime_guess::from_path(file_path).first().map_or_else(
            || "application/octet-stream".to_string(),
            |mime| mime.to_string(),
        );

        let modified_at: DateTime<Utc> = metadata
            .modified()
            .map(DateTime::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(ObjectMeta {
            key: key.to_string(),
            size: metadata.len(),
            content_type,
            modified_at,
        })
    }

    fn put_sync(&self, key: &str, data: &[u8], content_type: Option<&str>) -> Result<ObjectMeta> {
        let file_path = object_path(&self.base_dir, key)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directories for: {key}"))?;
        }

        fs::write(&file_path, data).with_context(|| format!("Failed to write artifact: {key}"))?;

        let mut meta = self.meta_from_fs(key, &file_path)?;
        if let Some(content_type) = content_type {
            meta.content_type = content_type.to_string();
        }

        Ok(meta)
    }

    fn get_sync(&self, key: &str) -> Result<Option<(Vec<u8>, ObjectMeta)>> {
        let file_path = object_path(&self.base_dir, key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let data =
            fs::read(&file_path).with_context(|| format!("Failed to read artifact: {key}"))?;
        let meta = self.meta_from_fs(key, &file_path)?;

        Ok(Some((data, meta)))
    }

    fn head_sync(&self, key: &str) -> Result<Option<ObjectMeta>> {
        let file_path = object_path(&self.base_dir, key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        Ok(Some(self.meta_from_fs(key, &file_path)?))
    }

    fn rename_sync(&self, from: &str, to: &str) -> Result<bool> {
        let from_path = object_path(&self.base_dir, from)?;
        let to_path = object_path(&self.base_dir, to)?;

        if let Some(parent) = to_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directories for: {to}"))?;
        }

        // Atomic on POSIX; a concurrent relocation of the same key leaves
        // exactly one caller seeing success and the other source-not-found.
        match fs::rename(&from_path, &to_path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to relocate artifact: {from} -> {to}"))
            },
        }
    }
}

#[async_trait]
impl BlobBackend for FilesystemBlobBackend {
    async fn put(&self, key: &str, data: &[u8], content_type: Option<&str>) -> Result<ObjectMeta> {
        let backend = self.clone();
        let key = key.to_string();
        let data = data.to_vec();
        let content_type = content_type.map(std::string::ToString::to_string);
        tokio::task::spawn_blocking(move || backend.put_sync(&key, &data, content_type.as_deref()))
            .await
            .context("Task join error")?
    }

    async fn get(&self, key: &str) -> Result<Option<(Vec<u8>, ObjectMeta)>> {
        let backend = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.get_sync(&key))
            .await
            .context("Task join error")?
    }

    async fn head(&self, key: &str) -> Result<Option<ObjectMeta>> {
        let backend = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.head_sync(&key))
            .await
            .context("Task join error")?
    }

    async fn rename(&self, from: &str, to: &str) -> Result<bool> {
        let backend = self.clone();
        let from = from.to_string();
        let to = to.to_string();
        tokio::task::spawn_blocking(move || backend.rename_sync(&from, &to))
            .await
            .context("Task join error")?
    }
}
