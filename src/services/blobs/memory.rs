//! In-memory artifact store backend.

use super::backend::BlobBackend;
use super::types::ObjectMeta;
use super::validation::validate_key;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

/// In-memory blob storage backend using DashMap.
///
/// Keys are validated the same way as the filesystem backend so tests
/// exercise identical semantics. All data is lost when the process exits.
#[derive(Clone, Default)]
pub struct MemoryBlobBackend {
    objects: DashMap<String, (Vec<u8>, ObjectMeta)>,
}

impl MemoryBlobBackend {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobBackend for MemoryBlobBackend {
    async fn put(&self, key: &str, data: &[u8], content_type: Option<&str>) -> Result<ObjectMeta> {
        validate_key(key)?;

        let content_type = content_type
            .map(std::string::ToString::to_string)
            .or_else(|| {
                mime_guess::from_path(key)
                    .first()
                    .map(|mime| mime.to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let meta = ObjectMeta {
            key: key.to_string(),
            size: data.len() as u64,
            content_type,
            modified_at: Utc::now(),
        };

        self.objects
            .insert(key.to_string(), (data.to_vec(), meta.clone()));

        Ok(meta)
    }

    async fn get(&self, key: &str) -> Result<Option<(Vec<u8>, ObjectMeta)>> {
        validate_key(key)?;
        Ok(self.objects.get(key).map(|entry| entry.clone()))
    }

    async fn head(&self, key: &str) -> Result<Option<ObjectMeta>> {
        validate_key(key)?;
        Ok(self.objects.get(key).map(|entry| entry.1.clone()))
    }

    async fn rename(&self, from: &str, to: &str) -> Result<bool> {
        validate_key(from)?;
        validate_key(to)?;

        let Some((data, mut meta)) = self.objects.get(from).map(|entry| entry.clone()) else {
            return Ok(false);
        };
        meta.key = to.to_string();
        meta.modified_at = Utc::now();

        // Insert before remove so a concurrent reader never observes the
        // object absent from both keys; exactly one racing caller wins the
        // remove and reports the move.
        self.objects.insert(to.to_string(), (data, meta));
        Ok(self.objects.remove(from).is_some())
    }
}
