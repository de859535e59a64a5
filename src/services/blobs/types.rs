//! Types for the artifact store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a stored artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectMeta {
    /// Storage key of the artifact (e.g., "processed/inv-1.pdf")
    pub key: String,
    /// Size in bytes
    pub size: u64,
    /// MIME content type (e.g., "application/pdf")
    pub content_type: String,
    /// Timestamp when the artifact was last written or relocated
    pub modified_at: DateTime<Utc>,
}
