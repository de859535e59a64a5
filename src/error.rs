//! Workflow error types for typed error handling.
//!
//! Backends report failures as `anyhow::Error`; the workflow boundary maps
//! them into this structured enum so the HTTP layer and batch reports can
//! tell failure classes apart. Inconsistency errors carry special weight:
//! they mean the record store and artifact store disagree and an operator
//! has reconciliation to do.

use std::time::Duration;

/// Result type for workflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Workflow errors with structured context.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No record exists for the identifier.
    #[error("record not found: {blob_name}")]
    RecordNotFound { blob_name: String },

    /// Record store operation failed.
    #[error("record store error: {reason}")]
    RecordStore { reason: String },

    /// No artifact exists under the key.
    #[error("artifact not found: {key}")]
    ArtifactMissing { key: String },

    /// Artifact store operation failed.
    #[error("artifact store error: {reason}")]
    ArtifactStore { reason: String },

    /// The record store and artifact store disagree for this identifier:
    /// the record was written approved but the artifact relocation did not
    /// complete. Needs operator reconciliation.
    #[error("inconsistent state for '{blob_name}': {reason}")]
    Inconsistent { blob_name: String, reason: String },

    /// Signed URL generation or verification failed.
    #[error("signing failed for '{key}': {reason}")]
    Signing { key: String, reason: String },

    /// An operation exceeded its deadline.
    #[error("{operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    /// Link cache operation failed where failure must surface (purge).
    #[error("cache error: {reason}")]
    Cache { reason: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a record store error from a backend failure.
    pub fn record_store(source: anyhow::Error) -> Self {
        Self::RecordStore {
            reason: format!("{source:#}"),
        }
    }

    /// Create an artifact store error from a backend failure.
    pub fn artifact_store(source: anyhow::Error) -> Self {
        Self::ArtifactStore {
            reason: format!("{source:#}"),
        }
    }

    /// Create a record not found error.
    pub fn record_not_found(blob_name: impl Into<String>) -> Self {
        Self::RecordNotFound {
            blob_name: blob_name.into(),
        }
    }

    /// Create an inconsistency error.
    pub fn inconsistent(blob_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Inconsistent {
            blob_name: blob_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs: timeout.as_secs(),
        }
    }

    /// Whether this error reports store divergence needing reconciliation.
    pub fn is_inconsistency(&self) -> bool {
        matches!(self, Self::Inconsistent { .. })
    }

    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RecordNotFound { .. } | Self::ArtifactMissing { .. } => 404,
            Self::Timeout { .. } => 504,
            Self::Cache { .. } => 503,
            Self::RecordStore { .. }
            | Self::ArtifactStore { .. }
            | Self::Inconsistent { .. }
            | Self::Signing { .. }
            | Self::Config(_) => 500,
        }
    }
}
