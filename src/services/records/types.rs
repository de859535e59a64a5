//! Record types for the review workflow.

use serde::{Deserialize, Serialize};

/// Review state of a submitted invoice.
///
/// The only transition is `NotApproved` → `Approved`, one-way. The wire
/// strings match the values the extraction pipeline writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewState {
    #[serde(rename = "Not Approved")]
    NotApproved,
    #[serde(rename = "Approved")]
    Approved,
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotApproved => f.write_str("Not Approved"),
            Self::Approved => f.write_str("Approved"),
        }
    }
}

/// One tracked invoice under review.
///
/// `blob_name` is the stable identifier, derived from the artifact's storage
/// key (the part after the state prefix). Everything the extraction pipeline
/// attached (amounts, vendor fields, whatever) rides along in `fields` and
/// is passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier, unique across the store.
    pub blob_name: String,
    /// Current review state.
    pub state: ReviewState,
    /// Opaque extracted-data payload, preserved verbatim on every write.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Record {
    /// Creates a pending record with an empty payload.
    pub fn pending(blob_name: impl Into<String>) -> Self {
        Self {
            blob_name: blob_name.into(),
            state: ReviewState::NotApproved,
            fields: serde_json::Map::new(),
        }
    }
}
