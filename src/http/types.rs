//! Request and response types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::services::records::ReviewState;
use crate::workflow::{ApprovalReport, PendingInvoice, PendingListing};

/// Query parameters for the pending listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Consult the link cache when present and truthy. Absence means every
    /// link is signed fresh (the cache is still populated either way).
    pub cache: Option<String>,
}

impl ListQuery {
    /// Presence-truthy with the usual negative spellings excluded.
    pub fn use_cache(&self) -> bool {
        self.cache
            .as_deref()
            .is_some_and(|v| !v.is_empty() && v != "0" && v != "false")
    }
}

/// One pending invoice as rendered to the reviewer.
#[derive(Debug, Serialize)]
pub struct InvoiceView {
    pub blob_name: String,
    pub state: ReviewState,
    /// Signed access URL, or `null` when the artifact is unavailable.
    pub url: Option<String>,
    /// Extracted-data payload, passed through unmodified.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl From<PendingInvoice> for InvoiceView {
    fn from(invoice: PendingInvoice) -> Self {
        let url = invoice.url.url().map(str::to_string);
        Self {
            blob_name: invoice.record.blob_name,
            state: invoice.record.state,
            url,
            fields: invoice.record.fields,
        }
    }
}

/// Response body for `GET /invoices`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub invoices: Vec<InvoiceView>,
    pub views: i64,
    pub approvals: i64,
}

impl From<PendingListing> for ListResponse {
    fn from(listing: PendingListing) -> Self {
        Self {
            invoices: listing.invoices.into_iter().map(Into::into).collect(),
            views: listing.views,
            approvals: listing.approvals,
        }
    }
}

/// One failed identifier in an approval batch.
#[derive(Debug, Serialize)]
pub struct FailureView {
    pub blob_name: String,
    pub error: String,
    /// True when the record was flipped but the artifact stayed behind;
    /// these need operator reconciliation.
    pub inconsistent: bool,
}

/// Response body for `POST /invoices/approve`.
#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub approved: usize,
    pub failures: Vec<FailureView>,
}

impl From<ApprovalReport> for ApproveResponse {
    fn from(report: ApprovalReport) -> Self {
        Self {
            approved: report.approved,
            failures: report
                .failures
                .into_iter()
                .map(|failure| FailureView {
                    blob_name: failure.blob_name,
                    inconsistent: failure.error.is_inconsistency(),
                    error: failure.error.to_string(),
                })
                .collect(),
        }
    }
}

/// Query parameters carried by signed artifact URLs.
#[derive(Debug, Deserialize)]
pub struct SignedLinkQuery {
    pub expires: i64,
    pub sig: String,
    /// Key id, informational for rotation; not needed for verification.
    #[allow(dead_code)]
    pub kid: Option<String>,
}

/// Generic error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
