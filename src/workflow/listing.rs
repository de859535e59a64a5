//! Pending listing with cache-aside link resolution.

use tokio::time::timeout;
use tracing::{debug, warn};

use super::ReviewWorkflow;
use crate::constants::{APPROVALS_COUNTER, PROCESSED_PREFIX, VIEWS_COUNTER};
use crate::error::{Error, Result};
use crate::services::records::{Record, ReviewState};

/// Display URL for one pending record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedUrl {
    /// A signed, time-limited access URL.
    Signed(String),
    /// The artifact object does not exist under the pending key.
    Missing,
    /// The artifact store failed or timed out for this record; the artifact
    /// may well exist. Shown to reviewers the same as `Missing`, but logged
    /// and reported apart so an outage doesn't read as data loss.
    Unavailable,
}

impl ResolvedUrl {
    /// The signed URL, if one was resolved.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Signed(url) => Some(url),
            Self::Missing | Self::Unavailable => None,
        }
    }
}

/// One pending record annotated with its display URL.
#[derive(Debug, Clone)]
pub struct PendingInvoice {
    pub record: Record,
    pub url: ResolvedUrl,
}

/// Result of a pending listing call.
#[derive(Debug, Clone)]
pub struct PendingListing {
    /// Pending records in store-defined order (not stable across calls).
    pub invoices: Vec<PendingInvoice>,
    /// Times the listing has been served, including this call.
    pub views: i64,
    /// Records approved so far (read-only here).
    pub approvals: i64,
}

impl ReviewWorkflow {
    /// Lists all records awaiting review, each resolved to a display URL.
    ///
    /// `use_cache` governs cache *consultation* only. Every miss signs a
    /// fresh URL and writes it back with the shared validity window, even
    /// when `use_cache` is false; cache population is unconditional warm-up
    /// behavior, only the read is optional.
    ///
    /// Per-record resolution failures degrade to sentinels and never abort
    /// the listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordStore`] if the pending query itself fails; a
    /// listing without records is not worth serving.
    pub async fn list_pending(&self, use_cache: bool) -> Result<PendingListing> {
        let records = self
            .records
            .query_by_state(ReviewState::NotApproved)
            .await
            .map_err(Error::record_store)?;

        let mut invoices = Vec::with_capacity(records.len());
        for record in records {
            let storage_key = format!("{PROCESSED_PREFIX}{}", record.blob_name);
            let url = self.resolve_url(&storage_key, use_cache).await;
            invoices.push(PendingInvoice { record, url });
        }

        // One view per listing call, not per record
        let views = self.cache.bump(VIEWS_COUNTER, 1).await;
        let approvals = self.cache.counter(APPROVALS_COUNTER).await;

        debug!(
            pending = invoices.len(),
            views, approvals, use_cache, "Served pending listing"
        );

        Ok(PendingListing {
            invoices,
            views,
            approvals,
        })
    }

    /// Resolves one storage key to a display URL, cache-aside.
    ///
    /// Infallible by design: anything that goes wrong for this one record
    /// becomes a sentinel.
    async fn resolve_url(&self, storage_key: &str, use_cache: bool) -> ResolvedUrl {
        match timeout(
            self.config.resolve_timeout,
            self.resolve_url_inner(storage_key, use_cache),
        )
        .await
        {
            Ok(resolved) => resolved,
            Err(_) => {
                warn!(
                    storage_key,
                    timeout_secs = self.config.resolve_timeout.as_secs(),
                    "URL resolution timed out"
                );
                ResolvedUrl::Unavailable
            },
        }
    }

    async fn resolve_url_inner(&self, storage_key: &str, use_cache: bool) -> ResolvedUrl {
        match self.artifacts.head(storage_key).await {
            Ok(Some(_)) => {},
            Ok(None) => {
                warn!(storage_key, "Artifact missing for pending record");
                return ResolvedUrl::Missing;
            },
            Err(err) => {
                warn!(storage_key, error = %err, "Artifact store error during listing");
                return ResolvedUrl::Unavailable;
            },
        }

        if use_cache
            && let Some(url) = self.cache.get_url(storage_key).await
        {
            debug!(storage_key, "Link cache hit");
            return ResolvedUrl::Signed(url);
        }

        match self.signer.sign(storage_key, self.config.link_validity) {
            Ok(url) => {
                // Same TTL as the signature's validity window
                self.cache
                    .put_url(storage_key, &url, self.config.link_validity)
                    .await;
                debug!(storage_key, "Signed fresh artifact URL");
                ResolvedUrl::Signed(url)
            },
            Err(err) => {
                warn!(storage_key, error = %err, "Failed to sign artifact URL");
                ResolvedUrl::Unavailable
            },
        }
    }
}
