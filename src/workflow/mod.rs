//! The review workflow: pending listings, link resolution, batch approval.
//!
//! Orchestrates the three stores without holding any locks of its own. Every
//! request walks its steps sequentially; cross-request coordination is
//! whatever the stores themselves guarantee (per-document atomicity, per-key
//! cache atomicity), nothing more.

mod approval;
mod listing;

pub use approval::{ApprovalFailure, ApprovalOutcome, ApprovalReport};
pub use listing::{PendingInvoice, PendingListing, ResolvedUrl};

use std::sync::Arc;
use std::time::Duration;

use crate::constants;
use crate::error::Result;
use crate::reliability::RetryConfig;
use crate::services::blobs::ArtifactStore;
use crate::services::blobs::signer::UrlSigner;
use crate::services::cache::LinkCache;
use crate::services::records::RecordStore;

/// Tunables for the review workflow.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Validity window for signed URLs. The link cache TTL uses this same
    /// value so a cached link can never outlive its signature.
    pub link_validity: Duration,
    /// Deadline for resolving one record's display URL during listing.
    pub resolve_timeout: Duration,
    /// Deadline for relocating one artifact during approval.
    pub relocate_timeout: Duration,
    /// Retry policy for transient artifact store failures during relocation.
    pub retry: RetryConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            link_validity: constants::DEFAULT_LINK_VALIDITY,
            resolve_timeout: constants::DEFAULT_RESOLVE_TIMEOUT,
            relocate_timeout: constants::DEFAULT_RELOCATE_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }
}

/// The review workflow over explicitly injected store handles.
///
/// `ReviewWorkflow` is cheap to clone; clones share the same stores.
#[derive(Clone)]
pub struct ReviewWorkflow {
    pub(crate) records: RecordStore,
    pub(crate) artifacts: ArtifactStore,
    pub(crate) cache: LinkCache,
    pub(crate) signer: Arc<UrlSigner>,
    pub(crate) config: WorkflowConfig,
}

impl ReviewWorkflow {
    pub fn new(
        records: RecordStore,
        artifacts: ArtifactStore,
        cache: LinkCache,
        signer: Arc<UrlSigner>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            records,
            artifacts,
            cache,
            signer,
            config,
        }
    }

    /// The URL signer, exposed for the artifact-fetch endpoint.
    pub fn signer(&self) -> &UrlSigner {
        &self.signer
    }

    /// The artifact store, exposed for the artifact-fetch endpoint.
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Discards all cached links and counters.
    ///
    /// Administrative recovery operation, e.g. after rotating the signing
    /// key; idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cache`](crate::error::Error::Cache) if the cache
    /// backend is unreachable and the flush could not be confirmed.
    pub async fn purge_cache(&self) -> Result<()> {
        self.cache
            .purge_all()
            .await
            .map_err(|err| crate::error::Error::Cache {
                reason: err.to_string(),
            })
    }
}
