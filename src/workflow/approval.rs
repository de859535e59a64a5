//! Batch approval: record state transition plus artifact relocation.
//!
//! The two writes land in two independent stores with no transaction across
//! them, in document-then-artifact order. A failure between them leaves the
//! record approved while the artifact still sits under the pending prefix;
//! that window is accepted, bounded by retries, and always reported as a
//! distinct per-identifier inconsistency error for the operator to reconcile.

use tokio::time::timeout;
use tracing::{info, warn};

use super::ReviewWorkflow;
use crate::constants::{APPROVALS_COUNTER, APPROVED_PREFIX, PROCESSED_PREFIX};
use crate::error::{Error, Result};
use crate::reliability::retry_anyhow;
use crate::services::records::ReviewState;

/// How one identifier fared in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// State flipped and artifact relocated; `approvals` counter bumped.
    Approved,
    /// The record was already approved and its artifact already relocated.
    /// No writes, no counter bump.
    AlreadyApproved,
}

/// A per-identifier failure within a batch.
#[derive(Debug)]
pub struct ApprovalFailure {
    pub blob_name: String,
    pub error: Error,
}

/// Result of a batch approval.
///
/// The batch is not transactional: some identifiers may have succeeded while
/// others failed. Failures carry per-identifier errors rather than being
/// folded into one; inconsistency errors in particular must stay visible.
#[derive(Debug, Default)]
pub struct ApprovalReport {
    pub approved: usize,
    pub failures: Vec<ApprovalFailure>,
}

impl ApprovalReport {
    /// Whether every identifier in the batch succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl ReviewWorkflow {
    /// Approves a batch of records by identifier.
    ///
    /// Identifiers are processed in the order given (caller-determined, not
    /// meaningful). Each one independently: read record, write it back
    /// approved, relocate its artifact, bump the counter. A failing
    /// identifier never stops the rest of the batch.
    pub async fn approve_batch(&self, blob_names: &[String]) -> ApprovalReport {
        let mut report = ApprovalReport::default();

        for blob_name in blob_names {
            match self.approve_one(blob_name).await {
                Ok(outcome) => {
                    report.approved += 1;
                    info!(blob_name, ?outcome, "Approval step completed");
                },
                Err(error) => {
                    warn!(blob_name, %error, inconsistent = error.is_inconsistency(),
                        "Approval step failed");
                    report.failures.push(ApprovalFailure {
                        blob_name: blob_name.clone(),
                        error,
                    });
                },
            }
        }

        report
    }

    /// Approves a single record: document write, then artifact relocation.
    async fn approve_one(&self, blob_name: &str) -> Result<ApprovalOutcome> {
        let record = self
            .records
            .get(blob_name)
            .await
            .map_err(Error::record_store)?
            .ok_or_else(|| Error::record_not_found(blob_name))?;

        let pending_key = format!("{PROCESSED_PREFIX}{blob_name}");
        let approved_key = format!("{APPROVED_PREFIX}{blob_name}");

        // Re-approving an already-settled record is a no-op, not an error:
        // it happens on double-submits and concurrent reviewers, and another
        // relocation attempt could only fail.
        if record.state == ReviewState::Approved
            && self
                .artifacts
                .head(&approved_key)
                .await
                .map_err(Error::artifact_store)?
                .is_some()
        {
            return Ok(ApprovalOutcome::AlreadyApproved);
        }

        // Step 1: full-overwrite document write, payload untouched
        let mut record = record;
        record.state = ReviewState::Approved;
        self.records
            .put(record)
            .await
            .map_err(Error::record_store)?;

        // Step 2: relocate the artifact. From here on, failure means the two
        // stores disagree until an operator reconciles them.
        let moved = self.relocate(blob_name, &pending_key, &approved_key).await?;

        if moved {
            self.cache.bump(APPROVALS_COUNTER, 1).await;
            Ok(ApprovalOutcome::Approved)
        } else {
            // Source gone: benign if a concurrent approval already moved it,
            // a real loss otherwise.
            if self
                .artifacts
                .head(&approved_key)
                .await
                .map_err(Error::artifact_store)?
                .is_some()
            {
                Ok(ApprovalOutcome::AlreadyApproved)
            } else {
                Err(Error::inconsistent(
                    blob_name,
                    format!("artifact absent from both '{pending_key}' and '{approved_key}'"),
                ))
            }
        }
    }

    /// Runs the rename with retry and a deadline, mapping failures to the
    /// inconsistency error since the record write has already landed.
    async fn relocate(&self, blob_name: &str, from: &str, to: &str) -> Result<bool> {
        let relocation = retry_anyhow(&self.config.retry, "relocate artifact", || {
            self.artifacts.rename(from, to)
        });

        match timeout(self.config.relocate_timeout, relocation).await {
            Ok(Ok(moved)) => Ok(moved),
            Ok(Err(err)) => Err(Error::inconsistent(blob_name, err)),
            Err(_) => Err(Error::inconsistent(
                blob_name,
                Error::timeout("artifact relocation", self.config.relocate_timeout),
            )),
        }
    }
}
