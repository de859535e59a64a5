//! HTTP API handlers organized by concern.

mod artifacts;
mod cache;
mod invoices;

pub(crate) use artifacts::fetch_artifact;
pub(crate) use cache::purge_cache;
pub(crate) use invoices::{approve_invoices, list_invoices};

/// GET /health - liveness probe.
pub(crate) async fn health() -> &'static str {
    "ok"
}
