//! Request counters for the HTTP API.
//!
//! Emitted through the `metrics` facade; the host process decides whether an
//! exporter is attached.

/// Records one API operation.
pub(crate) fn record_operation(op: &'static str) {
    metrics::counter!("reviewd_requests_total", "op" => op).increment(1);
}
