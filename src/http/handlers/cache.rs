//! Administrative cache handlers.

use axum::extract::State;

use super::super::{AppError, AppState, metrics};

/// POST /cache/purge - discard all cached links and counters.
pub(crate) async fn purge_cache(State(state): State<AppState>) -> Result<&'static str, AppError> {
    metrics::record_operation("purge");
    state.workflow.purge_cache().await?;
    Ok("OK")
}
