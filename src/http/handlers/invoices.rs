//! Listing and approval handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Form, Query, State};

use super::super::types::{ApproveResponse, ListQuery, ListResponse};
use super::super::{AppError, AppState, metrics};

/// GET /invoices - list records awaiting review with display URLs.
pub(crate) async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, AppError> {
    metrics::record_operation("list");
    let listing = state.workflow.list_pending(query.use_cache()).await?;
    Ok(Json(listing.into()))
}

/// POST /invoices/approve - approve the checked records.
///
/// The body is a submitted form whose field names are the identifiers of the
/// checked records (checkbox convention of the review page); field values are
/// ignored. Partial failure still returns 200 with per-identifier errors in
/// the body.
pub(crate) async fn approve_invoices(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<ApproveResponse>, AppError> {
    metrics::record_operation("approve");
    let blob_names: Vec<String> = form.into_keys().collect();
    let report = state.workflow.approve_batch(&blob_names).await;
    Ok(Json(report.into()))
}
