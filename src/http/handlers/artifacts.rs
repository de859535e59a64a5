//! Signed artifact fetch handler.
//!
//! Target of generated signed URLs: verifies the signature and expiry, then
//! streams the artifact bytes. Holding a link is the only capability a
//! reviewer needs; no store credentials reach the browser.

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::super::types::SignedLinkQuery;
use super::super::{AppError, AppState, metrics};
use crate::error::Error;

/// GET /artifacts/{key} - fetch artifact bytes with a valid signed link.
pub(crate) async fn fetch_artifact(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<SignedLinkQuery>,
) -> Result<Response, AppError> {
    metrics::record_operation("fetch");

    let valid = state
        .workflow
        .signer()
        .verify(&key, query.expires, &query.sig)
        .map_err(|err| Error::Signing {
            key: key.clone(),
            reason: err.to_string(),
        })?;

    if !valid {
        return Ok((StatusCode::FORBIDDEN, "link expired or invalid").into_response());
    }

    let (data, meta) = state
        .workflow
        .artifacts()
        .get(&key)
        .await
        .map_err(Error::artifact_store)?
        .ok_or(Error::ArtifactMissing { key })?;

    Ok(([(header::CONTENT_TYPE, meta.content_type)], data).into_response())
}
