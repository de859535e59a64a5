//! HTTP API for the review workflow.
//!
//! JSON over axum: the pending listing, batch approval, the signed artifact
//! fetch that generated links point at, and the administrative cache purge.

pub mod handlers;
mod metrics;
pub mod types;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

use crate::error::Error;
use crate::workflow::ReviewWorkflow;
use types::ErrorResponse;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub workflow: ReviewWorkflow,
}

/// Builds the API router over a workflow instance.
pub fn router(workflow: ReviewWorkflow) -> axum::Router {
    axum::Router::new()
        .route("/invoices", get(handlers::list_invoices))
        .route("/invoices/approve", post(handlers::approve_invoices))
        .route("/artifacts/{*key}", get(handlers::fetch_artifact))
        .route("/cache/purge", post(handlers::purge_cache))
        .route("/health", get(handlers::health))
        .with_state(AppState { workflow })
}

/// Error wrapper translating workflow errors into HTTP responses.
pub struct AppError(Error);

impl From<Error> for AppError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
