//! HTTP API tests driving the router directly with `tower::ServiceExt`.
//!
//! No listener is bound; requests go straight through the axum service the
//! daemon serves, backed by in-memory stores.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use reviewd::services::blobs::ArtifactStore;
use reviewd::services::blobs::signer::{StaticKeyCredentials, UrlSigner};
use reviewd::services::cache::LinkCache;
use reviewd::services::records::{Record, RecordStore, ReviewState};
use reviewd::workflow::{ReviewWorkflow, WorkflowConfig};

struct App {
    router: Router,
    records: RecordStore,
    artifacts: ArtifactStore,
    signer: Arc<UrlSigner>,
}

fn app() -> App {
    let records = RecordStore::memory();
    let artifacts = ArtifactStore::memory();
    let signer = Arc::new(UrlSigner::new(
        "files.test",
        Arc::new(StaticKeyCredentials::new("k1", b"http test secret".to_vec())),
    ));

    let workflow = ReviewWorkflow::new(
        records.clone(),
        artifacts.clone(),
        LinkCache::memory(),
        Arc::clone(&signer),
        WorkflowConfig::default(),
    );

    App {
        router: reviewd::http::router(workflow),
        records,
        artifacts,
        signer,
    }
}

async fn seed_pending(app: &App, blob_name: &str) {
    app.records.put(Record::pending(blob_name)).await.unwrap();
    app.artifacts
        .put(&format!("processed/{blob_name}"), b"pdf bytes", None)
        .await
        .unwrap();
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_responds_ok() {
    let app = app();
    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_invoices_returns_records_urls_and_counters() {
    let app = app();
    seed_pending(&app, "inv-1.pdf").await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/invoices?cache=1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["views"], 1);
    assert_eq!(body["approvals"], 0);

    let invoices = body["invoices"].as_array().unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0]["blob_name"], "inv-1.pdf");
    assert_eq!(invoices[0]["state"], "Not Approved");
    assert!(
        invoices[0]["url"]
            .as_str()
            .unwrap()
            .starts_with("https://files.test/artifacts/")
    );
}

#[tokio::test]
async fn list_invoices_flattens_payload_fields() {
    let app = app();
    let mut record = Record::pending("inv-1.pdf");
    record
        .fields
        .insert("vendor".to_string(), serde_json::json!("Acme"));
    app.records.put(record).await.unwrap();
    app.artifacts
        .put("processed/inv-1.pdf", b"pdf bytes", None)
        .await
        .unwrap();

    let response = app
        .router
        .oneshot(Request::get("/invoices").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["invoices"][0]["vendor"], "Acme");
}

#[tokio::test]
async fn missing_artifact_renders_null_url() {
    let app = app();
    app.records.put(Record::pending("ghost.pdf")).await.unwrap();

    let response = app
        .router
        .oneshot(Request::get("/invoices?cache=1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["invoices"][0]["url"].is_null());
}

#[tokio::test]
async fn approve_form_flips_state_and_reports_counts() {
    let app = app();
    seed_pending(&app, "inv-1.pdf").await;
    seed_pending(&app, "inv-2.pdf").await;

    // Checkbox convention: identifiers are the form field names
    let response = app
        .router
        .clone()
        .oneshot(
            Request::post("/invoices/approve")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("inv-1.pdf=on&inv-2.pdf=on"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["approved"], 2);
    assert_eq!(body["failures"].as_array().unwrap().len(), 0);

    let record = app.records.get("inv-1.pdf").await.unwrap().unwrap();
    assert_eq!(record.state, ReviewState::Approved);
    assert!(
        app.artifacts
            .head("approved/inv-1.pdf")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn partial_approval_failure_still_returns_ok_with_detail() {
    let app = app();
    seed_pending(&app, "inv-1.pdf").await;

    let response = app
        .router
        .oneshot(
            Request::post("/invoices/approve")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("inv-1.pdf=on&no-such.pdf=on"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["approved"], 1);

    let failures = body["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["blob_name"], "no-such.pdf");
    assert_eq!(failures[0]["inconsistent"], false);
}

#[tokio::test]
async fn purge_endpoint_acknowledges() {
    let app = app();
    let response = app
        .router
        .oneshot(Request::post("/cache/purge").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn signed_link_fetches_artifact_bytes() {
    let app = app();
    app.artifacts
        .put("processed/inv-1.pdf", b"pdf bytes", None)
        .await
        .unwrap();

    let url = app
        .signer
        .sign("processed/inv-1.pdf", std::time::Duration::from_secs(3600))
        .unwrap();
    // Strip the scheme and host; the router serves the path
    let path = url.strip_prefix("https://files.test").unwrap();

    let response = app
        .router
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"pdf bytes");
}

#[tokio::test]
async fn tampered_signature_is_forbidden() {
    let app = app();
    app.artifacts
        .put("processed/inv-1.pdf", b"pdf bytes", None)
        .await
        .unwrap();

    let url = app
        .signer
        .sign("processed/inv-1.pdf", std::time::Duration::from_secs(3600))
        .unwrap();
    let path = url.strip_prefix("https://files.test").unwrap();
    let tampered = path.replace("sig=", "sig=00");

    let response = app
        .router
        .oneshot(Request::get(&tampered).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unsigned_artifact_path_is_rejected() {
    let app = app();
    app.artifacts
        .put("processed/inv-1.pdf", b"pdf bytes", None)
        .await
        .unwrap();

    // Missing expires/sig query parameters fails extraction
    let response = app
        .router
        .oneshot(
            Request::get("/artifacts/processed/inv-1.pdf")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
