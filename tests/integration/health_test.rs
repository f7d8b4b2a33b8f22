//! Integration tests for the health endpoint.

mod helpers;

use axum::http::StatusCode;

use helpers::{FakeProvider, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new(FakeProvider::accepting("m"));

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["provider"], "fake");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
    assert!(response.body["uptimeSeconds"].is_u64());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new(FakeProvider::accepting("m"));
    let response = app.request("GET", "/api/nope", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
