//! Integration tests for the multi-recipient endpoint.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use eventpush_core::traits::delivery::ProviderError;
use eventpush_core::types::notification::Recipient;
use helpers::{FakeProvider, TestApp};

#[tokio::test]
async fn test_bulk_partial_failure() {
    let app = TestApp::new(FakeProvider::rejecting(&["b"]));

    let response = app
        .request(
            "POST",
            "/api/sendBulkNotification",
            Some(json!({
                "tokens": ["a", "b", "c"],
                "title": "Event Starting",
                "message": "Doors open now",
                "eventId": "evt-9"
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"success": true, "successCount": 2, "failureCount": 1})
    );

    let sent = app.provider.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].recipient,
        Recipient::Tokens(vec!["a".into(), "b".into(), "c".into()])
    );
    assert_eq!(sent[0].data.event_id, "evt-9");
    assert!(sent[0].data.click_action.is_none());
}

#[tokio::test]
async fn test_bulk_all_rejected_still_succeeds() {
    let app = TestApp::new(FakeProvider::rejecting(&["a", "b"]));

    let response = app
        .request(
            "POST",
            "/api/sendBulkNotification",
            Some(json!({"tokens": ["a", "b"], "title": "t", "message": "m"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"success": true, "successCount": 0, "failureCount": 2})
    );
}

#[tokio::test]
async fn test_bulk_empty_tokens() {
    let app = TestApp::new(FakeProvider::accepting("unused"));

    let response = app
        .request(
            "POST",
            "/api/sendBulkNotification",
            Some(json!({"tokens": [], "title": "t", "message": "m"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({"error": "invalid-argument", "message": "Tokens array is required"})
    );
    assert!(app.provider.sent().is_empty());
}

#[tokio::test]
async fn test_bulk_tokens_not_an_array() {
    let app = TestApp::new(FakeProvider::accepting("unused"));

    let response = app
        .request(
            "POST",
            "/api/sendBulkNotification",
            Some(json!({"tokens": "abc", "title": "t", "message": "m"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Tokens array is required");
}

#[tokio::test]
async fn test_bulk_missing_content() {
    let app = TestApp::new(FakeProvider::accepting("unused"));

    let response = app
        .request(
            "POST",
            "/api/sendBulkNotification",
            Some(json!({"tokens": ["a"], "title": "", "message": "m"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Title and message are required");
}

#[tokio::test]
async fn test_bulk_provider_failure() {
    let app = TestApp::new(FakeProvider::failing(ProviderError::Authentication(
        "Failed to obtain access token: invalid_grant".into(),
    )));

    let response = app
        .request(
            "POST",
            "/api/sendBulkNotification",
            Some(json!({"tokens": ["a", "b"], "title": "t", "message": "m"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({
            "error": "internal",
            "message": "Failed to send notifications: Failed to obtain access token: invalid_grant"
        })
    );
}

#[tokio::test]
async fn test_bulk_counts_sum_to_token_count() {
    let app = TestApp::new(FakeProvider::rejecting(&["x1", "x3"]));
    let tokens: Vec<String> = (0..7).map(|i| format!("x{i}")).collect();

    let response = app
        .request(
            "POST",
            "/api/sendBulkNotification",
            Some(json!({"tokens": tokens, "title": "t", "message": "m"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let success = response.body["successCount"].as_u64().unwrap();
    let failure = response.body["failureCount"].as_u64().unwrap();
    assert_eq!(success + failure, 7);
    assert_eq!(failure, 2);
}
