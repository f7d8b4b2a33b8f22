//! Integration tests for the single-recipient endpoint.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use eventpush_core::traits::delivery::ProviderError;
use eventpush_core::types::notification::Recipient;
use helpers::{FakeProvider, TestApp};

#[tokio::test]
async fn test_send_notification_success() {
    let app = TestApp::new(FakeProvider::accepting("msg123"));

    let response = app
        .request(
            "POST",
            "/api/sendNotification",
            Some(json!({
                "token": "abc",
                "title": "Event Starting",
                "message": "Your event starts in 10 minutes"
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"success": true, "messageId": "msg123"}));
    assert!(response.request_id.is_some());

    let sent = app.provider.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, Recipient::Token("abc".into()));
    assert_eq!(sent[0].data.event_id, "");
    assert_eq!(
        sent[0].data.click_action.as_deref(),
        Some("FLUTTER_NOTIFICATION_CLICK")
    );
}

#[tokio::test]
async fn test_send_notification_empty_token() {
    let app = TestApp::new(FakeProvider::accepting("unused"));

    let response = app
        .request(
            "POST",
            "/api/sendNotification",
            Some(json!({"token": "", "title": "x", "message": "y"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({"error": "invalid-argument", "message": "FCM token is required"})
    );
    assert!(app.provider.sent().is_empty());
}

#[tokio::test]
async fn test_send_notification_token_checked_before_content() {
    let app = TestApp::new(FakeProvider::accepting("unused"));

    let response = app
        .request("POST", "/api/sendNotification", Some(json!({})))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "FCM token is required");
}

#[tokio::test]
async fn test_send_notification_missing_content() {
    let app = TestApp::new(FakeProvider::accepting("unused"));

    let response = app
        .request(
            "POST",
            "/api/sendNotification",
            Some(json!({"token": "abc", "title": "Event Starting"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        json!({"error": "invalid-argument", "message": "Title and message are required"})
    );
    assert!(app.provider.sent().is_empty());
}

#[tokio::test]
async fn test_send_notification_numeric_event_id() {
    let app = TestApp::new(FakeProvider::accepting("m"));

    let response = app
        .request(
            "POST",
            "/api/sendNotification",
            Some(json!({"token": "abc", "title": "t", "message": "m", "eventId": 1234})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.provider.sent()[0].data.event_id, "1234");
}

#[tokio::test]
async fn test_send_notification_provider_failure() {
    let app = TestApp::new(FakeProvider::failing(ProviderError::Rejected {
        code: "messaging/registration-token-not-registered".into(),
        message: "Requested entity was not found.".into(),
    }));

    let response = app
        .request(
            "POST",
            "/api/sendNotification",
            Some(json!({"token": "stale", "title": "t", "message": "m"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({
            "error": "internal",
            "message": "Failed to send notification: Requested entity was not found."
        })
    );
}

#[tokio::test]
async fn test_wrapped_payload_rejected() {
    let app = TestApp::new(FakeProvider::accepting("m"));

    let response = app
        .request(
            "POST",
            "/api/sendNotification",
            Some(json!({"data": {"token": "abc", "title": "t", "message": "m"}})),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid-argument");
    assert!(app.provider.sent().is_empty());
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let app = TestApp::new(FakeProvider::accepting("m"));

    let response = app
        .raw_request(
            "POST",
            "/api/sendNotification",
            Some("application/json"),
            "{\"token\": ".to_string(),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid-argument");
}

#[tokio::test]
async fn test_repeated_requests_are_not_deduplicated() {
    let app = TestApp::new(FakeProvider::accepting("m"));
    let body = json!({"token": "abc", "title": "t", "message": "m"});

    for _ in 0..2 {
        let response = app
            .request("POST", "/api/sendNotification", Some(body.clone()))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    assert_eq!(app.provider.sent().len(), 2);
}

#[tokio::test]
async fn test_get_not_allowed() {
    let app = TestApp::new(FakeProvider::accepting("m"));
    let response = app.request("GET", "/api/sendNotification", None).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}
