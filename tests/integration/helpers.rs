//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use eventpush_api::{AppState, build_router};
use eventpush_core::config::AppConfig;
use eventpush_core::traits::delivery::{DeliveryProvider, ProviderError, RecipientOutcome};
use eventpush_core::types::notification::OutboundMessage;

/// Provider double that records every message and answers from a script.
#[derive(Debug, Default)]
pub struct FakeProvider {
    pub message_id: String,
    pub failure: Option<ProviderError>,
    pub rejected: Vec<String>,
    sent: Mutex<Vec<OutboundMessage>>,
}

impl FakeProvider {
    pub fn accepting(message_id: &str) -> Self {
        Self {
            message_id: message_id.to_string(),
            ..Self::default()
        }
    }

    pub fn rejecting(tokens: &[&str]) -> Self {
        Self {
            message_id: "msg".to_string(),
            rejected: tokens.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing(err: ProviderError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryProvider for FakeProvider {
    fn provider_type(&self) -> &str {
        "fake"
    }

    async fn send_single(&self, message: &OutboundMessage) -> Result<String, ProviderError> {
        self.sent.lock().unwrap().push(message.clone());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.message_id.clone()),
        }
    }

    async fn send_multicast(
        &self,
        message: &OutboundMessage,
    ) -> Result<Vec<RecipientOutcome>, ProviderError> {
        self.sent.lock().unwrap().push(message.clone());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        Ok(message
            .recipient
            .tokens()
            .iter()
            .map(|token| {
                if self.rejected.contains(token) {
                    RecipientOutcome::failed(
                        "messaging/registration-token-not-registered",
                        "Requested entity was not found.",
                    )
                } else {
                    RecipientOutcome::Delivered {
                        message_id: self.message_id.clone(),
                    }
                }
            })
            .collect())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The provider behind both dispatchers
    pub provider: Arc<FakeProvider>,
}

impl TestApp {
    /// Create a test application around `provider` with default config
    pub fn new(provider: FakeProvider) -> Self {
        let provider = Arc::new(provider);
        let state = AppState::new(AppConfig::default(), provider.clone());
        Self {
            router: build_router(state),
            provider,
        }
    }

    /// Send a JSON request
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.raw_request(method, path, Some("application/json"), body_str)
            .await
    }

    /// Send a request with an arbitrary body and content type
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        content_type: Option<&str>,
        body: String,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(ct) = content_type {
            req = req.header("Content-Type", ct);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            request_id,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
    /// `x-request-id` header, if present
    pub request_id: Option<String>,
}
