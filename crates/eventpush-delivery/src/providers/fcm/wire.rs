//! FCM HTTP v1 request and response bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use eventpush_core::types::notification::OutboundMessage;

/// Body of `POST /v1/projects/{project}/messages:send`.
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    /// Validate without delivering.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub validate_only: bool,
    /// The message.
    pub message: WireMessage<'a>,
}

/// An FCM v1 `Message` addressed to one token.
#[derive(Debug, Serialize)]
pub struct WireMessage<'a> {
    pub token: &'a str,
    pub notification: WireNotification<'a>,
    pub data: BTreeMap<&'static str, &'a str>,
    pub android: WireAndroidConfig<'a>,
}

#[derive(Debug, Serialize)]
pub struct WireNotification<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
pub struct WireAndroidConfig<'a> {
    pub priority: &'static str,
    pub notification: WireAndroidNotification<'a>,
}

#[derive(Debug, Serialize)]
pub struct WireAndroidNotification<'a> {
    pub sound: &'a str,
    pub channel_id: &'a str,
}

impl<'a> SendRequest<'a> {
    /// Builds the request for one token of `message`.
    pub fn for_token(message: &'a OutboundMessage, token: &'a str, validate_only: bool) -> Self {
        let mut data = BTreeMap::new();
        data.insert("eventId", message.data.event_id.as_str());
        if let Some(action) = &message.data.click_action {
            data.insert("click_action", action.as_str());
        }

        Self {
            validate_only,
            message: WireMessage {
                token,
                notification: WireNotification {
                    title: &message.notification.title,
                    body: &message.notification.body,
                },
                data,
                android: WireAndroidConfig {
                    priority: message.android.priority.as_str(),
                    notification: WireAndroidNotification {
                        sound: &message.android.sound,
                        channel_id: &message.android.channel_id,
                    },
                },
            },
        }
    }
}

/// Successful send response.
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    /// Message resource name, `projects/{project}/messages/{id}`.
    pub name: String,
}

/// Google API error envelope.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "@type", default)]
    pub type_url: Option<String>,
    #[serde(rename = "errorCode", default)]
    pub error_code: Option<String>,
}

impl ErrorBody {
    /// The `FcmError` detail code (e.g. `UNREGISTERED`), if present.
    pub fn fcm_error_code(&self) -> Option<&str> {
        self.details
            .iter()
            .find(|d| {
                d.type_url
                    .as_deref()
                    .is_some_and(|t| t.ends_with("google.firebase.fcm.v1.FcmError"))
            })
            .and_then(|d| d.error_code.as_deref())
    }
}

/// OAuth2 token endpoint response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

/// OAuth2 token endpoint error.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}
