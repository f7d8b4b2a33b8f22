//! Notification request, outbound message, and dispatch result types.
//!
//! Request types are the single canonical wire schema of the callable
//! endpoints: the request object is the JSON body itself, unknown fields
//! are rejected, and required fields are modelled as `Option` so that
//! their absence is reported by the dispatchers with a precise message.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Click action marker attached to single-recipient messages.
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

/// Android notification sound used for every message.
pub const DEFAULT_SOUND: &str = "default";

/// Android notification channel the mobile client registers.
pub const EVENT_CHANNEL_ID: &str = "event_notifications";

/// Optional event identifier as sent by clients.
///
/// Clients send strings, but numbers and booleans are accepted and coerced
/// to their textual form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    /// Textual identifier.
    Text(String),
    /// Numeric identifier.
    Number(serde_json::Number),
    /// Boolean value.
    Flag(bool),
}

impl EventId {
    /// Whether the value counts as "no event" (`""`, `0`, `false`).
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => n.as_f64() == Some(0.0),
            Self::Flag(b) => !b,
        }
    }

    /// Coerces an optional event id into the string carried in message data.
    pub fn coerce(value: Option<&EventId>) -> String {
        match value {
            Some(id) if !id.is_blank() => id.to_string(),
            _ => String::new(),
        }
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            // Integral floats print without a fraction: `1.0` is "1".
            Self::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e21 => {
                    write!(f, "{v:.0}")
                }
                _ => write!(f, "{n}"),
            },
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Single-recipient send request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NotificationRequest {
    /// Device registration token.
    #[serde(default)]
    pub token: Option<String>,
    /// Notification title.
    #[serde(default)]
    pub title: Option<String>,
    /// Notification body.
    #[serde(default)]
    pub message: Option<String>,
    /// Related event.
    #[serde(default)]
    pub event_id: Option<EventId>,
}

/// Multi-recipient send request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BulkNotificationRequest {
    /// Device registration tokens, in the order outcomes are reported.
    ///
    /// A value that is not an array deserializes to `None` so that it is
    /// reported the same way as a missing list.
    #[serde(default, deserialize_with = "deserialize_token_list")]
    pub tokens: Option<Vec<String>>,
    /// Notification title.
    #[serde(default)]
    pub title: Option<String>,
    /// Notification body.
    #[serde(default)]
    pub message: Option<String>,
    /// Related event.
    #[serde(default)]
    pub event_id: Option<EventId>,
}

fn deserialize_token_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(token) => Ok(token),
                other => Err(de::Error::custom(format!(
                    "tokens must be strings, found {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Ok(None),
    }
}

/// Who an [`OutboundMessage`] is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    /// One device.
    Token(String),
    /// Many devices, addressed in a single multicast call.
    Tokens(Vec<String>),
}

impl Recipient {
    /// Tokens addressed, in order.
    pub fn tokens(&self) -> &[String] {
        match self {
            Self::Token(token) => std::slice::from_ref(token),
            Self::Tokens(tokens) => tokens,
        }
    }
}

/// User-visible notification content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    /// Title line.
    pub title: String,
    /// Body text.
    pub body: String,
}

/// Data payload delivered to the app alongside the notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    /// Event the notification refers to, `""` when none.
    pub event_id: String,
    /// Click action marker, set on single-recipient messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_action: Option<String>,
}

/// Android delivery priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AndroidPriority {
    /// High priority, wakes the device.
    High,
}

impl AndroidPriority {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
        }
    }
}

/// Android platform hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidHints {
    /// Delivery priority.
    pub priority: AndroidPriority,
    /// Notification sound.
    pub sound: String,
    /// Notification channel id.
    pub channel_id: String,
}

impl AndroidHints {
    /// High-priority, default sound, `event_notifications` channel.
    pub fn event_defaults() -> Self {
        Self {
            priority: AndroidPriority::High,
            sound: DEFAULT_SOUND.to_string(),
            channel_id: EVENT_CHANNEL_ID.to_string(),
        }
    }
}

/// Normalized payload handed to a delivery provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Addressed device(s).
    pub recipient: Recipient,
    /// Notification content.
    pub notification: NotificationContent,
    /// Data payload.
    pub data: MessageData,
    /// Android hints.
    pub android: AndroidHints,
}

impl OutboundMessage {
    /// Number of devices addressed.
    pub fn recipient_count(&self) -> usize {
        self.recipient.tokens().len()
    }
}

/// Successful single send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    /// Always `true`; failures are reported as errors.
    pub success: bool,
    /// Provider-assigned message id.
    pub message_id: String,
}

/// Completed multicast send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDispatchResult {
    /// Always `true` once the provider call returned.
    pub success: bool,
    /// Recipients the provider accepted.
    pub success_count: usize,
    /// Recipients the provider rejected.
    pub failure_count: usize,
}
