//! Request validation and outbound message construction shared by both
//! dispatchers.
//!
//! Validation runs in a fixed order and stops at the first failure:
//! recipient(s) first, then content.

use eventpush_core::error::AppError;
use eventpush_core::result::AppResult;
use eventpush_core::types::notification::{
    AndroidHints, CLICK_ACTION, EventId, MessageData, NotificationContent, OutboundMessage,
    Recipient,
};

/// Number of token characters that may appear in logs.
pub const TOKEN_LOG_PREFIX_CHARS: usize = 20;

/// Returns the token if present and non-empty.
pub fn require_token(token: Option<&str>) -> AppResult<&str> {
    match token {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(AppError::invalid_argument("FCM token is required")),
    }
}

/// Returns the token list if present and non-empty.
pub fn require_tokens(tokens: Option<&[String]>) -> AppResult<&[String]> {
    match tokens {
        Some(list) if !list.is_empty() => Ok(list),
        _ => Err(AppError::invalid_argument("Tokens array is required")),
    }
}

/// Returns `(title, message)` if both are present and non-empty.
pub fn require_content<'a>(
    title: Option<&'a str>,
    message: Option<&'a str>,
) -> AppResult<(&'a str, &'a str)> {
    match (title, message) {
        (Some(t), Some(m)) if !t.is_empty() && !m.is_empty() => Ok((t, m)),
        _ => Err(AppError::invalid_argument("Title and message are required")),
    }
}

/// Builds the message for a single device.
pub fn build_single_message(
    token: &str,
    title: &str,
    body: &str,
    event_id: Option<&EventId>,
) -> OutboundMessage {
    OutboundMessage {
        recipient: Recipient::Token(token.to_string()),
        notification: content(title, body),
        data: MessageData {
            event_id: EventId::coerce(event_id),
            click_action: Some(CLICK_ACTION.to_string()),
        },
        android: AndroidHints::event_defaults(),
    }
}

/// Builds one multicast message for all devices.
pub fn build_multicast_message(
    tokens: &[String],
    title: &str,
    body: &str,
    event_id: Option<&EventId>,
) -> OutboundMessage {
    OutboundMessage {
        recipient: Recipient::Tokens(tokens.to_vec()),
        notification: content(title, body),
        data: MessageData {
            event_id: EventId::coerce(event_id),
            click_action: None,
        },
        android: AndroidHints::event_defaults(),
    }
}

fn content(title: &str, body: &str) -> NotificationContent {
    NotificationContent {
        title: title.to_string(),
        body: body.to_string(),
    }
}

/// Log-safe form of a device token: its first 20 characters and `...`.
pub fn token_prefix(token: &str) -> String {
    let prefix: String = token.chars().take(TOKEN_LOG_PREFIX_CHARS).collect();
    format!("{prefix}...")
}
