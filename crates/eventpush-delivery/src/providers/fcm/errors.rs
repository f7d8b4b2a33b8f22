//! Maps FCM HTTP v1 error responses to `messaging/*` error codes.

use super::wire::{ErrorBody, ErrorResponse};

pub const INVALID_ARGUMENT: &str = "messaging/invalid-argument";
pub const TOKEN_NOT_REGISTERED: &str = "messaging/registration-token-not-registered";
pub const RATE_EXCEEDED: &str = "messaging/message-rate-exceeded";
pub const MISMATCHED_CREDENTIAL: &str = "messaging/mismatched-credential";
pub const THIRD_PARTY_AUTH: &str = "messaging/third-party-auth-error";
pub const SERVER_UNAVAILABLE: &str = "messaging/server-unavailable";
pub const INTERNAL_ERROR: &str = "messaging/internal-error";
pub const AUTHENTICATION_ERROR: &str = "messaging/authentication-error";
pub const UNKNOWN_ERROR: &str = "messaging/unknown-error";

/// Code used for per-recipient transport failures.
pub const NETWORK_ERROR: &str = "app/network-error";

/// A classified send failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FcmFailure {
    pub code: &'static str,
    pub message: String,
}

/// Classifies a non-2xx response from the send endpoint.
///
/// The `FcmError` detail code wins over the canonical status string, which
/// wins over the HTTP status.
pub fn classify(http_status: u16, body: &str) -> FcmFailure {
    let parsed = serde_json::from_str::<ErrorResponse>(body).ok().map(|r| r.error);

    let code = parsed
        .as_ref()
        .and_then(|e| e.fcm_error_code().and_then(code_for_fcm_error))
        .or_else(|| {
            parsed
                .as_ref()
                .and_then(|e| e.status.as_deref())
                .and_then(code_for_status)
        })
        .unwrap_or_else(|| code_for_http_status(http_status));

    FcmFailure {
        code,
        message: failure_message(http_status, parsed.as_ref(), body),
    }
}

fn failure_message(http_status: u16, parsed: Option<&ErrorBody>, raw: &str) -> String {
    match parsed {
        Some(err) if !err.message.is_empty() => err.message.clone(),
        _ if raw.trim().is_empty() => {
            format!("Unexpected response with status {http_status}")
        }
        _ => format!("Unexpected response with status {http_status}: {}", raw.trim()),
    }
}

fn code_for_fcm_error(code: &str) -> Option<&'static str> {
    Some(match code {
        "UNREGISTERED" => TOKEN_NOT_REGISTERED,
        "INVALID_ARGUMENT" => INVALID_ARGUMENT,
        "QUOTA_EXCEEDED" => RATE_EXCEEDED,
        "SENDER_ID_MISMATCH" => MISMATCHED_CREDENTIAL,
        "THIRD_PARTY_AUTH_ERROR" | "APNS_AUTH_ERROR" => THIRD_PARTY_AUTH,
        "UNAVAILABLE" => SERVER_UNAVAILABLE,
        "INTERNAL" => INTERNAL_ERROR,
        "UNSPECIFIED_ERROR" => UNKNOWN_ERROR,
        _ => return None,
    })
}

fn code_for_status(status: &str) -> Option<&'static str> {
    Some(match status {
        "INVALID_ARGUMENT" => INVALID_ARGUMENT,
        "UNAUTHENTICATED" | "PERMISSION_DENIED" => AUTHENTICATION_ERROR,
        "NOT_FOUND" => TOKEN_NOT_REGISTERED,
        "RESOURCE_EXHAUSTED" => RATE_EXCEEDED,
        "UNAVAILABLE" => SERVER_UNAVAILABLE,
        "INTERNAL" => INTERNAL_ERROR,
        _ => return None,
    })
}

fn code_for_http_status(status: u16) -> &'static str {
    match status {
        400 => INVALID_ARGUMENT,
        401 | 403 => AUTHENTICATION_ERROR,
        500 => INTERNAL_ERROR,
        503 => SERVER_UNAVAILABLE,
        _ => UNKNOWN_ERROR,
    }
}
