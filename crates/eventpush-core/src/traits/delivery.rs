//! Push delivery provider trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::notification::OutboundMessage;

/// Failure of a provider call as a whole.
///
/// The `Display` output is the underlying human-readable message only, so
/// dispatchers can append it to their own failure message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Credentials could not be loaded or parsed.
    #[error("{0}")]
    Credentials(String),
    /// An access token could not be obtained.
    #[error("{0}")]
    Authentication(String),
    /// The request never produced a usable response.
    #[error("{0}")]
    Transport(String),
    /// The push service rejected the request.
    #[error("{message}")]
    Rejected {
        /// Provider error code (e.g. `messaging/invalid-argument`).
        code: String,
        /// Provider error message.
        message: String,
    },
    /// The message cannot be sent as built.
    #[error("{0}")]
    InvalidMessage(String),
}

/// Error reported for one recipient of a multicast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientError {
    /// Provider error code (e.g. `messaging/registration-token-not-registered`).
    pub code: String,
    /// Provider error message.
    pub message: String,
}

/// Per-recipient result of a multicast send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipientOutcome {
    /// Accepted by the push service.
    Delivered {
        /// Provider-assigned message id.
        message_id: String,
    },
    /// Rejected for this recipient only.
    Failed(RecipientError),
}

impl RecipientOutcome {
    /// Shorthand for a failed outcome.
    pub fn failed(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed(RecipientError {
            code: code.into(),
            message: message.into(),
        })
    }

    /// Whether the recipient was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Capability that delivers push notifications.
///
/// Implementations live in `eventpush-delivery`; dispatchers only see this
/// trait, which lets tests script provider behavior.
#[async_trait]
pub trait DeliveryProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "fcm", "log").
    fn provider_type(&self) -> &str;

    /// Send a message addressed to a single device.
    ///
    /// Returns the provider-assigned message id.
    async fn send_single(&self, message: &OutboundMessage) -> Result<String, ProviderError>;

    /// Send a message addressed to many devices as one logical call.
    ///
    /// The returned outcomes have the same length and order as the
    /// message's recipient tokens. An `Err` means the whole call failed.
    async fn send_multicast(
        &self,
        message: &OutboundMessage,
    ) -> Result<Vec<RecipientOutcome>, ProviderError>;
}
