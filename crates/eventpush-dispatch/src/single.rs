//! Single-recipient notification dispatch.

use std::sync::Arc;

use tracing::{error, info};

use eventpush_core::error::{AppError, ErrorKind};
use eventpush_core::result::AppResult;
use eventpush_core::traits::delivery::DeliveryProvider;
use eventpush_core::types::notification::{DispatchResult, NotificationRequest};

use crate::message::{build_single_message, require_content, require_token, token_prefix};

/// Validates a single-recipient request and forwards it to the provider.
#[derive(Debug, Clone)]
pub struct SingleNotificationDispatcher {
    /// Push delivery capability.
    provider: Arc<dyn DeliveryProvider>,
}

impl SingleNotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(provider: Arc<dyn DeliveryProvider>) -> Self {
        Self { provider }
    }

    /// Sends one notification.
    ///
    /// Makes exactly one provider attempt. Validation failures are reported
    /// before the provider is touched.
    pub async fn dispatch(&self, request: &NotificationRequest) -> AppResult<DispatchResult> {
        let token = require_token(request.token.as_deref()).inspect_err(|_| {
            error!("Rejected notification: no token");
        })?;
        let (title, body) = require_content(request.title.as_deref(), request.message.as_deref())
            .inspect_err(|_| {
                error!("Rejected notification: missing title or message");
            })?;

        info!(
            token = %token_prefix(token),
            title,
            body,
            "Sending notification"
        );

        let message = build_single_message(token, title, body, request.event_id.as_ref());

        match self.provider.send_single(&message).await {
            Ok(message_id) => {
                info!(
                    token = %token_prefix(token),
                    message_id = %message_id,
                    "Notification sent"
                );
                Ok(DispatchResult {
                    success: true,
                    message_id,
                })
            }
            Err(e) => {
                error!(
                    token = %token_prefix(token),
                    provider = self.provider.provider_type(),
                    error = %e,
                    "Notification send failed"
                );
                Err(AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to send notification: {e}"),
                    e,
                ))
            }
        }
    }
}
