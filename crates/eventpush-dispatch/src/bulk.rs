//! Multi-recipient (multicast) notification dispatch.

use std::sync::Arc;

use tracing::{error, info, warn};

use eventpush_core::error::{AppError, ErrorKind};
use eventpush_core::result::AppResult;
use eventpush_core::traits::delivery::{DeliveryProvider, RecipientOutcome};
use eventpush_core::types::notification::{BulkDispatchResult, BulkNotificationRequest};

use crate::message::{build_multicast_message, require_content, require_tokens};

/// Validates a multi-recipient request, sends it as one multicast call,
/// and aggregates per-recipient outcomes.
#[derive(Debug, Clone)]
pub struct BulkNotificationDispatcher {
    /// Push delivery capability.
    provider: Arc<dyn DeliveryProvider>,
}

impl BulkNotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(provider: Arc<dyn DeliveryProvider>) -> Self {
        Self { provider }
    }

    /// Sends one notification to every token.
    ///
    /// Individual recipient failures are logged and counted; only a failure
    /// of the provider call itself fails the dispatch.
    pub async fn dispatch(
        &self,
        request: &BulkNotificationRequest,
    ) -> AppResult<BulkDispatchResult> {
        let tokens = require_tokens(request.tokens.as_deref()).inspect_err(|_| {
            error!("Rejected bulk notification: no tokens");
        })?;
        let (title, body) = require_content(request.title.as_deref(), request.message.as_deref())
            .inspect_err(|_| {
                error!("Rejected bulk notification: missing title or message");
            })?;

        info!(recipients = tokens.len(), "Sending bulk notification");

        let message = build_multicast_message(tokens, title, body, request.event_id.as_ref());

        let outcomes = self
            .provider
            .send_multicast(&message)
            .await
            .map_err(|e| {
                error!(
                    provider = self.provider.provider_type(),
                    error = %e,
                    "Bulk notification send failed"
                );
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to send notifications: {e}"),
                    e,
                )
            })?;

        if outcomes.len() != tokens.len() {
            error!(
                expected = tokens.len(),
                received = outcomes.len(),
                "Provider returned mismatched outcome count"
            );
            return Err(AppError::internal(format!(
                "Failed to send notifications: provider returned {} results for {} tokens",
                outcomes.len(),
                tokens.len()
            )));
        }

        let result = aggregate(&outcomes);

        info!(
            success_count = result.success_count,
            failure_count = result.failure_count,
            "Bulk notification sent"
        );

        Ok(result)
    }
}

/// Counts outcomes and logs each failure by recipient index.
fn aggregate(outcomes: &[RecipientOutcome]) -> BulkDispatchResult {
    let mut success_count = 0;
    let mut failure_count = 0;

    for (index, outcome) in outcomes.iter().enumerate() {
        match outcome {
            RecipientOutcome::Delivered { .. } => success_count += 1,
            RecipientOutcome::Failed(err) => {
                failure_count += 1;
                warn!(
                    index,
                    code = %err.code,
                    error_message = %err.message,
                    "Failure for token {index}: {} - {}",
                    err.code,
                    err.message
                );
            }
        }
    }

    BulkDispatchResult {
        success: true,
        success_count,
        failure_count,
    }
}
