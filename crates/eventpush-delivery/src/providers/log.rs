//! Log-only delivery provider for local development.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use eventpush_core::traits::delivery::{DeliveryProvider, ProviderError, RecipientOutcome};
use eventpush_core::types::notification::OutboundMessage;

/// Accepts every message and only logs it. No network calls are made.
#[derive(Debug, Clone)]
pub struct LogDeliveryProvider {
    project_id: String,
}

impl LogDeliveryProvider {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }

    fn next_message_id(&self) -> String {
        format!("projects/{}/messages/{}", self.project_id, Uuid::new_v4())
    }
}

#[async_trait]
impl DeliveryProvider for LogDeliveryProvider {
    fn provider_type(&self) -> &str {
        "log"
    }

    async fn send_single(&self, message: &OutboundMessage) -> Result<String, ProviderError> {
        let message_id = self.next_message_id();
        info!(
            message_id = %message_id,
            title = %message.notification.title,
            event_id = %message.data.event_id,
            "Notification accepted (log provider)"
        );
        Ok(message_id)
    }

    async fn send_multicast(
        &self,
        message: &OutboundMessage,
    ) -> Result<Vec<RecipientOutcome>, ProviderError> {
        info!(
            recipients = message.recipient_count(),
            title = %message.notification.title,
            event_id = %message.data.event_id,
            "Multicast accepted (log provider)"
        );

        Ok(message
            .recipient
            .tokens()
            .iter()
            .map(|_| RecipientOutcome::Delivered {
                message_id: self.next_message_id(),
            })
            .collect())
    }
}
