//! Scripted delivery provider for dispatcher tests.

use std::sync::Mutex;

use async_trait::async_trait;

use eventpush_core::traits::delivery::{DeliveryProvider, ProviderError, RecipientOutcome};
use eventpush_core::types::notification::OutboundMessage;

#[derive(Debug)]
pub(crate) struct ScriptedProvider {
    message_id: String,
    failure: Option<ProviderError>,
    rejected_tokens: Vec<String>,
    drop_last_outcome: bool,
    sent: Mutex<Vec<OutboundMessage>>,
}

impl ScriptedProvider {
    pub(crate) fn with_message_id(id: &str) -> Self {
        Self {
            message_id: id.to_string(),
            failure: None,
            rejected_tokens: Vec::new(),
            drop_last_outcome: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(err: ProviderError) -> Self {
        Self {
            failure: Some(err),
            ..Self::with_message_id("unused")
        }
    }

    pub(crate) fn rejecting(tokens: &[&str]) -> Self {
        Self {
            rejected_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            ..Self::with_message_id("m")
        }
    }

    pub(crate) fn dropping_last_outcome() -> Self {
        Self {
            drop_last_outcome: true,
            ..Self::with_message_id("m")
        }
    }

    pub(crate) fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    fn record(&self, message: &OutboundMessage) {
        self.sent.lock().unwrap().push(message.clone());
    }
}

#[async_trait]
impl DeliveryProvider for ScriptedProvider {
    fn provider_type(&self) -> &str {
        "scripted"
    }

    async fn send_single(&self, message: &OutboundMessage) -> Result<String, ProviderError> {
        self.record(message);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.message_id.clone()),
        }
    }

    async fn send_multicast(
        &self,
        message: &OutboundMessage,
    ) -> Result<Vec<RecipientOutcome>, ProviderError> {
        self.record(message);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let mut outcomes: Vec<RecipientOutcome> = message
            .recipient
            .tokens()
            .iter()
            .enumerate()
            .map(|(i, token)| {
                if self.rejected_tokens.contains(token) {
                    RecipientOutcome::failed(
                        "messaging/registration-token-not-registered",
                        "Requested entity was not found.",
                    )
                } else {
                    RecipientOutcome::Delivered {
                        message_id: format!("{}-{i}", self.message_id),
                    }
                }
            })
            .collect();

        if self.drop_last_outcome {
            outcomes.pop();
        }
        Ok(outcomes)
    }
}
