//! FCM HTTP v1 delivery provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use eventpush_core::config::FcmConfig;
use eventpush_core::traits::delivery::{DeliveryProvider, ProviderError, RecipientOutcome};
use eventpush_core::types::notification::{OutboundMessage, Recipient};

use super::credentials::ServiceAccountKey;
use super::errors::{self, NETWORK_ERROR};
use super::token::{AccessTokenSource, ServiceAccountTokenSource, StaticTokenSource};
use super::wire::{SendRequest, SendResponse};

/// Maximum tokens accepted by one multicast call.
pub const MAX_MULTICAST_TOKENS: usize = 500;

/// Sends messages through the FCM HTTP v1 `messages:send` endpoint.
///
/// A multicast is fanned out as one request per token, at most
/// `max_concurrency` in flight, with outcomes kept in token order.
#[derive(Debug)]
pub struct FcmDeliveryProvider {
    /// Outbound HTTP client.
    http: reqwest::Client,
    /// Bearer token supplier.
    tokens: Arc<dyn AccessTokenSource>,
    /// Target project.
    project_id: String,
    /// Fully qualified `messages:send` URL.
    send_url: String,
    /// Concurrent sends per multicast.
    max_concurrency: usize,
    /// Validate without delivering.
    validate_only: bool,
}

impl FcmDeliveryProvider {
    /// Creates a provider with an explicit token source.
    pub fn new(
        config: &FcmConfig,
        project_id: impl Into<String>,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Result<Self, ProviderError> {
        Self::with_client(build_http_client(config)?, config, project_id, tokens)
    }

    fn with_client(
        http: reqwest::Client,
        config: &FcmConfig,
        project_id: impl Into<String>,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Result<Self, ProviderError> {
        let project_id = project_id.into();
        if project_id.is_empty() {
            return Err(ProviderError::Credentials(
                "FCM project id must not be empty".into(),
            ));
        }

        let send_url = format!(
            "{}/v1/projects/{project_id}/messages:send",
            config.endpoint.trim_end_matches('/')
        );

        Ok(Self {
            http,
            tokens,
            project_id,
            send_url,
            max_concurrency: config.max_concurrency.max(1),
            validate_only: config.dry_run,
        })
    }

    /// Creates a provider from configuration.
    ///
    /// Uses `access_token` when configured, otherwise loads the
    /// service-account key from `credentials_file`.
    pub async fn from_config(config: &FcmConfig) -> Result<Self, ProviderError> {
        let http = build_http_client(config)?;

        if let Some(token) = config.access_token.as_deref().filter(|t| !t.is_empty()) {
            let project_id = config.project_id.clone().ok_or_else(|| {
                ProviderError::Credentials(
                    "delivery.fcm.project_id is required when access_token is set".into(),
                )
            })?;
            info!(project_id = %project_id, "FCM provider using static access token");
            let tokens = Arc::new(StaticTokenSource::new(token));
            return Self::with_client(http, config, project_id, tokens);
        }

        let key = ServiceAccountKey::from_file(&config.credentials_file).await?;
        let project_id = config
            .project_id
            .clone()
            .or_else(|| key.project_id.clone())
            .ok_or_else(|| {
                ProviderError::Credentials(
                    "No project id in configuration or service account key".into(),
                )
            })?;

        info!(
            project_id = %project_id,
            client_email = %key.client_email,
            "FCM provider using service account"
        );

        let tokens = Arc::new(ServiceAccountTokenSource::new(key, http.clone())?);
        Self::with_client(http, config, project_id, tokens)
    }

    /// Target project id.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Sends `message` to one token using an already obtained bearer token.
    async fn send_to(
        &self,
        message: &OutboundMessage,
        token: &str,
        access_token: &str,
    ) -> Result<String, ProviderError> {
        let body = SendRequest::for_token(message, token, self.validate_only);

        let response = self
            .http
            .post(&self.send_url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("FCM request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("Failed to read FCM response: {e}")))?;

        if status.is_success() {
            let sent: SendResponse = serde_json::from_str(&text)
                .map_err(|e| ProviderError::Transport(format!("Invalid FCM response: {e}")))?;
            debug!(message_id = %sent.name, "FCM accepted message");
            return Ok(sent.name);
        }

        let failure = errors::classify(status.as_u16(), &text);
        debug!(status = status.as_u16(), code = failure.code, "FCM rejected message");
        Err(ProviderError::Rejected {
            code: failure.code.to_string(),
            message: failure.message,
        })
    }
}

fn build_http_client(config: &FcmConfig) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .build()
        .map_err(|e| ProviderError::Transport(format!("Failed to build HTTP client: {e}")))
}

fn outcome_for(result: Result<String, ProviderError>) -> RecipientOutcome {
    match result {
        Ok(message_id) => RecipientOutcome::Delivered { message_id },
        Err(ProviderError::Rejected { code, message }) => RecipientOutcome::failed(code, message),
        Err(ProviderError::Transport(message)) => RecipientOutcome::failed(NETWORK_ERROR, message),
        Err(other) => RecipientOutcome::failed(errors::UNKNOWN_ERROR, other.to_string()),
    }
}

#[async_trait]
impl DeliveryProvider for FcmDeliveryProvider {
    fn provider_type(&self) -> &str {
        "fcm"
    }

    async fn send_single(&self, message: &OutboundMessage) -> Result<String, ProviderError> {
        let Recipient::Token(token) = &message.recipient else {
            return Err(ProviderError::InvalidMessage(
                "single send requires exactly one token".into(),
            ));
        };

        let access_token = self.tokens.access_token().await?;
        self.send_to(message, token, &access_token).await
    }

    async fn send_multicast(
        &self,
        message: &OutboundMessage,
    ) -> Result<Vec<RecipientOutcome>, ProviderError> {
        let tokens = message.recipient.tokens();
        if tokens.is_empty() {
            return Err(ProviderError::InvalidMessage(
                "tokens list must not be empty".into(),
            ));
        }
        if tokens.len() > MAX_MULTICAST_TOKENS {
            return Err(ProviderError::InvalidMessage(format!(
                "tokens list must not contain more than {MAX_MULTICAST_TOKENS} items"
            )));
        }

        let access_token = self.tokens.access_token().await?;
        let access_token = access_token.as_str();

        // The stream must not own a closure over `&String`: the trait future has to be Send.
        let sends: Vec<_> = tokens
            .iter()
            .map(|token| async move {
                outcome_for(self.send_to(message, token, access_token).await)
            })
            .collect();

        let outcomes: Vec<RecipientOutcome> = stream::iter(sends)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        if failed > 0 {
            warn!(
                recipients = tokens.len(),
                failed, "FCM multicast completed with failures"
            );
        }

        Ok(outcomes)
    }
}
