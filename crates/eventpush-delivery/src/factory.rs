//! Builds the configured delivery provider.

use std::sync::Arc;

use tracing::info;

use eventpush_core::config::DeliveryConfig;
use eventpush_core::error::{AppError, ErrorKind};
use eventpush_core::result::AppResult;
use eventpush_core::traits::delivery::DeliveryProvider;

use crate::providers::fcm::FcmDeliveryProvider;
use crate::providers::log::LogDeliveryProvider;

/// Project id reported by the log provider when none is configured.
const LOCAL_PROJECT_ID: &str = "local";

/// Creates the provider named by `delivery.provider`.
pub async fn build_provider(config: &DeliveryConfig) -> AppResult<Arc<dyn DeliveryProvider>> {
    let provider: Arc<dyn DeliveryProvider> = match config.provider.as_str() {
        "fcm" => {
            let provider = FcmDeliveryProvider::from_config(&config.fcm)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Configuration,
                        format!("Failed to initialize FCM provider: {e}"),
                        e,
                    )
                })?;
            Arc::new(provider)
        }
        "log" => {
            let project_id = config
                .fcm
                .project_id
                .clone()
                .unwrap_or_else(|| LOCAL_PROJECT_ID.to_string());
            Arc::new(LogDeliveryProvider::new(project_id))
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown delivery provider '{other}', expected 'fcm' or 'log'"
            )));
        }
    };

    info!(provider = provider.provider_type(), "Delivery provider initialized");
    Ok(provider)
}
