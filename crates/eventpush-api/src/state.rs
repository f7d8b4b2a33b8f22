//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use eventpush_core::config::AppConfig;
use eventpush_core::traits::delivery::DeliveryProvider;
use eventpush_dispatch::{BulkNotificationDispatcher, SingleNotificationDispatcher};

/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Single-recipient dispatcher
    pub single: Arc<SingleNotificationDispatcher>,
    /// Multicast dispatcher
    pub bulk: Arc<BulkNotificationDispatcher>,
    /// Name of the active delivery provider
    pub provider_type: Arc<str>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wires both dispatchers to the same provider.
    pub fn new(config: AppConfig, provider: Arc<dyn DeliveryProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider_type: Arc::from(provider.provider_type()),
            single: Arc::new(SingleNotificationDispatcher::new(provider.clone())),
            bulk: Arc::new(BulkNotificationDispatcher::new(provider)),
            started_at: Instant::now(),
        }
    }
}
