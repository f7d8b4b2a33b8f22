//! Push delivery provider configuration.

use serde::{Deserialize, Serialize};

/// Selects and configures the push delivery provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Provider name: `"fcm"` or `"log"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Firebase Cloud Messaging settings.
    #[serde(default)]
    pub fcm: FcmConfig,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            fcm: FcmConfig::default(),
        }
    }
}

/// Firebase Cloud Messaging (HTTP v1) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FcmConfig {
    /// Path to the Google service-account JSON key.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: String,
    /// Overrides the `project_id` found in the service-account key.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Base URL of the FCM API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Pre-issued OAuth2 access token. When set, no service-account
    /// exchange is performed (emulators, local testing).
    #[serde(default)]
    pub access_token: Option<String>,
    /// Timeout for each outbound HTTP request in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Maximum in-flight sends during a multicast.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Ask FCM to validate messages without delivering them.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            credentials_file: default_credentials_file(),
            project_id: None,
            endpoint: default_endpoint(),
            access_token: None,
            request_timeout_seconds: default_request_timeout(),
            max_concurrency: default_max_concurrency(),
            dry_run: false,
        }
    }
}

fn default_provider() -> String {
    "fcm".to_string()
}

fn default_credentials_file() -> String {
    "config/service-account.json".to_string()
}

fn default_endpoint() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_concurrency() -> usize {
    16
}
