use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Active delivery provider (`fcm` or `log`).
    pub provider: String,
    pub uptime_seconds: u64,
}
