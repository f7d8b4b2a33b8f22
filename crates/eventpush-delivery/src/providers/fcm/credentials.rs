//! Google service-account key loading.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use eventpush_core::traits::delivery::ProviderError;

/// Fields of a Google service-account JSON key used by the relay.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// Key type, `"service_account"` for valid keys.
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    /// Firebase / GCP project id.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Id of the signing key, sent as the JWT `kid`.
    #[serde(default)]
    pub private_key_id: Option<String>,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    /// Service account e-mail, the assertion issuer.
    pub client_email: String,
    /// OAuth2 token endpoint.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Parses a key from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        let key: Self = serde_json::from_str(json)
            .map_err(|e| ProviderError::Credentials(format!("Invalid service account key: {e}")))?;

        if let Some(kind) = &key.key_type {
            if kind != "service_account" {
                return Err(ProviderError::Credentials(format!(
                    "Unsupported credential type '{kind}', expected 'service_account'"
                )));
            }
        }

        Ok(key)
    }

    /// Reads and parses a key file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            ProviderError::Credentials(format!(
                "Failed to read service account key '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}
