//! OAuth2 access tokens for the FCM API.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use eventpush_core::traits::delivery::ProviderError;

use super::credentials::ServiceAccountKey;
use super::wire::{TokenErrorResponse, TokenResponse};

/// OAuth2 scope required to send FCM messages.
pub const MESSAGING_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 300;

/// Supplies bearer tokens for FCM requests.
#[async_trait]
pub trait AccessTokenSource: Send + Sync + fmt::Debug + 'static {
    /// Returns a currently valid access token.
    async fn access_token(&self) -> Result<String, ProviderError>;
}

/// A fixed, pre-issued token.
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenSource")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<String, ProviderError> {
        Ok(self.token.clone())
    }
}

/// Claims of the signed service-account assertion.
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Exchanges a signed service-account assertion for an access token and
/// caches it until shortly before expiry.
pub struct ServiceAccountTokenSource {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: reqwest::Client,
    cache: RwLock<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    /// Creates a token source. Fails if the private key is not valid RSA PEM.
    pub fn new(key: ServiceAccountKey, http: reqwest::Client) -> Result<Self, ProviderError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            ProviderError::Credentials(format!("Invalid service account private key: {e}"))
        })?;

        Ok(Self {
            key,
            encoding_key,
            http,
            cache: RwLock::new(None),
        })
    }

    /// Signs the RS256 assertion sent to the token endpoint.
    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, ProviderError> {
        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: MESSAGING_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ProviderError::Credentials(format!("Failed to sign assertion: {e}")))
    }

    async fn fetch(&self) -> Result<CachedToken, ProviderError> {
        let now = Utc::now();
        let assertion = self.sign_assertion(now)?;

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                ProviderError::Authentication(format!("Failed to reach token endpoint: {e}"))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            ProviderError::Authentication(format!("Failed to read token response: {e}"))
        })?;

        if !status.is_success() {
            let detail = match serde_json::from_str::<TokenErrorResponse>(&text) {
                Ok(err) => match err.error_description {
                    Some(desc) => format!("{}: {desc}", err.error),
                    None => err.error,
                },
                Err(_) => format!("token endpoint returned {status}"),
            };
            return Err(ProviderError::Authentication(format!(
                "Failed to obtain access token: {detail}"
            )));
        }

        let token: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            ProviderError::Authentication(format!("Invalid token response: {e}"))
        })?;

        info!(
            client_email = %self.key.client_email,
            expires_in = token.expires_in,
            "Obtained FCM access token"
        );

        Ok(CachedToken {
            expires_at: expiry(now, token.expires_in)?,
            token: token.access_token,
        })
    }
}

/// Absolute expiry for a token granted at `now` with lifetime `expires_in` seconds.
fn expiry(now: DateTime<Utc>, expires_in: i64) -> Result<DateTime<Utc>, ProviderError> {
    Duration::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            ProviderError::Authentication("Invalid token response: expires_in out of range".into())
        })
}

impl fmt::Debug for ServiceAccountTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountTokenSource")
            .field("client_email", &self.key.client_email)
            .field("token_uri", &self.key.token_uri)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String, ProviderError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref().filter(|c| c.is_fresh(Utc::now())) {
                return Ok(cached.token.clone());
            }
        }

        let mut cache = self.cache.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(cached) = cache.as_ref().filter(|c| c.is_fresh(Utc::now())) {
            return Ok(cached.token.clone());
        }

        debug!("Refreshing FCM access token");
        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *cache = Some(fresh);
        Ok(token)
    }
}
