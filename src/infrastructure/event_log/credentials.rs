//! Bearer credentials for the log collector.
//!
//! A [`CredentialProvider`] owns the current token and knows how to obtain a
//! new one. Callers ask for [`CredentialProvider::current`] before each
//! request and call [`CredentialProvider::refresh`] after a 401.

use async_trait::async_trait;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Value, json};
use std::fmt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Tokens expiring within this many seconds are refreshed before use.
pub const REFRESH_WINDOW_SECONDS: i64 = 60;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Auth request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Auth endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Auth response carried no token")]
    MissingToken,
}

/// A bearer token and the expiry read from its JWT claims, if any.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let expires_at = jwt_expiry(&token);
        Self { token, expires_at }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// True when the token expires before `now + window`.
    ///
    /// Tokens without a readable expiry are treated as valid until the
    /// collector rejects them.
    pub fn expires_within(&self, window: Duration, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now + window)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Reads the `exp` claim of a JWT without verifying it.
///
/// The claim may sit at the top level or nested under `MapClaims`.
pub fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;

    let exp = claims
        .get("exp")
        .and_then(Value::as_i64)
        .or_else(|| claims.get("MapClaims")?.get("exp")?.as_i64())?;

    DateTime::from_timestamp(exp, 0)
}

#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns a token usable right now, refreshing first if it is about to
    /// expire.
    async fn current(&self) -> Result<Credential, CredentialError>;

    /// Unconditionally obtains a new token.
    async fn refresh(&self) -> Result<Credential, CredentialError>;
}

/// A fixed token from configuration. Refreshing returns the same token.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credential: Credential,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(token),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn current(&self) -> Result<Credential, CredentialError> {
        Ok(self.credential.clone())
    }

    async fn refresh(&self) -> Result<Credential, CredentialError> {
        Ok(self.credential.clone())
    }
}

/// Obtains tokens by posting client credentials to an auth endpoint.
///
/// The endpoint may answer with either `access_token` or `token`.
pub struct AuthEndpointCredentials {
    client: reqwest::Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
    held: Mutex<Option<Credential>>,
}

impl AuthEndpointCredentials {
    pub fn new(
        client: reqwest::Client,
        auth_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_url: auth_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            held: Mutex::new(None),
        }
    }

    /// Seeds the provider with a token obtained elsewhere.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            held: Mutex::new(Some(Credential::new(token))),
            ..self
        }
    }

    async fn fetch(&self) -> Result<Credential, CredentialError> {
        debug!("Requesting event log token from {}", self.auth_url);

        let response = self
            .client
            .post(&self.auth_url)
            .json(&json!({
                "clientID": self.client_id,
                "clientSecret": self.client_secret,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Event log token refresh failed: {} - {}", status, body);
            return Err(CredentialError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = response.json().await?;
        let token = data
            .get("access_token")
            .or_else(|| data.get("token"))
            .and_then(Value::as_str)
            .ok_or(CredentialError::MissingToken)?;

        info!("Event log token refreshed");
        Ok(Credential::new(token))
    }
}

#[async_trait]
impl CredentialProvider for AuthEndpointCredentials {
    async fn current(&self) -> Result<Credential, CredentialError> {
        let mut held = self.held.lock().await;

        if let Some(credential) = held.as_ref()
            && !credential.expires_within(Duration::seconds(REFRESH_WINDOW_SECONDS), Utc::now())
        {
            return Ok(credential.clone());
        }

        let fresh = self.fetch().await?;
        *held = Some(fresh.clone());
        Ok(fresh)
    }

    async fn refresh(&self) -> Result<Credential, CredentialError> {
        let mut held = self.held.lock().await;
        let fresh = self.fetch().await?;
        *held = Some(fresh.clone());
        Ok(fresh)
    }
}
