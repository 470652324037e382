//! Credentials for the Google APIs
//!
//! A ready-made access token, a service-account key, or an OAuth 2.0
//! refresh token. The last two are exchanged for short-lived access tokens
//! on demand.

use crate::sink::http_error;
use crate::{SinkError, SinkResult};
use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Google's OAuth 2.0 token endpoint
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Access requested for service-account tokens
pub const GOOGLE_SCOPES: &str =
    "https://www.googleapis.com/auth/documents https://www.googleapis.com/auth/drive";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for a signed assertion, the maximum Google accepts
const ASSERTION_LIFETIME_SECS: u64 = 3600;

/// Tokens are refreshed this long before they expire
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Where access tokens come from
#[derive(Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// A fixed bearer token
    Static(String),

    /// Service-account key, exchanged through a signed JWT assertion
    ServiceAccount {
        client_email: String,
        private_key: String,
        token_uri: String,
    },

    /// OAuth 2.0 user credentials
    RefreshToken {
        client_id: String,
        client_secret: String,
        refresh_token: String,
    },
}

/// The fields of a Google service-account JSON key that are used here
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Static(_) => f.write_str("TokenSource::Static(..)"),
            TokenSource::ServiceAccount { client_email, .. } => f
                .debug_struct("TokenSource::ServiceAccount")
                .field("client_email", client_email)
                .finish_non_exhaustive(),
            TokenSource::RefreshToken { client_id, .. } => f
                .debug_struct("TokenSource::RefreshToken")
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

impl TokenSource {
    /// Reads credentials from the environment
    ///
    /// Checked in order: `GOOGLE_ACCESS_TOKEN`, then a service-account key
    /// in `GOOGLE_CREDENTIALS_JSON`, then `GCP_CLIENT_ID`,
    /// `GCP_CLIENT_SECRET` and `GCP_REFRESH_TOKEN`, which must all be present.
    pub fn from_env() -> SinkResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`TokenSource::from_env`] with an injectable variable lookup
    pub fn from_lookup<L>(lookup: L) -> SinkResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(token) = read("GOOGLE_ACCESS_TOKEN") {
            return Ok(TokenSource::Static(token));
        }

        if let Some(json) = read("GOOGLE_CREDENTIALS_JSON") {
            return Self::from_service_account_json(&json);
        }

        match (
            read("GCP_CLIENT_ID"),
            read("GCP_CLIENT_SECRET"),
            read("GCP_REFRESH_TOKEN"),
        ) {
            (Some(client_id), Some(client_secret), Some(refresh_token)) => {
                Ok(TokenSource::RefreshToken {
                    client_id,
                    client_secret,
                    refresh_token,
                })
            }
            _ => Err(SinkError::Credentials(
                "set GOOGLE_ACCESS_TOKEN, GOOGLE_CREDENTIALS_JSON, or GCP_CLIENT_ID, GCP_CLIENT_SECRET and GCP_REFRESH_TOKEN"
                    .to_string(),
            )),
        }
    }

    /// Parses a service-account JSON key
    pub fn from_service_account_json(json: &str) -> SinkResult<Self> {
        let key: ServiceAccountKey = serde_json::from_str(json)
            .map_err(|e| SinkError::Credentials(format!("invalid service account key: {}", e)))?;

        Ok(TokenSource::ServiceAccount {
            client_email: key.client_email,
            private_key: key.private_key,
            token_uri: key.token_uri,
        })
    }
}

/// Signs the JWT assertion exchanged for a service-account access token
fn sign_assertion(client_email: &str, private_key: &str, audience: &str) -> SinkResult<String> {
    let key = EncodingKey::from_rsa_pem(private_key.as_bytes())
        .map_err(|e| SinkError::Credentials(format!("invalid service account private key: {}", e)))?;

    let iat = get_current_timestamp();
    let claims = AssertionClaims {
        iss: client_email,
        scope: GOOGLE_SCOPES,
        aud: audience,
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    };

    encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| SinkError::Credentials(format!("cannot sign assertion: {}", e)))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Hands out bearer tokens, caching refreshed ones until shortly before expiry
pub struct TokenProvider {
    client: Client,
    source: TokenSource,
    token_url: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// Creates a provider
    ///
    /// Service-account keys use the token endpoint named in the key; other
    /// sources use Google's.
    pub fn new(client: Client, source: TokenSource) -> Self {
        let token_url = match &source {
            TokenSource::ServiceAccount { token_uri, .. } => token_uri.clone(),
            _ => GOOGLE_TOKEN_URL.to_string(),
        };

        Self {
            client,
            source,
            token_url,
            cached: Mutex::new(None),
        }
    }

    /// Overrides the token endpoint
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Returns a valid access token
    pub async fn access_token(&self) -> SinkResult<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() + REFRESH_MARGIN {
                return Ok(token.value.clone());
            }
        }

        let form: Vec<(&str, String)> = match &self.source {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::ServiceAccount {
                client_email,
                private_key,
                token_uri,
            } => {
                tracing::debug!("Requesting access token for {}", client_email);
                vec![
                    ("grant_type", JWT_BEARER_GRANT.to_string()),
                    ("assertion", sign_assertion(client_email, private_key, token_uri)?),
                ]
            }
            TokenSource::RefreshToken {
                client_id,
                client_secret,
                refresh_token,
            } => {
                tracing::debug!("Refreshing access token");
                vec![
                    ("grant_type", "refresh_token".to_string()),
                    ("client_id", client_id.clone()),
                    ("client_secret", client_secret.clone()),
                    ("refresh_token", refresh_token.clone()),
                ]
            }
        };

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(http_error(&self.token_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Credentials(format!(
                "token exchange failed with HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SinkError::Decode(format!("token response: {}", e)))?;

        let fresh = CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        };
        let value = fresh.value.clone();
        *cached = Some(fresh);

        Ok(value)
    }
}
