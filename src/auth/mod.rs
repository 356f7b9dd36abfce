// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Google credential resolution.
//!
//! This module turns the ambient environment into bearer tokens for the remote APIs:
//!
//! - [`adc`] - Application Default Credentials discovery (static token, credentials
//!   file, gcloud well-known file, metadata server)
//! - [`impersonate`] - exchanging ambient credentials for a short-lived token of
//!   another service account via the IAM Credentials API
//! - [`tokeninfo`] - resolving the email behind an access token
//!
//! # Architecture
//!
//! A [`Credentials`] value is a cheap, cloneable handle on a token provider. Tokens are
//! fetched lazily on first use and reused until shortly before they expire; the cache
//! is the only mutable state shared by the API clients.
//!
//! # Example
//!
//! ```rust,no_run
//! use gsv_provider::auth::{adc::{find_default_credentials, AmbientEnvironment}, Credentials};
//! use gsv_provider::config::Endpoints;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let http = reqwest::Client::new();
//! let creds: Credentials = find_default_credentials(
//!     &http,
//!     &Endpoints::default(),
//!     &AmbientEnvironment::from_process(),
//! )
//! .await?;
//! let token = creds.access_token().await?;
//! # Ok(())
//! # }
//! ```

pub mod adc;
pub mod impersonate;
pub mod tokeninfo;

use crate::constants::{
    JWT_ASSERTION_LIFETIME_SECS, JWT_BEARER_GRANT_TYPE, METADATA_FLAVOR_HEADER,
    METADATA_FLAVOR_VALUE, REFRESH_TOKEN_GRANT_TYPE, TOKEN_EXPIRY_MARGIN_SECS,
};
use crate::errors::CredentialError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace};
use url::form_urlencoded;

/// An OAuth2 access token and its expiry.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Bearer token value
    pub token: String,
    /// When the token stops being valid; `None` if unknown
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Whether the token can still be used at `now`, keeping a safety margin.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            None => true,
            Some(expires_at) => expires_at - Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) > now,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Where access tokens come from.
#[derive(Clone)]
pub enum TokenSource {
    /// A fixed token (environment-provided or impersonated)
    Static(AccessToken),
    /// gcloud user credentials, exchanged with a refresh token grant
    AuthorizedUser {
        /// OAuth2 client ID
        client_id: String,
        /// OAuth2 client secret
        client_secret: String,
        /// Long-lived refresh token
        refresh_token: String,
        /// Token endpoint
        token_uri: String,
    },
    /// Service account key, exchanged with a signed JWT-bearer grant
    ServiceAccount {
        /// Service account email, the JWT issuer
        client_email: String,
        /// PEM encoded RSA private key
        private_key: String,
        /// Key ID placed in the JWT header
        private_key_id: Option<String>,
        /// Token endpoint, also the JWT audience
        token_uri: String,
        /// Scopes requested in the assertion
        scopes: Vec<String>,
    },
    /// GCE/GKE metadata server
    Metadata {
        /// Metadata server base URL
        base_url: String,
        /// Scopes requested from the metadata server
        scopes: Vec<String>,
    },
}

impl TokenSource {
    /// Short name of the source, safe to log.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::AuthorizedUser { .. } => "authorized_user",
            Self::ServiceAccount { .. } => "service_account",
            Self::Metadata { .. } => "metadata",
        }
    }
}

impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceAccount { client_email, .. } => f
                .debug_struct("ServiceAccount")
                .field("client_email", client_email)
                .finish_non_exhaustive(),
            Self::Metadata { base_url, .. } => f
                .debug_struct("Metadata")
                .field("base_url", base_url)
                .finish_non_exhaustive(),
            other => f.write_str(other.kind()),
        }
    }
}

/// Cloneable handle on a token source bound to an optional project.
#[derive(Clone)]
pub struct Credentials {
    project_id: Option<String>,
    provider: Arc<TokenProvider>,
}

struct TokenProvider {
    source: TokenSource,
    http: HttpClient,
    cached: Mutex<Option<AccessToken>>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("project_id", &self.project_id)
            .field("source", &self.provider.source)
            .finish()
    }
}

impl Credentials {
    /// Create credentials from a token source.
    #[must_use]
    pub fn new(source: TokenSource, project_id: Option<String>, http: HttpClient) -> Self {
        Self {
            project_id,
            provider: Arc::new(TokenProvider {
                source,
                http,
                cached: Mutex::new(None),
            }),
        }
    }

    /// Credentials that always present the given bearer token.
    #[must_use]
    pub fn from_access_token(token: impl Into<String>, project_id: Option<String>) -> Self {
        Self::new(
            TokenSource::Static(AccessToken {
                token: token.into(),
                expires_at: None,
            }),
            project_id,
            HttpClient::new(),
        )
    }

    /// Project associated with these credentials, if known.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Same token source bound to a different project.
    #[must_use]
    pub fn with_project_id(&self, project_id: Option<String>) -> Self {
        Self {
            project_id,
            provider: Arc::clone(&self.provider),
        }
    }

    /// The underlying token source.
    #[must_use]
    pub fn source(&self) -> &TokenSource {
        &self.provider.source
    }

    /// Return a valid access token, fetching a new one if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a token grant fails.
    pub async fn access_token(&self) -> Result<String, CredentialError> {
        let mut cached = self.provider.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.token.clone());
            }
        }

        debug!(
            source = self.provider.source.kind(),
            "Fetching new access token"
        );
        let token = self.provider.fetch().await?;
        let value = token.token.clone();
        *cached = Some(token);
        Ok(value)
    }
}

/// Token endpoint and metadata server response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Claims of the service account JWT-bearer assertion.
#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

impl TokenProvider {
    async fn fetch(&self) -> Result<AccessToken, CredentialError> {
        match &self.source {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::AuthorizedUser {
                client_id,
                client_secret,
                refresh_token,
                token_uri,
            } => {
                let body = form_urlencoded::Serializer::new(String::new())
                    .append_pair("grant_type", REFRESH_TOKEN_GRANT_TYPE)
                    .append_pair("client_id", client_id)
                    .append_pair("client_secret", client_secret)
                    .append_pair("refresh_token", refresh_token)
                    .finish();
                self.exchange_form(token_uri, body).await
            }
            TokenSource::ServiceAccount {
                client_email,
                private_key,
                private_key_id,
                token_uri,
                scopes,
            } => {
                let assertion = sign_assertion(
                    client_email,
                    private_key,
                    private_key_id.as_deref(),
                    token_uri,
                    scopes,
                )?;
                let body = form_urlencoded::Serializer::new(String::new())
                    .append_pair("grant_type", JWT_BEARER_GRANT_TYPE)
                    .append_pair("assertion", &assertion)
                    .finish();
                self.exchange_form(token_uri, body).await
            }
            TokenSource::Metadata { base_url, scopes } => {
                let mut url = format!(
                    "{base_url}/computeMetadata/v1/instance/service-accounts/default/token"
                );
                if !scopes.is_empty() {
                    let query = form_urlencoded::Serializer::new(String::new())
                        .append_pair("scopes", &scopes.join(","))
                        .finish();
                    url = format!("{url}?{query}");
                }
                let request = self
                    .http
                    .get(&url)
                    .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE);
                send_token_request(request, &url).await
            }
        }
    }

    async fn exchange_form(&self, url: &str, body: String) -> Result<AccessToken, CredentialError> {
        let request = self
            .http
            .post(url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body);
        send_token_request(request, url).await
    }
}

/// Send a token request and parse the standard OAuth2 token response.
async fn send_token_request(
    request: reqwest::RequestBuilder,
    url: &str,
) -> Result<AccessToken, CredentialError> {
    let response = request
        .send()
        .await
        .map_err(|e| CredentialError::TokenRequestFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(CredentialError::TokenRequestFailed {
            url: url.to_string(),
            reason: format!("HTTP {status}: {body}"),
        });
    }

    let parsed: TokenResponse =
        response
            .json()
            .await
            .map_err(|e| CredentialError::TokenRequestFailed {
                url: url.to_string(),
                reason: format!("invalid token response: {e}"),
            })?;

    trace!(url = %url, expires_in = ?parsed.expires_in, "Token response");

    Ok(AccessToken {
        token: parsed.access_token,
        expires_at: parsed
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs)),
    })
}

/// Build and sign the RS256 JWT assertion for a service account.
fn sign_assertion(
    client_email: &str,
    private_key: &str,
    private_key_id: Option<&str>,
    token_uri: &str,
    scopes: &[String],
) -> Result<String, CredentialError> {
    let signing_error = |reason: String| CredentialError::AssertionSigningFailed {
        client_email: client_email.to_string(),
        reason,
    };

    let now = u64::try_from(Utc::now().timestamp())
        .map_err(|_| signing_error("system clock is before the Unix epoch".to_string()))?;

    let claims = AssertionClaims {
        iss: client_email,
        scope: scopes.join(" "),
        aud: token_uri,
        iat: now,
        exp: now + JWT_ASSERTION_LIFETIME_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = private_key_id.map(str::to_string);

    let key = EncodingKey::from_rsa_pem(private_key.as_bytes())
        .map_err(|e| signing_error(format!("failed to parse private key: {e}")))?;

    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| signing_error(format!("failed to encode JWT: {e}")))
}
