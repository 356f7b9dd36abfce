// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Token introspection via the OAuth2 v2 `tokeninfo` endpoint.

use super::Credentials;
use crate::errors::CredentialError;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{trace, warn};
use url::Url;

/// Subset of the `tokeninfo` response used by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    /// Email of the identity the token belongs to
    #[serde(default)]
    pub email: Option<String>,
    /// Space separated scopes granted to the token
    #[serde(default)]
    pub scope: Option<String>,
    /// Seconds until the token expires
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Look up the email of the identity behind `credentials`.
///
/// # Errors
///
/// Returns an error if the token cannot be obtained or the call fails. A token
/// without the `userinfo.email` scope yields an empty email.
pub async fn token_email(
    http: &HttpClient,
    credentials: &Credentials,
    oauth2_base: &str,
) -> Result<String, CredentialError> {
    let failed = |reason: String| CredentialError::TokenInfoFailed { reason };

    let token = credentials.access_token().await?;
    let mut url = Url::parse(&format!("{oauth2_base}/oauth2/v2/tokeninfo"))
        .map_err(|e| failed(format!("invalid endpoint: {e}")))?;
    url.query_pairs_mut().append_pair("access_token", &token);

    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| failed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(failed(format!("HTTP {status}: {text}")));
    }

    let info: TokenInfo = response
        .json()
        .await
        .map_err(|e| failed(format!("invalid response: {e}")))?;
    trace!(email = ?info.email, scope = ?info.scope, expires_in = ?info.expires_in, "Token info");

    match info.email.filter(|email| !email.is_empty()) {
        Some(email) => Ok(email),
        None => {
            warn!(
                scope = ?info.scope,
                "Token info has no email; the token lacks the userinfo.email scope"
            );
            Ok(String::new())
        }
    }
}

#[cfg(test)]
#[path = "tokeninfo_tests.rs"]
mod tokeninfo_tests;
