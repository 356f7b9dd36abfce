// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Service account impersonation via the IAM Credentials API.

use super::{AccessToken, Credentials, TokenSource};
use crate::constants::IMPERSONATION_SCOPES;
use crate::errors::CredentialError;
use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Body of `generateAccessToken`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateAccessTokenRequest<'a> {
    scope: &'a [&'a str],
    lifetime: String,
}

/// Response of `generateAccessToken`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateAccessTokenResponse {
    access_token: String,
    #[serde(default)]
    expire_time: Option<DateTime<Utc>>,
}

/// Exchange `source` credentials for a short-lived token of `service_account`.
///
/// The returned credentials carry a static token with the site verification and
/// Cloud DNS scopes, valid for `duration_secs`. They are not bound to a project.
///
/// # Errors
///
/// Returns an error if the source token cannot be obtained or the RPC fails.
pub async fn impersonate_service_account(
    http: &HttpClient,
    source: &Credentials,
    iam_credentials_base: &str,
    service_account: &str,
    duration_secs: i64,
) -> Result<Credentials, CredentialError> {
    debug!(
        impersonate_service_account = %service_account,
        duration_secs = duration_secs,
        "Attempting to impersonate service account"
    );

    let failed = |reason: String| CredentialError::ImpersonationFailed {
        service_account: service_account.to_string(),
        reason,
    };

    let url = format!(
        "{iam_credentials_base}/projects/-/serviceAccounts/{service_account}:generateAccessToken"
    );
    let body = GenerateAccessTokenRequest {
        scope: IMPERSONATION_SCOPES,
        lifetime: format!("{duration_secs}s"),
    };
    trace!(url = %url, request = ?body, "Request");

    let bearer = source.access_token().await?;
    let response = http
        .post(&url)
        .bearer_auth(bearer)
        .json(&body)
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

    let parsed: GenerateAccessTokenResponse = response
        .json()
        .await
        .map_err(|e| failed(format!("invalid response: {e}")))?;

    trace!(expire_time = ?parsed.expire_time, "Response");

    Ok(Credentials::new(
        TokenSource::Static(AccessToken {
            token: parsed.access_token,
            expires_at: parsed.expire_time,
        }),
        None,
        http.clone(),
    ))
}

#[cfg(test)]
#[path = "impersonate_tests.rs"]
mod impersonate_tests;
