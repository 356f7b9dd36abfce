// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! REST clients for the Google APIs the provider drives.
//!
//! - [`site_verification`] - Site Verification API v1 (`token`, `webResource`)
//! - [`dns`] - Cloud DNS API v2 (`resourceRecordSets`)
//!
//! Both clients share one request helper. Requests are sent exactly once: a failed
//! call is reported to the caller and never retried.

pub mod dns;
pub mod site_verification;

use crate::auth::Credentials;
use crate::errors::ApiError;
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{error, info, trace};

/// Google JSON error envelope: `{"error": {"code": 404, "message": "..."}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Extract the human readable message from a Google API error body.
///
/// Falls back to the raw body when it is not the standard error envelope.
#[must_use]
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorBody {
                message: Some(message),
            },
        }) if !message.is_empty() => message,
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().to_string(),
    }
}

/// Send a request and decode the JSON response body.
///
/// # Errors
///
/// Returns an error if no token is available, the request fails, the API answers
/// with a non-success status, or the body does not decode as `R`.
pub(crate) async fn send_json<B, R>(
    http: &HttpClient,
    credentials: &Credentials,
    method: Method,
    url: &str,
    body: Option<&B>,
) -> Result<R, ApiError>
where
    B: Serialize + Debug,
    R: DeserializeOwned,
{
    let text = execute(http, credentials, method, url, body).await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

/// Send a request whose response body is not needed.
///
/// # Errors
///
/// Returns an error if no token is available, the request fails, or the API answers
/// with a non-success status.
pub(crate) async fn send_empty(
    http: &HttpClient,
    credentials: &Credentials,
    method: Method,
    url: &str,
) -> Result<(), ApiError> {
    execute::<()>(http, credentials, method, url, None).await?;
    Ok(())
}

/// Perform one authenticated HTTP call and return the raw response body.
async fn execute<B: Serialize + Debug>(
    http: &HttpClient,
    credentials: &Credentials,
    method: Method,
    url: &str,
    body: Option<&B>,
) -> Result<String, ApiError> {
    info!(method = %method, url = %url, "HTTP API request");
    trace!(method = %method, url = %url, body = ?body, "Request");

    let token = credentials.access_token().await?;

    let mut request = http.request(method.clone(), url).bearer_auth(token);
    if let Some(body_data) = body {
        request = request.json(body_data);
    }

    let response = request.send().await.map_err(|e| {
        error!(method = %method, url = %url, error = %e, "HTTP API request failed to send");
        ApiError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            reason: e.to_string(),
        }
    })?;

    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        error!(
            method = %method,
            url = %url,
            status = %status,
            error = %error_text,
            "HTTP API request failed"
        );
        return Err(ApiError::Status {
            method: method.to_string(),
            url: url.to_string(),
            status: status.as_u16(),
            message: error_message(&error_text),
        });
    }

    let text = response.text().await.map_err(|e| ApiError::Transport {
        method: method.to_string(),
        url: url.to_string(),
        reason: format!("failed to read response body: {e}"),
    })?;

    trace!(method = %method, url = %url, status = %status, response = %text, "Response");

    Ok(text)
}
