// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Site Verification API v1 client.

use super::{send_empty, send_json};
use crate::auth::Credentials;
use crate::errors::ApiError;
use crate::identifiers::encode_id;
use reqwest::{Client as HttpClient, Method};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::form_urlencoded;

/// The site a token or registration refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResourceSite {
    /// Domain name or URL
    pub identifier: String,
    /// `INET_DOMAIN` or `SITE`
    #[serde(rename = "type")]
    pub site_type: String,
}

/// Body of `token`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTokenRequest {
    /// Site to issue a token for
    pub site: WebResourceSite,
    /// How the token will be placed
    pub verification_method: String,
}

/// Response of `token`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTokenResponse {
    /// Echo of the requested method
    #[serde(default)]
    pub method: Option<String>,
    /// The verification token
    pub token: String,
}

/// A verified site registration, as sent and returned by `webResource`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResource {
    /// Remote ID, escaped (e.g. `dns%3A%2F%2Fexample.com`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Site descriptor; omitted when patching
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<WebResourceSite>,
    /// Verified owners; omitted when not managed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owners: Option<Vec<String>>,
}

/// Client for `https://www.googleapis.com/siteVerification/v1`.
#[derive(Debug, Clone)]
pub struct SiteVerificationClient {
    http: HttpClient,
    credentials: Credentials,
    base_url: String,
}

impl SiteVerificationClient {
    /// Create a client. `base_url` has no trailing slash.
    #[must_use]
    pub fn new(http: HttpClient, credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            http,
            credentials,
            base_url: base_url.into(),
        }
    }

    fn web_resource_url(&self, id: &str) -> String {
        format!("{}/webResource/{}", self.base_url, encode_id(id))
    }

    /// Issue a verification token for a site.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn get_token(
        &self,
        site: WebResourceSite,
        verification_method: &str,
    ) -> Result<GetTokenResponse, ApiError> {
        let url = format!("{}/token", self.base_url);
        let request = GetTokenRequest {
            site,
            verification_method: verification_method.to_string(),
        };
        debug!(site = %request.site.identifier, method = %verification_method, "Requesting verification token");
        send_json(
            &self.http,
            &self.credentials,
            Method::POST,
            &url,
            Some(&request),
        )
        .await
    }

    /// Verify ownership of a site and register it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails, including when the site cannot be
    /// verified yet.
    pub async fn insert(
        &self,
        verification_method: &str,
        resource: &WebResource,
    ) -> Result<WebResource, ApiError> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("verificationMethod", verification_method)
            .finish();
        let url = format!("{}/webResource?{query}", self.base_url);
        send_json(
            &self.http,
            &self.credentials,
            Method::POST,
            &url,
            Some(resource),
        )
        .await
    }

    /// Fetch a registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails; a missing registration is
    /// [`ApiError::is_not_found`].
    pub async fn get(&self, id: &str) -> Result<WebResource, ApiError> {
        let url = self.web_resource_url(id);
        send_json::<(), _>(&self.http, &self.credentials, Method::GET, &url, None).await
    }

    /// Modify the owner list of a registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn patch(&self, id: &str, resource: &WebResource) -> Result<WebResource, ApiError> {
        let url = self.web_resource_url(id);
        send_json(
            &self.http,
            &self.credentials,
            Method::PATCH,
            &url,
            Some(resource),
        )
        .await
    }

    /// Relinquish ownership of a site.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.web_resource_url(id);
        send_empty(&self.http, &self.credentials, Method::DELETE, &url).await
    }
}

#[cfg(test)]
#[path = "site_verification_tests.rs"]
mod site_verification_tests;
