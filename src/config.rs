// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider configuration.
//!
//! The provider accepts three configuration-level inputs:
//!
//! - `project` - project to manage DNS records in; defaults to the ambient project
//! - `impersonate_service_account` - service account email to act as, if any
//! - `token_duration` - lifetime in seconds of the impersonated token (default 3600)
//!
//! plus an optional `endpoints` table overriding the base URL of each remote API.
//! Configuration is read from a YAML or JSON file and/or command line flags.
//!
//! # Example
//!
//! ```yaml
//! project: my-dns-project
//! impersonate_service_account: verifier@my-project.iam.gserviceaccount.com
//! token_duration: 1800
//! endpoints:
//!   dns: https://dns.googleapis.com/dns/v2
//! ```

use crate::constants::{
    DEFAULT_DNS_ENDPOINT, DEFAULT_IAM_CREDENTIALS_ENDPOINT, DEFAULT_METADATA_ENDPOINT,
    DEFAULT_OAUTH2_ENDPOINT, DEFAULT_SITE_VERIFICATION_ENDPOINT, DEFAULT_TOKEN_DURATION_SECS,
    ENV_DNS_ENDPOINT, ENV_IAM_CREDENTIALS_ENDPOINT, ENV_METADATA_HOST, ENV_OAUTH2_ENDPOINT,
    ENV_SITE_VERIFICATION_ENDPOINT,
};
use crate::errors::CredentialError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Provider-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Project override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Service account email to impersonate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impersonate_service_account: Option<String>,

    /// Lifetime of the impersonated token in seconds
    #[serde(
        default,
        alias = "token_duration_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub token_duration: Option<i64>,

    /// Base URL overrides for the remote APIs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<EndpointOverrides>,
}

impl ProviderConfig {
    /// Load configuration from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not match the schema.
    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CredentialError::InvalidConfiguration {
                reason: format!("failed to read {}: {e}", path.display()),
            })?;
        serde_yaml::from_str(&content).map_err(|e| CredentialError::InvalidConfiguration {
            reason: format!("failed to parse {}: {e}", path.display()),
        })
    }

    /// Overlay values that are set in `other` on top of this configuration.
    #[must_use]
    pub fn merged_with(mut self, other: ProviderConfig) -> Self {
        if other.project.is_some() {
            self.project = other.project;
        }
        if other.impersonate_service_account.is_some() {
            self.impersonate_service_account = other.impersonate_service_account;
        }
        if other.token_duration.is_some() {
            self.token_duration = other.token_duration;
        }
        if other.endpoints.is_some() {
            self.endpoints = other.endpoints;
        }
        self
    }

    /// Token lifetime to request when impersonating.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured duration is not positive.
    pub fn token_duration_secs(&self) -> Result<i64, CredentialError> {
        match self.token_duration {
            None => Ok(DEFAULT_TOKEN_DURATION_SECS),
            Some(secs) if secs > 0 => Ok(secs),
            Some(secs) => Err(CredentialError::InvalidConfiguration {
                reason: format!("token_duration must be a positive number of seconds, got {secs}"),
            }),
        }
    }

    /// Configured project with surrounding whitespace removed, if non-empty.
    #[must_use]
    pub fn project_override(&self) -> Option<&str> {
        self.project
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Optional base URL overrides, as written in configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointOverrides {
    /// Site Verification API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_verification: Option<String>,
    /// Cloud DNS API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<String>,
    /// IAM Credentials API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iam_credentials: Option<String>,
    /// OAuth2 token introspection base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth2: Option<String>,
    /// Metadata server base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// Resolved base URLs of every remote API, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Site Verification API v1
    pub site_verification: String,
    /// Cloud DNS API v2
    pub dns: String,
    /// IAM Credentials API v1
    pub iam_credentials: String,
    /// Host of the OAuth2 v2 tokeninfo endpoint
    pub oauth2: String,
    /// GCE metadata server
    pub metadata: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            site_verification: DEFAULT_SITE_VERIFICATION_ENDPOINT.to_string(),
            dns: DEFAULT_DNS_ENDPOINT.to_string(),
            iam_credentials: DEFAULT_IAM_CREDENTIALS_ENDPOINT.to_string(),
            oauth2: DEFAULT_OAUTH2_ENDPOINT.to_string(),
            metadata: DEFAULT_METADATA_ENDPOINT.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every API at one base URL. Used against mock servers.
    #[must_use]
    pub fn all(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            site_verification: base.clone(),
            dns: base.clone(),
            iam_credentials: base.clone(),
            oauth2: base.clone(),
            metadata: base,
        }
    }

    /// Resolve endpoints from the process environment and configuration.
    ///
    /// Configuration wins over the environment, which wins over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any resulting endpoint is not an absolute URL.
    pub fn resolve(overrides: Option<&EndpointOverrides>) -> Result<Self, CredentialError> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolve endpoints with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if any resulting endpoint is not an absolute URL.
    pub fn resolve_with<F>(
        overrides: Option<&EndpointOverrides>,
        lookup: F,
    ) -> Result<Self, CredentialError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut endpoints = Self::default();
        let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = env(ENV_SITE_VERIFICATION_ENDPOINT) {
            endpoints.site_verification = v;
        }
        if let Some(v) = env(ENV_DNS_ENDPOINT) {
            endpoints.dns = v;
        }
        if let Some(v) = env(ENV_IAM_CREDENTIALS_ENDPOINT) {
            endpoints.iam_credentials = v;
        }
        if let Some(v) = env(ENV_OAUTH2_ENDPOINT) {
            endpoints.oauth2 = v;
        }
        if let Some(host) = env(ENV_METADATA_HOST) {
            endpoints.metadata = build_base_url(&host);
        }

        if let Some(o) = overrides {
            if let Some(v) = &o.site_verification {
                endpoints.site_verification.clone_from(v);
            }
            if let Some(v) = &o.dns {
                endpoints.dns.clone_from(v);
            }
            if let Some(v) = &o.iam_credentials {
                endpoints.iam_credentials.clone_from(v);
            }
            if let Some(v) = &o.oauth2 {
                endpoints.oauth2.clone_from(v);
            }
            if let Some(v) = &o.metadata {
                endpoints.metadata.clone_from(v);
            }
        }

        for endpoint in [
            &mut endpoints.site_verification,
            &mut endpoints.dns,
            &mut endpoints.iam_credentials,
            &mut endpoints.oauth2,
            &mut endpoints.metadata,
        ] {
            Url::parse(endpoint).map_err(|e| CredentialError::InvalidConfiguration {
                reason: format!("invalid endpoint '{endpoint}': {e}"),
            })?;
            let trimmed = endpoint.trim_end_matches('/').to_string();
            *endpoint = trimmed;
        }

        Ok(endpoints)
    }
}

/// Build a base URL from a host that may lack a scheme.
///
/// Converts "metadata.google.internal" or "127.0.0.1:8080" to
/// `<http://metadata.google.internal>` or `<http://127.0.0.1:8080>`.
#[must_use]
pub fn build_base_url(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", host.trim_end_matches('/'))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
