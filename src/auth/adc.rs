// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Application Default Credentials discovery.
//!
//! Sources are tried in order and the first one present wins:
//!
//! 1. `GOOGLE_OAUTH_ACCESS_TOKEN` - a static bearer token
//! 2. `GOOGLE_APPLICATION_CREDENTIALS` - path to a credentials JSON file
//! 3. the gcloud well-known file `application_default_credentials.json`
//! 4. the GCE/GKE metadata server
//!
//! A source that is present but broken (unreadable file, unsupported type) is an
//! error; discovery does not fall through to the next source.

use super::{Credentials, TokenSource};
use crate::config::Endpoints;
use crate::constants::{
    AMBIENT_SCOPES, DEFAULT_TOKEN_URI, ENV_APPLICATION_CREDENTIALS, ENV_CLOUDSDK_CONFIG,
    ENV_OAUTH_ACCESS_TOKEN, ENV_PROJECT_VARS, METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE,
    METADATA_PROBE_TIMEOUT_SECS, WELL_KNOWN_CREDENTIALS_FILE,
};
use crate::errors::CredentialError;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Snapshot of the environment variables that influence credential discovery.
#[derive(Debug, Clone, Default)]
pub struct AmbientEnvironment {
    /// `GOOGLE_OAUTH_ACCESS_TOKEN`
    pub access_token: Option<String>,
    /// `GOOGLE_APPLICATION_CREDENTIALS`
    pub credentials_file: Option<PathBuf>,
    /// `CLOUDSDK_CONFIG`
    pub gcloud_config_dir: Option<PathBuf>,
    /// `HOME`
    pub home: Option<PathBuf>,
    /// `APPDATA` (Windows)
    pub appdata: Option<PathBuf>,
    /// First of `GOOGLE_CLOUD_PROJECT`, `GCLOUD_PROJECT`, `CLOUDSDK_CORE_PROJECT`
    pub project: Option<String>,
}

impl AmbientEnvironment {
    /// Capture the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        Self {
            access_token: var(ENV_OAUTH_ACCESS_TOKEN),
            credentials_file: var(ENV_APPLICATION_CREDENTIALS).map(PathBuf::from),
            gcloud_config_dir: var(ENV_CLOUDSDK_CONFIG).map(PathBuf::from),
            home: var("HOME").map(PathBuf::from),
            appdata: var("APPDATA").map(PathBuf::from),
            project: ENV_PROJECT_VARS.iter().find_map(|name| var(name)),
        }
    }

    /// Location of the gcloud application default credentials file.
    #[must_use]
    pub fn well_known_file(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.gcloud_config_dir {
            return Some(dir.join(WELL_KNOWN_CREDENTIALS_FILE));
        }
        if cfg!(windows) {
            return self
                .appdata
                .as_ref()
                .map(|dir| dir.join("gcloud").join(WELL_KNOWN_CREDENTIALS_FILE));
        }
        self.home.as_ref().map(|home| {
            home.join(".config")
                .join("gcloud")
                .join(WELL_KNOWN_CREDENTIALS_FILE)
        })
    }
}

/// `service_account` credentials file.
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default)]
    private_key_id: Option<String>,
    #[serde(default)]
    token_uri: Option<String>,
    #[serde(default)]
    project_id: Option<String>,
}

/// `authorized_user` credentials file, as written by `gcloud auth application-default login`.
#[derive(Debug, Deserialize)]
struct AuthorizedUserKey {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(default)]
    token_uri: Option<String>,
    #[serde(default)]
    quota_project_id: Option<String>,
}

/// Find ambient credentials.
///
/// # Errors
///
/// Returns an error if no source is present, or the first present source is unusable.
pub async fn find_default_credentials(
    http: &HttpClient,
    endpoints: &Endpoints,
    env: &AmbientEnvironment,
) -> Result<Credentials, CredentialError> {
    if let Some(token) = &env.access_token {
        info!("Using access token from {}", ENV_OAUTH_ACCESS_TOKEN);
        return Ok(Credentials::from_access_token(token.clone(), env.project.clone()));
    }

    if let Some(path) = &env.credentials_file {
        info!(path = %path.display(), "Using credentials file from {}", ENV_APPLICATION_CREDENTIALS);
        return credentials_from_file(path, env.project.clone(), http);
    }

    if let Some(path) = env.well_known_file() {
        if path.is_file() {
            info!(path = %path.display(), "Using gcloud application default credentials");
            return credentials_from_file(&path, env.project.clone(), http);
        }
        debug!(path = %path.display(), "No gcloud application default credentials file");
    }

    match probe_metadata_project(http, &endpoints.metadata).await {
        Ok(project) => {
            info!(project = %project, "Using metadata server credentials");
            Ok(Credentials::new(
                TokenSource::Metadata {
                    base_url: endpoints.metadata.clone(),
                    scopes: AMBIENT_SCOPES.iter().map(|s| (*s).to_string()).collect(),
                },
                env.project.clone().or(Some(project)),
                http.clone(),
            ))
        }
        Err(reason) => Err(CredentialError::DefaultCredentialsNotFound {
            reason: format!(
                "{ENV_OAUTH_ACCESS_TOKEN} and {ENV_APPLICATION_CREDENTIALS} are unset, \
                 no gcloud credentials file was found, and the metadata server is \
                 unavailable ({reason})"
            ),
        }),
    }
}

/// Load credentials from a JSON credentials file.
///
/// `fallback_project` is used when the file does not name a project.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not JSON, or has an unsupported type.
pub fn credentials_from_file(
    path: &Path,
    fallback_project: Option<String>,
    http: &HttpClient,
) -> Result<Credentials, CredentialError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| CredentialError::CredentialsFileUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    credentials_from_json(&content, &path.display().to_string(), fallback_project, http)
}

/// Parse credentials from the contents of a credentials file.
///
/// `origin` names the file in error messages.
///
/// # Errors
///
/// Returns an error if the content is not JSON or has an unsupported type.
pub fn credentials_from_json(
    content: &str,
    origin: &str,
    fallback_project: Option<String>,
    http: &HttpClient,
) -> Result<Credentials, CredentialError> {
    let unreadable = |reason: String| CredentialError::CredentialsFileUnreadable {
        path: origin.to_string(),
        reason,
    };

    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| unreadable(e.to_string()))?;
    let kind = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string();

    match kind.as_str() {
        "service_account" => {
            let key: ServiceAccountKey =
                serde_json::from_value(value).map_err(|e| unreadable(e.to_string()))?;
            debug!(client_email = %key.client_email, "Loaded service account key");
            Ok(Credentials::new(
                TokenSource::ServiceAccount {
                    client_email: key.client_email,
                    private_key: key.private_key,
                    private_key_id: key.private_key_id,
                    token_uri: key
                        .token_uri
                        .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
                    scopes: AMBIENT_SCOPES.iter().map(|s| (*s).to_string()).collect(),
                },
                key.project_id.or(fallback_project),
                http.clone(),
            ))
        }
        "authorized_user" => {
            let key: AuthorizedUserKey =
                serde_json::from_value(value).map_err(|e| unreadable(e.to_string()))?;
            debug!(client_id = %key.client_id, "Loaded authorized user credentials");
            Ok(Credentials::new(
                TokenSource::AuthorizedUser {
                    client_id: key.client_id,
                    client_secret: key.client_secret,
                    refresh_token: key.refresh_token,
                    token_uri: key
                        .token_uri
                        .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string()),
                },
                key.quota_project_id.or(fallback_project),
                http.clone(),
            ))
        }
        _ => Err(CredentialError::UnsupportedCredentialsType {
            kind,
            path: origin.to_string(),
        }),
    }
}

/// Ask the metadata server for the project ID, proving it is reachable.
async fn probe_metadata_project(http: &HttpClient, base_url: &str) -> Result<String, String> {
    let url = format!("{base_url}/computeMetadata/v1/project/project-id");
    debug!(url = %url, "Probing metadata server");

    let response = http
        .get(&url)
        .header(METADATA_FLAVOR_HEADER, METADATA_FLAVOR_VALUE)
        .timeout(Duration::from_secs(METADATA_PROBE_TIMEOUT_SECS))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {status}"));
    }

    let project = response.text().await.map_err(|e| e.to_string())?;
    Ok(project.trim().to_string())
}

#[cfg(test)]
#[path = "adc_tests.rs"]
mod adc_tests;
