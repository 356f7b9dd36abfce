// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider metadata, configuration and registry.
//!
//! Configuring the provider resolves credentials once and produces a read-only
//! [`Clients`] context that the data source and resource share.
//!
//! # Configuration flow
//!
//! 1. Resolve endpoints (configuration > environment > defaults)
//! 2. Discover ambient credentials (Application Default Credentials)
//! 3. If `impersonate_service_account` is set, exchange them for a short-lived token
//!    of that account, which also becomes the default owner; otherwise look up the
//!    email behind the ambient token
//! 4. Build the Site Verification client with the (possibly impersonated)
//!    credentials and the Cloud DNS client with the ambient credentials

use crate::auth::adc::{find_default_credentials, AmbientEnvironment};
use crate::auth::impersonate::impersonate_service_account;
use crate::auth::tokeninfo::token_email;
use crate::auth::Credentials;
use crate::config::{Endpoints, ProviderConfig};
use crate::constants::{DOMAIN_KEY_TYPE_SUFFIX, PROVIDER_TYPE_NAME, SITE_VERIFICATION_TYPE_SUFFIX};
use crate::data_sources::domain_key::DomainKeyDataSource;
use crate::errors::CredentialError;
use crate::gcp::dns::DnsClient;
use crate::gcp::site_verification::SiteVerificationClient;
use crate::resources::site_verification::SiteVerificationResource;
use crate::schema::{domain_key_schema, provider_schema, site_verification_schema, Schema};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use tracing::{debug, info};

/// Configured API clients shared by every operation.
#[derive(Debug, Clone)]
pub struct Clients {
    /// Project for DNS records when a resource does not set one
    pub project_id: Option<String>,
    /// Identity that owns verifications by default
    pub default_owner: String,
    /// Site Verification API client
    pub site_verification: SiteVerificationClient,
    /// Cloud DNS API client
    pub dns: DnsClient,
}

/// The site verification provider.
#[derive(Debug, Clone)]
pub struct Provider {
    version: String,
}

impl Provider {
    /// Create a provider reporting `version`.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Provider type name; data source and resource names are prefixed with it.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        PROVIDER_TYPE_NAME
    }

    /// Provider version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Provider configuration schema.
    #[must_use]
    pub fn schema(&self) -> Schema {
        provider_schema()
    }

    /// Data source type names and their schemas.
    #[must_use]
    pub fn data_source_schemas(&self) -> Vec<(String, Schema)> {
        vec![(
            format!("{PROVIDER_TYPE_NAME}{DOMAIN_KEY_TYPE_SUFFIX}"),
            domain_key_schema(),
        )]
    }

    /// Resource type names and their schemas.
    #[must_use]
    pub fn resource_schemas(&self) -> Vec<(String, Schema)> {
        vec![(
            format!("{PROVIDER_TYPE_NAME}{SITE_VERIFICATION_TYPE_SUFFIX}"),
            site_verification_schema(),
        )]
    }

    /// Full type names of the data sources.
    #[must_use]
    pub fn data_source_type_names(&self) -> Vec<String> {
        self.data_source_schemas()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Full type names of the resources.
    #[must_use]
    pub fn resource_type_names(&self) -> Vec<String> {
        self.resource_schemas()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    /// Configure the provider from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, no ambient credentials are
    /// found, impersonation fails, or the default owner cannot be determined.
    pub async fn configure(&self, config: &ProviderConfig) -> Result<Arc<Clients>, CredentialError> {
        let endpoints = Endpoints::resolve(config.endpoints.as_ref())?;
        let http = self.http_client()?;
        let ambient =
            find_default_credentials(&http, &endpoints, &AmbientEnvironment::from_process())
                .await?;
        self.configure_with_credentials(config, &endpoints, &http, ambient)
            .await
    }

    /// Configure the provider from already discovered ambient credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, impersonation fails, or the
    /// default owner cannot be determined.
    pub async fn configure_with_credentials(
        &self,
        config: &ProviderConfig,
        endpoints: &Endpoints,
        http: &HttpClient,
        ambient: Credentials,
    ) -> Result<Arc<Clients>, CredentialError> {
        let project_id = config
            .project_override()
            .map(str::to_string)
            .or_else(|| ambient.project_id().map(str::to_string));

        let service_account = config
            .impersonate_service_account
            .as_deref()
            .filter(|account| !account.is_empty());
        let (verification_credentials, default_owner) = match service_account {
            Some(service_account) => {
                let duration = config.token_duration_secs()?;
                let impersonated = impersonate_service_account(
                    http,
                    &ambient,
                    &endpoints.iam_credentials,
                    service_account,
                    duration,
                )
                .await?;
                (impersonated, service_account.to_string())
            }
            None => {
                let email = token_email(http, &ambient, &endpoints.oauth2).await?;
                (ambient.clone(), email)
            }
        };

        info!(
            project = ?project_id,
            default_owner = %default_owner,
            impersonating = service_account.is_some(),
            "Provider configured"
        );
        debug!(endpoints = ?endpoints, "Resolved endpoints");

        Ok(Arc::new(Clients {
            site_verification: SiteVerificationClient::new(
                http.clone(),
                verification_credentials.with_project_id(project_id.clone()),
                endpoints.site_verification.clone(),
            ),
            dns: DnsClient::new(
                http.clone(),
                ambient.with_project_id(project_id.clone()),
                endpoints.dns.clone(),
            ),
            project_id,
            default_owner,
        }))
    }

    /// The `domain_key` data source bound to configured clients.
    #[must_use]
    pub fn domain_key(&self, clients: Arc<Clients>) -> DomainKeyDataSource {
        DomainKeyDataSource::new(clients)
    }

    /// The `site_verification` resource bound to configured clients.
    #[must_use]
    pub fn site_verification(&self, clients: Arc<Clients>) -> SiteVerificationResource {
        SiteVerificationResource::new(clients)
    }

    fn http_client(&self) -> Result<HttpClient, CredentialError> {
        HttpClient::builder()
            .user_agent(format!("gsv-provider/{}", self.version))
            .build()
            .map_err(|e| CredentialError::InvalidConfiguration {
                reason: format!("failed to build HTTP client: {e}"),
            })
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
