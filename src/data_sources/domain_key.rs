// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `domain_key` data source: fetch a verification token for a site.

use crate::constants::DOMAIN_KEY_TYPE_SUFFIX;
use crate::contract::DataSource;
use crate::errors::ResourceError;
use crate::models::DomainKeyModel;
use crate::provider::Clients;
use crate::schema::{domain_key_schema, Schema};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Issues verification tokens.
#[derive(Debug, Clone)]
pub struct DomainKeyDataSource {
    clients: Arc<Clients>,
}

impl DomainKeyDataSource {
    /// Bind the data source to configured clients.
    #[must_use]
    pub fn new(clients: Arc<Clients>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl DataSource for DomainKeyDataSource {
    type Model = DomainKeyModel;

    fn type_suffix(&self) -> &'static str {
        DOMAIN_KEY_TYPE_SUFFIX
    }

    fn schema(&self) -> Schema {
        domain_key_schema()
    }

    async fn read(&self, mut config: DomainKeyModel) -> Result<DomainKeyModel, ResourceError> {
        config.apply_defaults();
        let method = config
            .verification_method
            .clone()
            .unwrap_or_default();

        debug!(
            site = %config.site_identifier,
            site_type = ?config.site_type,
            method = %method,
            "Retrieving verification token"
        );

        let response = self
            .clients
            .site_verification
            .get_token(config.site(), &method)
            .await
            .map_err(|source| ResourceError::RetrieveToken { source })?;

        info!(site = %config.site_identifier, method = %method, "Retrieved verification token");
        config.token = Some(response.token);
        Ok(config)
    }
}

#[cfg(test)]
#[path = "domain_key_tests.rs"]
mod domain_key_tests;
