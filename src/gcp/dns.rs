// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Cloud DNS API v2 client, limited to resource record sets.

use super::{send_empty, send_json};
use crate::auth::Credentials;
use crate::constants::DNS_LOCATION_GLOBAL;
use crate::errors::ApiError;
use reqwest::{Client as HttpClient, Method};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A DNS resource record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecordSet {
    /// Fully qualified name with trailing dot
    pub name: String,
    /// Record type, e.g. `TXT`
    #[serde(rename = "type")]
    pub record_type: String,
    /// Time to live in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i32>,
    /// Record values
    #[serde(default)]
    pub rrdatas: Vec<String>,
}

/// Client for `https://dns.googleapis.com/dns/v2`.
#[derive(Debug, Clone)]
pub struct DnsClient {
    http: HttpClient,
    credentials: Credentials,
    base_url: String,
}

impl DnsClient {
    /// Create a client. `base_url` has no trailing slash.
    #[must_use]
    pub fn new(http: HttpClient, credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            http,
            credentials,
            base_url: base_url.into(),
        }
    }

    fn rrsets_url(&self, project: &str, zone: &str) -> String {
        format!(
            "{}/projects/{}/locations/{DNS_LOCATION_GLOBAL}/managedZones/{}/rrsets",
            self.base_url,
            urlencoding::encode(project),
            urlencoding::encode(zone),
        )
    }

    fn rrset_url(&self, project: &str, zone: &str, name: &str, record_type: &str) -> String {
        format!(
            "{}/{}/{}",
            self.rrsets_url(project, zone),
            urlencoding::encode(name),
            urlencoding::encode(record_type),
        )
    }

    /// Create a record set in a managed zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails, including when the record set exists.
    pub async fn create(
        &self,
        project: &str,
        zone: &str,
        record: &ResourceRecordSet,
    ) -> Result<ResourceRecordSet, ApiError> {
        debug!(project = %project, zone = %zone, name = %record.name, record_type = %record.record_type, "Creating record set");
        let url = self.rrsets_url(project, zone);
        send_json(&self.http, &self.credentials, Method::POST, &url, Some(record)).await
    }

    /// Fetch a record set by name and type.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails; a missing record set is
    /// [`ApiError::is_not_found`].
    pub async fn get(
        &self,
        project: &str,
        zone: &str,
        name: &str,
        record_type: &str,
    ) -> Result<ResourceRecordSet, ApiError> {
        let url = self.rrset_url(project, zone, name, record_type);
        send_json::<(), _>(&self.http, &self.credentials, Method::GET, &url, None).await
    }

    /// Delete a record set by name and type.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn delete(
        &self,
        project: &str,
        zone: &str,
        name: &str,
        record_type: &str,
    ) -> Result<(), ApiError> {
        debug!(project = %project, zone = %zone, name = %name, record_type = %record_type, "Deleting record set");
        let url = self.rrset_url(project, zone, name, record_type);
        send_empty(&self.http, &self.credentials, Method::DELETE, &url).await
    }
}

#[cfg(test)]
#[path = "dns_tests.rs"]
mod dns_tests;
