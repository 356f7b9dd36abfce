// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! State models for the data source and resource.
//!
//! Attribute names match the host schema (`snake_case`). `None` is a null or unknown
//! value; every attribute is always serialized so state documents are complete.

use crate::constants::{
    DEFAULT_SITE_TYPE, DEFAULT_VERIFICATION_METHOD, DOMAIN_RESOURCE_ID_PREFIX,
    SITE_TYPE_INET_DOMAIN, SITE_TYPE_SITE, VERIFICATION_METHOD_DNS_TXT,
};
use crate::gcp::site_verification::WebResourceSite;
use crate::identifiers::{force_dot, site_id};
use serde::{Deserialize, Serialize};

/// State of a `domain_key` lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainKeyModel {
    /// Verification method, defaults to `DNS_TXT`
    #[serde(default)]
    pub verification_method: Option<String>,

    /// DNS name or URL to issue a token for
    pub site_identifier: String,

    /// `INET_DOMAIN` or `SITE`, defaults to `INET_DOMAIN`
    #[serde(default)]
    pub site_type: Option<String>,

    /// Token returned by the API
    #[serde(default)]
    pub token: Option<String>,
}

impl DomainKeyModel {
    /// Fill in the defaulted site type and verification method.
    pub fn apply_defaults(&mut self) {
        if self.site_type.is_none() {
            self.site_type = Some(DEFAULT_SITE_TYPE.to_string());
        }
        if self.verification_method.is_none() {
            self.verification_method = Some(DEFAULT_VERIFICATION_METHOD.to_string());
        }
    }

    /// The site descriptor sent to the API.
    #[must_use]
    pub fn site(&self) -> WebResourceSite {
        WebResourceSite {
            identifier: self.site_identifier.clone(),
            site_type: self
                .site_type
                .clone()
                .unwrap_or_else(|| DEFAULT_SITE_TYPE.to_string()),
        }
    }
}

/// State of a `site_verification` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteVerificationModel {
    /// Project holding the managed zone; defaults to the provider project
    #[serde(default)]
    pub project: Option<String>,

    /// Verification method, defaults to `DNS_TXT`
    #[serde(default)]
    pub verification_method: Option<String>,

    /// DNS name or URL being verified
    pub site_identifier: String,

    /// `INET_DOMAIN` or `SITE`, defaults to `INET_DOMAIN`
    #[serde(default)]
    pub site_type: Option<String>,

    /// Verification token, normally from a `domain_key` lookup
    #[serde(default)]
    pub token: String,

    /// Cloud DNS managed zone that serves `site_identifier`
    #[serde(default)]
    pub managed_zone: String,

    /// Verified owners; `None` until known
    #[serde(default)]
    pub owners: Option<Vec<String>>,

    /// Unescaped remote ID, e.g. `dns://example.com`
    #[serde(default)]
    pub id: Option<String>,
}

impl SiteVerificationModel {
    /// Fill in the defaulted site type and verification method.
    pub fn apply_defaults(&mut self) {
        if self.site_type.is_none() {
            self.site_type = Some(DEFAULT_SITE_TYPE.to_string());
        }
        if self.verification_method.is_none() {
            self.verification_method = Some(DEFAULT_VERIFICATION_METHOD.to_string());
        }
    }

    /// Whether verification goes through a DNS TXT record this resource manages.
    #[must_use]
    pub fn uses_dns_txt(&self) -> bool {
        self.site_type.as_deref() == Some(SITE_TYPE_INET_DOMAIN)
            && self.verification_method.as_deref() == Some(VERIFICATION_METHOD_DNS_TXT)
    }

    /// Web resource ID used in Site Verification API paths.
    #[must_use]
    pub fn site_id(&self) -> &str {
        site_id(&self.site_identifier)
    }

    /// Fully qualified name of the verification TXT record.
    #[must_use]
    pub fn record_name(&self) -> String {
        force_dot(&self.site_identifier)
    }

    /// The site descriptor sent on insert.
    #[must_use]
    pub fn site(&self) -> WebResourceSite {
        WebResourceSite {
            identifier: self.site_identifier.clone(),
            site_type: self
                .site_type
                .clone()
                .unwrap_or_else(|| DEFAULT_SITE_TYPE.to_string()),
        }
    }

    /// Skeleton state for an imported, unescaped remote ID.
    ///
    /// `dns://example.com` becomes an `INET_DOMAIN` site for `example.com`; any other
    /// ID is taken as a `SITE` URL.
    #[must_use]
    pub fn from_import_id(id: &str) -> Self {
        let (site_identifier, site_type) = match id.strip_prefix(DOMAIN_RESOURCE_ID_PREFIX) {
            Some(domain) => (domain, SITE_TYPE_INET_DOMAIN),
            None => (id, SITE_TYPE_SITE),
        };

        Self {
            site_identifier: site_identifier.to_string(),
            site_type: Some(site_type.to_string()),
            id: Some(id.to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[path = "models_tests.rs"]
mod models_tests;
