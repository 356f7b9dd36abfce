// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Attribute schemas for the provider, its data source and its resource.
//!
//! Schemas are plain data: the host uses them to validate configuration and to
//! plan changes, and `gsv-provider schema` prints them as JSON.

use serde::Serialize;
use serde_json::Value;

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A string
    String,
    /// A whole number
    Number,
    /// A list of strings
    #[serde(rename = "list(string)")]
    StringList,
}

/// One attribute of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Attribute name, as used in state
    pub name: &'static str,
    /// Value type
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Markdown description for documentation
    pub markdown_description: &'static str,
    /// Must be set in configuration
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    /// May be set in configuration
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    /// May be set by the provider
    #[serde(skip_serializing_if = "is_false")]
    pub computed: bool,
    /// Changing the value destroys and recreates the resource
    #[serde(skip_serializing_if = "is_false")]
    pub requires_replace: bool,
    /// An unknown planned value keeps the prior state value
    #[serde(skip_serializing_if = "is_false")]
    pub use_state_for_unknown: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl Attribute {
    fn new(name: &'static str, attr_type: AttributeType, markdown_description: &'static str) -> Self {
        Self {
            name,
            attr_type,
            markdown_description,
            required: false,
            optional: false,
            computed: false,
            requires_replace: false,
            use_state_for_unknown: false,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    fn requires_replace(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    fn use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }
}

/// A provider, data source or resource schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Markdown description for documentation
    pub markdown_description: &'static str,
    /// Attributes in declaration order
    pub attributes: Vec<Attribute>,
}

impl Schema {
    /// Look up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Names of the requires-replace attributes that differ between two states.
    ///
    /// A null planned value on a computed attribute means the provider will fill it
    /// in, so it does not count as a change.
    ///
    /// # Errors
    ///
    /// Returns an error if either state cannot be serialized.
    pub fn requires_replace<M: Serialize>(
        &self,
        prior: &M,
        planned: &M,
    ) -> Result<Vec<&'static str>, serde_json::Error> {
        let prior = serde_json::to_value(prior)?;
        let planned = serde_json::to_value(planned)?;

        Ok(self
            .attributes
            .iter()
            .filter(|a| a.requires_replace)
            .filter(|a| {
                let planned_value = planned.get(a.name).unwrap_or(&Value::Null);
                if planned_value.is_null() && a.computed {
                    return false;
                }
                prior.get(a.name).unwrap_or(&Value::Null) != planned_value
            })
            .map(|a| a.name)
            .collect())
    }
}

/// Provider configuration schema.
#[must_use]
pub fn provider_schema() -> Schema {
    Schema {
        markdown_description: "Manages Google Site Verification of domains and the DNS records that prove ownership.",
        attributes: vec![
            Attribute::new(
                "project",
                AttributeType::String,
                "The project ID to manage resources in. If it is not provided, the default project is used.",
            )
            .optional(),
            Attribute::new(
                "impersonate_service_account",
                AttributeType::String,
                "The service account ID to impersonate, if any. For more information on service account impersonation, see [the official documentation](https://cloud.google.com/iam/docs/impersonating-service-accounts).",
            )
            .optional(),
            Attribute::new(
                "token_duration",
                AttributeType::Number,
                "The duration of the token to impersonate the service account. If not set, the default duration of 1 hour will be used.",
            )
            .optional(),
        ],
    }
}

/// `domain_key` data source schema.
#[must_use]
pub fn domain_key_schema() -> Schema {
    Schema {
        markdown_description: "Retrieves a verification token for a domain.",
        attributes: vec![
            Attribute::new(
                "verification_method",
                AttributeType::String,
                "The verification method to use. Defaults to DNS_TXT.",
            )
            .optional()
            .computed(),
            Attribute::new(
                "site_identifier",
                AttributeType::String,
                "The DNS name or URL to retrieve a verification token for.",
            )
            .required(),
            Attribute::new(
                "site_type",
                AttributeType::String,
                "The type of site verification to attempt. Defaults to INET_DOMAIN.",
            )
            .optional()
            .computed(),
            Attribute::new(
                "token",
                AttributeType::String,
                "The verification token to use for the site.",
            )
            .computed(),
        ],
    }
}

/// `site_verification` resource schema.
#[must_use]
pub fn site_verification_schema() -> Schema {
    Schema {
        markdown_description: "Attempts to verify a domain.",
        attributes: vec![
            Attribute::new(
                "project",
                AttributeType::String,
                "The project to use for verification. Defaults to the provider project.",
            )
            .optional()
            .computed()
            .requires_replace(),
            Attribute::new(
                "verification_method",
                AttributeType::String,
                "The verification method to use. Defaults to DNS_TXT.",
            )
            .optional()
            .computed()
            .requires_replace(),
            Attribute::new(
                "site_identifier",
                AttributeType::String,
                "The DNS name or URL to retrieve a verification token for.",
            )
            .required()
            .requires_replace(),
            Attribute::new(
                "site_type",
                AttributeType::String,
                "The type of site verification to attempt. Defaults to INET_DOMAIN.",
            )
            .optional()
            .computed()
            .requires_replace(),
            Attribute::new("token", AttributeType::String, "The verification token.").required(),
            Attribute::new(
                "managed_zone",
                AttributeType::String,
                "The managed zone to use for DNS verification.",
            )
            .required()
            .requires_replace(),
            Attribute::new(
                "owners",
                AttributeType::StringList,
                "The owners of the site. Defaults to the current user.",
            )
            .optional()
            .computed()
            .use_state_for_unknown(),
            Attribute::new("id", AttributeType::String, "The ID of the site.").computed(),
        ],
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod schema_tests;
