// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the site verification provider.
//!
//! This module provides specialized error types for:
//! - Credential discovery, impersonation and token introspection failures
//! - Remote API calls (Site Verification, Cloud DNS)
//! - Data source and resource lifecycle operations
//!
//! Errors are never retried. A remote "not found" is the only error that callers
//! inspect ([`ApiError::is_not_found`]); during a resource read it means the tracked
//! object is gone rather than that the read failed.

use thiserror::Error;

/// Errors that occur while building credentials for the provider.
///
/// All of these are fatal for the current operation: nothing is saved to state.
#[derive(Error, Debug, Clone)]
pub enum CredentialError {
    /// No ambient credentials could be located
    #[error("Failed to load default credentials: {reason}")]
    DefaultCredentialsNotFound {
        /// Why each discovery source was rejected
        reason: String,
    },

    /// A credentials file exists but could not be read or parsed
    #[error("Failed to read credentials file '{path}': {reason}")]
    CredentialsFileUnreadable {
        /// Path of the credentials file
        path: String,
        /// Underlying I/O or parse error
        reason: String,
    },

    /// A credentials file declares a type this provider cannot use
    #[error("Unsupported credentials type '{kind}' in '{path}'")]
    UnsupportedCredentialsType {
        /// The `type` field of the file
        kind: String,
        /// Path of the credentials file
        path: String,
    },

    /// The service account JWT assertion could not be signed
    #[error("Failed to sign assertion for service account {client_email}: {reason}")]
    AssertionSigningFailed {
        /// The service account being authenticated
        client_email: String,
        /// Signing error
        reason: String,
    },

    /// Exchanging a grant for an access token failed
    #[error("Token request to {url} failed: {reason}")]
    TokenRequestFailed {
        /// Token endpoint
        url: String,
        /// HTTP status and body, or transport error
        reason: String,
    },

    /// The IAM Credentials `generateAccessToken` call failed
    #[error("Failed to generate access token for service account {service_account}: {reason}")]
    ImpersonationFailed {
        /// The service account being impersonated
        service_account: String,
        /// HTTP status and body, or transport error
        reason: String,
    },

    /// Token introspection failed, so the default owner is unknown
    #[error("Failed to get token info: {reason}")]
    TokenInfoFailed {
        /// HTTP status and body, or transport error
        reason: String,
    },

    /// Provider configuration values are invalid
    #[error("Invalid provider configuration: {reason}")]
    InvalidConfiguration {
        /// What is invalid
        reason: String,
    },
}

/// Errors returned by the remote API clients.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The API answered with a non-success status
    #[error("HTTP {status} from {method} {url}: {message}")]
    Status {
        /// HTTP method of the request
        method: String,
        /// Request URL
        url: String,
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("HTTP request {method} {url} failed: {reason}")]
    Transport {
        /// HTTP method of the request
        method: String,
        /// Request URL
        url: String,
        /// Transport error
        reason: String,
    },

    /// The response body did not match the expected schema
    #[error("Failed to decode response from {url}: {reason}")]
    Decode {
        /// Request URL
        url: String,
        /// Deserialization error
        reason: String,
    },

    /// An access token could not be obtained for the request
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

impl ApiError {
    /// HTTP status code of the failure, if the API answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the remote object does not exist (HTTP 404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Errors surfaced by data source and resource operations.
///
/// Each variant names the lifecycle step that failed, so the first part of the
/// message is a stable summary ([`ResourceError::summary`]) and the rest is the detail.
#[derive(Error, Debug, Clone)]
pub enum ResourceError {
    /// Token issuance failed
    #[error("Error retrieving verification token: {source}")]
    RetrieveToken {
        /// Remote failure
        source: ApiError,
    },

    /// Creating the verification TXT record failed
    #[error("Error creating DNS record: {source}")]
    CreateDnsRecord {
        /// Remote failure
        source: ApiError,
    },

    /// Reading the verification TXT record failed for a reason other than not-found
    #[error("Error reading DNS record: {source}")]
    ReadDnsRecord {
        /// Remote failure
        source: ApiError,
    },

    /// The verification record does not hold exactly one TXT value
    #[error("Error reading DNS record: expected 1 TXT value, got {count}")]
    UnexpectedTxtValues {
        /// Number of values found
        count: usize,
    },

    /// Deleting the verification TXT record failed
    #[error("Error deleting DNS record: {source}")]
    DeleteDnsRecord {
        /// Remote failure
        source: ApiError,
    },

    /// Recreating the verification TXT record during an update failed
    #[error("Error updating DNS TXT record: {source}")]
    UpdateDnsRecord {
        /// Remote failure
        source: ApiError,
    },

    /// Registering the site as verified failed
    #[error("Error inserting site verification: {source}")]
    InsertSiteVerification {
        /// Remote failure
        source: ApiError,
    },

    /// Reading the verification registration failed for a reason other than not-found
    #[error("Error reading site verification: {source}")]
    ReadSiteVerification {
        /// Remote failure
        source: ApiError,
    },

    /// Patching the owner list failed
    #[error("Error updating site verification: {source}")]
    UpdateSiteVerification {
        /// Remote failure
        source: ApiError,
    },

    /// Relinquishing verification failed
    #[error("Error relinquishing site verification: {source}")]
    RelinquishSiteVerification {
        /// Remote failure
        source: ApiError,
    },

    /// DNS verification needs a project but neither the resource nor the provider has one
    #[error("Error creating DNS record: no project configured for site '{site_identifier}'")]
    MissingProject {
        /// Site being verified
        site_identifier: String,
    },

    /// The remote ID could not be unescaped
    #[error("Invalid site verification ID '{id}': {reason}")]
    InvalidId {
        /// The ID as returned by the API
        id: String,
        /// Decoding error
        reason: String,
    },
}

impl ResourceError {
    /// Short, stable description of the failed step.
    #[must_use]
    pub fn summary(&self) -> &'static str {
        match self {
            Self::RetrieveToken { .. } => "Error retrieving verification token",
            Self::CreateDnsRecord { .. } | Self::MissingProject { .. } => {
                "Error creating DNS record"
            }
            Self::ReadDnsRecord { .. } | Self::UnexpectedTxtValues { .. } => {
                "Error reading DNS record"
            }
            Self::DeleteDnsRecord { .. } => "Error deleting DNS record",
            Self::UpdateDnsRecord { .. } => "Error updating DNS TXT record",
            Self::InsertSiteVerification { .. } | Self::InvalidId { .. } => {
                "Error inserting site verification"
            }
            Self::ReadSiteVerification { .. } => "Error reading site verification",
            Self::UpdateSiteVerification { .. } => "Error updating site verification",
            Self::RelinquishSiteVerification { .. } => "Error relinquishing site verification",
        }
    }

    /// The remote failure behind this error, if any.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::RetrieveToken { source }
            | Self::CreateDnsRecord { source }
            | Self::ReadDnsRecord { source }
            | Self::DeleteDnsRecord { source }
            | Self::UpdateDnsRecord { source }
            | Self::InsertSiteVerification { source }
            | Self::ReadSiteVerification { source }
            | Self::UpdateSiteVerification { source }
            | Self::RelinquishSiteVerification { source } => Some(source),
            Self::UnexpectedTxtValues { .. }
            | Self::MissingProject { .. }
            | Self::InvalidId { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
