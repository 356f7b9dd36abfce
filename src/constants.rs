// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the site verification provider.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Provider Constants
// ============================================================================

/// Type name of the provider, used as the prefix of every data source and resource
pub const PROVIDER_TYPE_NAME: &str = "googlesiteverification";

/// Suffix of the domain key data source type name
pub const DOMAIN_KEY_TYPE_SUFFIX: &str = "_domain_key";

/// Suffix of the site verification resource type name
pub const SITE_VERIFICATION_TYPE_SUFFIX: &str = "_site_verification";

// ============================================================================
// Site Verification Constants
// ============================================================================

/// Site type for domain verification (the default)
pub const SITE_TYPE_INET_DOMAIN: &str = "INET_DOMAIN";

/// Site type for URL verification
pub const SITE_TYPE_SITE: &str = "SITE";

/// DNS TXT verification method (the default)
pub const VERIFICATION_METHOD_DNS_TXT: &str = "DNS_TXT";

/// Default site type when none is configured
pub const DEFAULT_SITE_TYPE: &str = SITE_TYPE_INET_DOMAIN;

/// Default verification method when none is configured
pub const DEFAULT_VERIFICATION_METHOD: &str = VERIFICATION_METHOD_DNS_TXT;

/// Prefix of remote web resource IDs for domains
pub const DOMAIN_RESOURCE_ID_PREFIX: &str = "dns://";

// ============================================================================
// DNS Constants
// ============================================================================

/// TTL of the verification TXT record
pub const VERIFICATION_RECORD_TTL_SECS: i32 = 60;

/// Record type of the verification record
pub const RECORD_TYPE_TXT: &str = "TXT";

/// Cloud DNS location for managed zones
pub const DNS_LOCATION_GLOBAL: &str = "global";

// ============================================================================
// Credential Constants
// ============================================================================

/// Default lifetime of an impersonated access token (1 hour)
pub const DEFAULT_TOKEN_DURATION_SECS: i64 = 3600;

/// Access tokens are refreshed this long before they expire
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// Lifetime of the JWT assertion sent in the service account grant
pub const JWT_ASSERTION_LIFETIME_SECS: u64 = 3600;

/// Timeout for probing the metadata server during credential discovery
pub const METADATA_PROBE_TIMEOUT_SECS: u64 = 3;

/// Full read-write access to site verification
pub const SCOPE_SITE_VERIFICATION: &str = "https://www.googleapis.com/auth/siteverification";

/// Verify-only access to site verification
pub const SCOPE_SITE_VERIFICATION_VERIFY_ONLY: &str =
    "https://www.googleapis.com/auth/siteverification.verify_only";

/// Read-write access to Cloud DNS
pub const SCOPE_CLOUD_DNS_READWRITE: &str = "https://www.googleapis.com/auth/ndev.clouddns.readwrite";

/// Email scope, needed for token introspection to report the caller identity
pub const SCOPE_USERINFO_EMAIL: &str = "https://www.googleapis.com/auth/userinfo.email";

/// Scopes requested for an impersonated token
pub const IMPERSONATION_SCOPES: &[&str] = &[
    SCOPE_SITE_VERIFICATION,
    SCOPE_SITE_VERIFICATION_VERIFY_ONLY,
    SCOPE_CLOUD_DNS_READWRITE,
];

/// Scopes requested for ambient credentials that honour scopes
pub const AMBIENT_SCOPES: &[&str] = &[
    SCOPE_SITE_VERIFICATION,
    SCOPE_SITE_VERIFICATION_VERIFY_ONLY,
    SCOPE_CLOUD_DNS_READWRITE,
    SCOPE_USERINFO_EMAIL,
];

/// Grant type of the service account JWT-bearer flow
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Grant type of the authorized user refresh flow
pub const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Header required by the metadata server
pub const METADATA_FLAVOR_HEADER: &str = "Metadata-Flavor";

/// Value of the metadata flavor header
pub const METADATA_FLAVOR_VALUE: &str = "Google";

// ============================================================================
// Endpoint Constants
// ============================================================================

/// Base URL of the Site Verification API v1
pub const DEFAULT_SITE_VERIFICATION_ENDPOINT: &str =
    "https://www.googleapis.com/siteVerification/v1";

/// Base URL of the Cloud DNS API v2
pub const DEFAULT_DNS_ENDPOINT: &str = "https://dns.googleapis.com/dns/v2";

/// Base URL of the IAM Credentials API v1
pub const DEFAULT_IAM_CREDENTIALS_ENDPOINT: &str = "https://iamcredentials.googleapis.com/v1";

/// Base URL hosting the OAuth2 v2 token introspection endpoint
pub const DEFAULT_OAUTH2_ENDPOINT: &str = "https://www.googleapis.com";

/// Base URL of the GCE metadata server
pub const DEFAULT_METADATA_ENDPOINT: &str = "http://metadata.google.internal";

/// OAuth2 token endpoint used when a credentials file does not name one
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

// ============================================================================
// Environment Variables
// ============================================================================

/// Static access token, highest priority ambient credential
pub const ENV_OAUTH_ACCESS_TOKEN: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Path to a credentials JSON file
pub const ENV_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Overrides the gcloud configuration directory
pub const ENV_CLOUDSDK_CONFIG: &str = "CLOUDSDK_CONFIG";

/// Project environment variables, checked in order
pub const ENV_PROJECT_VARS: &[&str] = &[
    "GOOGLE_CLOUD_PROJECT",
    "GCLOUD_PROJECT",
    "CLOUDSDK_CORE_PROJECT",
];

/// Site Verification endpoint override
pub const ENV_SITE_VERIFICATION_ENDPOINT: &str = "GOOGLE_SITE_VERIFICATION_ENDPOINT";

/// Cloud DNS endpoint override
pub const ENV_DNS_ENDPOINT: &str = "GOOGLE_DNS_ENDPOINT";

/// IAM Credentials endpoint override
pub const ENV_IAM_CREDENTIALS_ENDPOINT: &str = "GOOGLE_IAM_CREDENTIALS_ENDPOINT";

/// OAuth2 endpoint override
pub const ENV_OAUTH2_ENDPOINT: &str = "GOOGLE_OAUTH2_ENDPOINT";

/// Metadata server host override (host or host:port, no scheme)
pub const ENV_METADATA_HOST: &str = "GCE_METADATA_HOST";

/// Name of the gcloud application default credentials file
pub const WELL_KNOWN_CREDENTIALS_FILE: &str = "application_default_credentials.json";
