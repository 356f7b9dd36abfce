// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # gsv-provider - Google Site Verification provider
//!
//! An infrastructure-as-code provider that proves ownership of domains and sites to
//! Google, and manages the Cloud DNS TXT records that carry the proof.
//!
//! ## Overview
//!
//! The provider exposes:
//!
//! - the `googlesiteverification_domain_key` data source, which issues a verification
//!   token for a site
//! - the `googlesiteverification_site_verification` resource, which publishes the
//!   token as a DNS TXT record (for `INET_DOMAIN` sites verified with `DNS_TXT`) and
//!   registers the site as verified
//!
//! Both talk directly to the Site Verification API v1 and the Cloud DNS API v2, using
//! Application Default Credentials, optionally impersonating a service account.
//!
//! ## Modules
//!
//! - [`auth`] - credential discovery, impersonation and token introspection
//! - [`gcp`] - REST clients for Site Verification and Cloud DNS
//! - [`provider`] - provider configuration and the shared [`provider::Clients`]
//! - [`data_sources`] - the `domain_key` lookup
//! - [`resources`] - the `site_verification` lifecycle
//! - [`contract`] - the `DataSource` / `Resource` traits the host drives
//! - [`schema`] - attribute schemas
//! - [`models`] - state models
//!
//! ## Example
//!
//! ```rust,no_run
//! use gsv_provider::config::ProviderConfig;
//! use gsv_provider::contract::{DataSource, Resource};
//! use gsv_provider::models::{DomainKeyModel, SiteVerificationModel};
//! use gsv_provider::provider::Provider;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = Provider::new(env!("CARGO_PKG_VERSION"));
//! let clients = provider.configure(&ProviderConfig::default()).await?;
//!
//! let key = provider
//!     .domain_key(clients.clone())
//!     .read(DomainKeyModel {
//!         site_identifier: "example.com".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let state = provider
//!     .site_verification(clients)
//!     .create(SiteVerificationModel {
//!         site_identifier: "example.com".to_string(),
//!         token: key.token.unwrap_or_default(),
//!         managed_zone: "example-com".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("verified {:?}", state.id);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod constants;
pub mod contract;
pub mod data_sources;
pub mod errors;
pub mod gcp;
pub mod identifiers;
pub mod models;
pub mod owners;
pub mod provider;
pub mod resources;
pub mod schema;
