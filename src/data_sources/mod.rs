// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Read-only lookups exposed by the provider.
//!
//! - [`domain_key`] - issues a verification token for a site
//!
//! # Example
//!
//! ```rust,no_run
//! use gsv_provider::contract::DataSource;
//! use gsv_provider::models::DomainKeyModel;
//! use gsv_provider::provider::Clients;
//! use gsv_provider::data_sources::domain_key::DomainKeyDataSource;
//! use std::sync::Arc;
//!
//! async fn lookup(clients: Arc<Clients>) -> anyhow::Result<String> {
//!     let state = DomainKeyDataSource::new(clients)
//!         .read(DomainKeyModel {
//!             site_identifier: "example.com".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!     Ok(state.token.unwrap_or_default())
//! }
//! ```

pub mod domain_key;
