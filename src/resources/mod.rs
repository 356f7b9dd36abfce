// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Managed resources exposed by the provider.
//!
//! - [`site_verification`] - a verified site registration and, for domains verified
//!   with `DNS_TXT`, the TXT record that proves ownership

pub mod site_verification;
