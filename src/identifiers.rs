// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Name and identifier helpers.
//!
//! DNS record names are fully qualified (trailing dot), while the Site Verification
//! API addresses a web resource by the site identifier without one. Remote web
//! resource IDs may contain path-unsafe characters (`dns://example.com`), so they
//! are escaped before they are used as a single path segment and unescaped when
//! read back from the API.

use std::borrow::Cow;

/// Append a trailing dot to a DNS name unless it already has one.
///
/// ```rust
/// use gsv_provider::identifiers::force_dot;
///
/// assert_eq!(force_dot("example.com"), "example.com.");
/// assert_eq!(force_dot("example.com."), "example.com.");
/// ```
#[must_use]
pub fn force_dot(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Strip one trailing dot from a site identifier.
///
/// This is the form the Site Verification API expects as a web resource ID.
#[must_use]
pub fn site_id(identifier: &str) -> &str {
    identifier.strip_suffix('.').unwrap_or(identifier)
}

/// Escape an ID so it can be used as a single URL path segment.
#[must_use]
pub fn encode_id(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Reverse [`encode_id`].
///
/// # Errors
///
/// Returns an error if the unescaped bytes are not valid UTF-8.
pub fn decode_id(id: &str) -> Result<Cow<'_, str>, std::string::FromUtf8Error> {
    urlencoding::decode(id)
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod identifiers_tests;
