// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Owner list mapping between resource state and API payloads.
//!
//! State holds owners as `Option<Vec<String>>`:
//! - `None` - not yet known; no `owners` field is sent and the server picks the default
//! - `Some(vec![])` - an explicit empty list, sent as `[]`
//!
//! The server never omits a known owner list from a response, so a response without
//! `owners` maps to a known empty list rather than to `None`.

use std::collections::HashMap;

/// Owners to send in a request, or `None` to leave the field out.
#[must_use]
pub fn owners_for_request(state_owners: Option<&[String]>) -> Option<Vec<String>> {
    state_owners.map(<[String]>::to_vec)
}

/// Owners to store after a response, preserving the server's order.
#[must_use]
pub fn owners_from_response(response_owners: Option<&[String]>) -> Vec<String> {
    response_owners.map(<[String]>::to_vec).unwrap_or_default()
}

/// Compare two owner lists ignoring order (duplicates still count).
#[must_use]
pub fn owners_equal(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut counts: HashMap<&str, i64> = HashMap::new();
    for owner in a {
        *counts.entry(owner.as_str()).or_default() += 1;
    }
    for owner in b {
        *counts.entry(owner.as_str()).or_default() -= 1;
    }
    counts.values().all(|count| *count == 0)
}

/// Compare optional owner lists; `None` only equals `None`.
#[must_use]
pub fn optional_owners_equal(a: Option<&[String]>, b: Option<&[String]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => owners_equal(a, b),
        _ => false,
    }
}

#[cfg(test)]
#[path = "owners_tests.rs"]
mod owners_tests;
