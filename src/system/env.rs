//! Read-only environment access.
//!
//! No setter: mutating the process environment is
//! `unsafe` on edition 2024.

use std::collections::BTreeMap;

/// Value of an environment variable, if set and valid Unicode.
#[must_use]
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Value of an environment variable or `default`.
#[must_use]
pub fn env_var_or(name: &str, default: &str) -> String {
    env_var(name).unwrap_or_else(|| default.to_string())
}

/// Every environment variable, sorted by name. Entries that aren't valid
/// Unicode are skipped.
#[must_use]
pub fn env_vars() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
