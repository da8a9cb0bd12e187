//! Usage: Username identity keys + registry availability checks.

use std::fmt;

use serde::Serialize;

/// Lookup capability over the username registry: exact match on the
/// precomputed normalized key, capped at one result. The checker only ever
/// needs "does at least one record exist".
pub(crate) trait UsernameRegistry {
    fn exists_by_key(&self, key: &str) -> Result<bool, String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UsernameError {
    /// Input normalizes to an empty key. Detected before any registry call,
    /// so bad input never costs a lookup.
    InvalidArgument(String),
    /// The registry lookup itself failed.
    Internal(String),
}

impl fmt::Display for UsernameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "SEC_INVALID_INPUT: {msg}"),
            Self::Internal(msg) => write!(f, "SYSTEM_ERROR: {msg}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct Availability {
    pub available: bool,
}

/// Lowercases the input and deletes every character outside `[a-z0-9]`.
/// Deliberately lossy: case and punctuation variants collapse onto one
/// identity key, so "John_Doe" and "johndoe" are the same user.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Snapshot check, not a reservation. A concurrent registration can still
/// take the key between this check and a later claim; the claim write path
/// owns that race via the registry's unique constraint.
pub(crate) fn check_availability(
    registry: &dyn UsernameRegistry,
    raw_username: &str,
) -> Result<Availability, UsernameError> {
    let key = normalize_key(raw_username);
    if key.is_empty() {
        return Err(UsernameError::InvalidArgument(
            "username must contain at least one alphanumeric character".to_string(),
        ));
    }

    let exists = registry
        .exists_by_key(&key)
        .map_err(UsernameError::Internal)?;

    Ok(Availability { available: !exists })
}

#[cfg(test)]
mod tests;
