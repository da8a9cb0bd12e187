//! Usage: Team name canonicalization to the NCAA slug convention.

use std::collections::HashMap;

const BUNDLED_OVERRIDES_JSON: &str = include_str!("../../data/team_name_overrides.json");

/// Resolves known team name aliases through an override table, then rewrites
/// the result into the hyphen-separated slug format the NCAA site expects.
///
/// The override map is fixed at construction and read-only afterwards.
/// Resolution runs before the slug rewrite: the table stores canonical values
/// pre-rewrite, so `nc_state -> north-carolina-state` still comes out as
/// `north-carolina-st`.
pub(crate) struct TeamNameCanonicalizer {
    overrides: HashMap<String, String>,
}

impl TeamNameCanonicalizer {
    pub(crate) fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    pub(crate) fn bundled() -> Result<Self, String> {
        let overrides: HashMap<String, String> = serde_json::from_str(BUNDLED_OVERRIDES_JSON)
            .map_err(|e| format!("failed to parse bundled team name overrides: {e}"))?;
        Ok(Self::new(overrides))
    }

    /// Total transform: empty input yields an empty slug, unknown names fall
    /// through the override table unchanged and only get the slug rewrite.
    ///
    /// Lookup order is underscore-joined key, then the trimmed lowercase
    /// name, then the raw input exactly as given. The raw tier exists so
    /// table keys stored with original casing or spacing still match.
    pub(crate) fn canonicalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let normalized = raw.trim().to_lowercase();
        let potential_key = replace_whitespace_runs(&normalized, '_');

        let resolved = self
            .overrides
            .get(&potential_key)
            .or_else(|| self.overrides.get(&normalized))
            .or_else(|| self.overrides.get(raw))
            .map(String::as_str)
            .unwrap_or(raw);

        to_slug(resolved)
    }
}

/// Collapses every whitespace run into a single separator. Other characters
/// pass through untouched.
fn replace_whitespace_runs(input: &str, sep: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(sep);
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

// The trailing "state" -> "st" rewrite is a plain substring replacement, not
// word-bounded. Names containing "state" inside a longer word get mangled;
// that matches the external convention we target, so it stays.
fn to_slug(resolved: &str) -> String {
    let lowered = resolved.to_lowercase();
    let hyphenated = replace_whitespace_runs(&lowered, '-').replace('_', "-");
    hyphenated.replace("state", "st")
}

#[cfg(test)]
mod tests;
