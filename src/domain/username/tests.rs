use super::*;

use std::cell::Cell;
use std::collections::HashSet;

struct FakeRegistry {
    keys: HashSet<String>,
    calls: Cell<usize>,
}

impl FakeRegistry {
    fn with_keys(keys: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            calls: Cell::new(0),
        }
    }

    fn empty() -> Self {
        Self::with_keys(&[])
    }
}

impl UsernameRegistry for FakeRegistry {
    fn exists_by_key(&self, key: &str) -> Result<bool, String> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.keys.contains(key))
    }
}

struct BrokenRegistry;

impl UsernameRegistry for BrokenRegistry {
    fn exists_by_key(&self, _key: &str) -> Result<bool, String> {
        Err("DB_ERROR: registry unreachable".to_string())
    }
}

#[test]
fn normalize_key_strips_everything_but_ascii_alphanumerics() {
    assert_eq!(normalize_key("John_Doe123!"), "johndoe123");
    assert_eq!(normalize_key("  Mixed CASE 42  "), "mixedcase42");
    assert_eq!(normalize_key("über-cool"), "bercool");
}

#[test]
fn normalize_key_output_stays_in_alphabet_and_is_idempotent() {
    for raw in ["John Doe!", "a_b_c", "Ω123", "plain", "!!!", ""] {
        let key = normalize_key(raw);
        assert!(key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(normalize_key(&key), key);
    }
}

#[test]
fn degenerate_inputs_normalize_to_empty_key() {
    assert_eq!(normalize_key(""), "");
    assert_eq!(normalize_key("!!!"), "");
    assert_eq!(normalize_key("   "), "");
}

#[test]
fn invalid_input_fails_before_any_registry_call() {
    let registry = FakeRegistry::empty();
    for raw in ["", "!!!", "   "] {
        let err = check_availability(&registry, raw).unwrap_err();
        assert!(matches!(err, UsernameError::InvalidArgument(_)));
    }
    assert_eq!(registry.calls.get(), 0);
}

#[test]
fn taken_key_is_reported_across_case_and_punctuation_variants() {
    let registry = FakeRegistry::with_keys(&["johndoe123"]);
    let result = check_availability(&registry, "John Doe123!").expect("check succeeds");
    assert!(!result.available);
    assert_eq!(registry.calls.get(), 1);
}

#[test]
fn fresh_name_is_available_against_empty_registry() {
    let registry = FakeRegistry::empty();
    let result = check_availability(&registry, "freshname").expect("check succeeds");
    assert!(result.available);
}

#[test]
fn registry_failure_surfaces_as_internal() {
    let err = check_availability(&BrokenRegistry, "freshname").unwrap_err();
    assert!(matches!(err, UsernameError::Internal(_)));
}
