//! Tests for the diagnostic code catalog

use std::collections::HashSet;
use wiring_domain::codes::{is_known, lookup};
use wiring_domain::{DIAGNOSTIC_CODES, DiagnosticCategory, Severity};

#[test]
fn test_codes_are_unique_and_sorted() {
    let codes: Vec<&str> = DIAGNOSTIC_CODES.iter().map(|info| info.code).collect();
    let unique: HashSet<&str> = codes.iter().copied().collect();

    assert_eq!(unique.len(), codes.len());
    let mut sorted = codes.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, codes);
}

#[test]
fn test_lookup_known_code() {
    let info = lookup("LIF001").unwrap();

    assert_eq!(info.category, DiagnosticCategory::LifetimeViolation);
    assert_eq!(info.severity, Severity::Error);
    assert!(is_known("CND007"));
    assert!(!is_known("LIF999"));
}

#[test]
fn test_unresolved_reference_codes() {
    let unresolved: Vec<&str> = DIAGNOSTIC_CODES
        .iter()
        .filter(|info| info.category == DiagnosticCategory::UnresolvedReference)
        .map(|info| info.code)
        .collect();

    assert_eq!(unresolved, vec!["DEP003", "REG004"]);
}
