//! Tests for conditional registration predicates

use crate::test_utils::*;
use wiring_domain::{Comparison, ComparisonOperator, Lifetime, PredicateTag, Severity};

fn cache(id: &str, tag: PredicateTag) -> wiring_validate::ClassDeclaration {
    declaration(id)
        .contracts(&["App.ICache"])
        .lifetime(Lifetime::Singleton)
        .condition(tag)
        .build()
}

#[test]
fn test_valid_predicate_gates_directives() {
    let output = analyze(&[cache(
        "App.RedisCache",
        config_equals("Cache:Provider", "redis"),
    )]);

    assert!(output.diagnostics.is_empty());
    assert_eq!(output.plan.len(), 2);
    for directive in output.plan.directives() {
        let condition = directive.condition.as_ref().unwrap();
        assert_eq!(condition.to_string(), "Cache:Provider == \"redis\"");
    }
}

#[test]
fn test_missing_lifetime_excludes_declaration() {
    let output = analyze(&[
        declaration("App.RedisCache")
            .contracts(&["App.ICache"])
            .condition(environment("Production"))
            .build(),
    ]);

    assert_eq!(codes(&output), vec!["CND001"]);
    assert_eq!(output.diagnostics[0].severity, Severity::Error);
    assert!(output.plan.is_empty());
}

#[test]
fn test_key_without_comparison() {
    let tag = PredicateTag {
        config_key: Some("Cache:Provider".to_string()),
        ..PredicateTag::default()
    };
    let output = analyze(&[cache("App.RedisCache", tag)]);

    assert_eq!(codes(&output), vec!["CND003"]);
    assert_eq!(
        output.diagnostics[0].message,
        "Configuration key 'Cache:Provider' on App.RedisCache has no comparison operator"
    );
    assert!(output.plan.is_empty());
}

#[test]
fn test_comparison_without_key() {
    let tag = PredicateTag {
        comparison: Some(Comparison {
            operator: ComparisonOperator::NotEquals,
            expected: "memory".to_string(),
        }),
        ..PredicateTag::default()
    };
    let output = analyze(&[cache("App.RedisCache", tag)]);

    assert_eq!(codes(&output), vec!["CND004"]);
    assert!(output.diagnostics[0].message.contains("'!= memory'"));
}

#[test]
fn test_blank_key() {
    let output = analyze(&[cache("App.RedisCache", config_equals("  ", "redis"))]);

    assert_eq!(codes(&output), vec!["CND005"]);
}

#[test]
fn test_empty_marker() {
    let output = analyze(&[cache("App.RedisCache", PredicateTag::default())]);

    assert_eq!(codes(&output), vec!["CND002"]);
    assert!(output.plan.is_empty());
}

#[test]
fn test_multiple_markers() {
    let output = analyze(&[
        declaration("App.RedisCache")
            .contracts(&["App.ICache"])
            .lifetime(Lifetime::Singleton)
            .condition(environment("Production"))
            .condition(environment("Staging"))
            .build(),
    ]);

    assert_eq!(codes(&output), vec!["CND006"]);
    assert!(output.diagnostics[0].message.contains("2 conditional"));
    assert!(output.plan.is_empty());
}

#[test]
fn test_overlapping_predicates() {
    let output = analyze(&[
        cache("App.RedisCache", environment("Production")),
        cache("App.MemoryCache", not_environment("Staging")),
    ]);

    assert_eq!(codes(&output), vec!["CND007"]);
    let diagnostic = &output.diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.declaration, "App.MemoryCache");
    assert_eq!(
        diagnostic.message,
        "Conditional registrations of App.ICache by App.MemoryCache and App.RedisCache are not mutually exclusive"
    );
    // overlaps are reported, never resolved
    assert_eq!(output.plan.len(), 4);
}

#[test]
fn test_exclusive_environments() {
    let output = analyze(&[
        cache("App.RedisCache", environment("Production")),
        cache("App.MemoryCache", not_environment("production")),
    ]);

    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_exclusive_configuration_values() {
    let output = analyze(&[
        cache("App.RedisCache", config_equals("Cache:Provider", "redis")),
        cache("App.MemoryCache", config_equals("Cache:Provider", "memory")),
    ]);

    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_malformed_and_unconditional_are_not_compared() {
    let malformed = PredicateTag {
        config_key: Some("Cache:Provider".to_string()),
        ..PredicateTag::default()
    };
    let output = analyze(&[
        cache("App.RedisCache", environment("Production")),
        cache("App.MemoryCache", malformed),
        declaration("App.DiskCache")
            .contracts(&["App.ICache"])
            .lifetime(Lifetime::Singleton)
            .build(),
    ]);

    assert_eq!(codes(&output), vec!["CND003"]);
}
