//! Tests for conditional predicate validation and exclusivity

use wiring_domain::{
    Comparison, ComparisonOperator, ConditionalPredicate, ConfigurationCondition, PredicateDefect,
    PredicateTag,
};

fn environment(value: &str) -> PredicateTag {
    PredicateTag {
        environment: Some(value.to_string()),
        ..PredicateTag::default()
    }
}

fn config_equals(key: &str, expected: &str) -> ConditionalPredicate {
    ConditionalPredicate {
        configuration: Some(ConfigurationCondition {
            key: key.to_string(),
            operator: ComparisonOperator::Equals,
            expected: expected.to_string(),
        }),
        ..ConditionalPredicate::default()
    }
}

#[test]
fn test_environment_list_is_split_and_trimmed() {
    let predicate = environment(" Development, Staging ,").validate().unwrap();

    assert_eq!(predicate.environments, vec!["Development", "Staging"]);
    assert!(predicate.configuration.is_none());
}

#[test]
fn test_empty_tag_has_no_condition() {
    let defects = PredicateTag::default().validate().unwrap_err();

    assert_eq!(defects, vec![PredicateDefect::NoCondition]);
}

#[test]
fn test_key_without_comparison() {
    let tag = PredicateTag {
        config_key: Some("Features:Cache".to_string()),
        ..PredicateTag::default()
    };

    let defects = tag.validate().unwrap_err();
    assert_eq!(defects, vec![PredicateDefect::KeyWithoutComparison]);
}

#[test]
fn test_comparison_without_key() {
    let tag = PredicateTag {
        comparison: Some(Comparison {
            operator: ComparisonOperator::Equals,
            expected: "true".to_string(),
        }),
        ..PredicateTag::default()
    };

    let defects = tag.validate().unwrap_err();
    assert_eq!(defects, vec![PredicateDefect::ComparisonWithoutKey]);
}

#[test]
fn test_blank_key_with_comparison() {
    let tag = PredicateTag {
        config_key: Some("   ".to_string()),
        comparison: Some(Comparison {
            operator: ComparisonOperator::NotEquals,
            expected: "off".to_string(),
        }),
        ..PredicateTag::default()
    };

    let defects = tag.validate().unwrap_err();
    assert_eq!(defects, vec![PredicateDefect::BlankKey]);
}

#[test]
fn test_key_and_comparison_validate() {
    let tag = PredicateTag {
        config_key: Some(" Cache:Mode ".to_string()),
        comparison: Some(Comparison {
            operator: ComparisonOperator::Equals,
            expected: "redis".to_string(),
        }),
        ..PredicateTag::default()
    };

    let predicate = tag.validate().unwrap();
    assert_eq!(predicate, config_equals("Cache:Mode", "redis"));
    assert_eq!(predicate.to_string(), "Cache:Mode == \"redis\"");
}

#[test]
fn test_disjoint_environments_are_exclusive() {
    let dev = environment("Development").validate().unwrap();
    let prod = environment("Production").validate().unwrap();

    assert!(dev.is_exclusive_with(&prod));
    assert!(prod.is_exclusive_with(&dev));
}

#[test]
fn test_shared_environment_overlaps() {
    let a = environment("Development,Staging").validate().unwrap();
    let b = environment("staging").validate().unwrap();

    assert!(!a.is_exclusive_with(&b));
}

#[test]
fn test_negated_environment_excludes() {
    let only_prod = environment("Production").validate().unwrap();
    let not_prod = PredicateTag {
        not_environment: Some("Production".to_string()),
        ..PredicateTag::default()
    }
    .validate()
    .unwrap();

    assert!(only_prod.is_exclusive_with(&not_prod));
    assert!(not_prod.is_exclusive_with(&only_prod));
}

#[test]
fn test_configuration_exclusivity() {
    let redis = config_equals("Cache:Mode", "redis");
    let memory = config_equals("Cache:Mode", "memory");
    let other_key = config_equals("Queue:Mode", "memory");

    assert!(redis.is_exclusive_with(&memory));
    assert!(!redis.is_exclusive_with(&redis.clone()));
    assert!(!memory.is_exclusive_with(&other_key));

    let not_redis = ConditionalPredicate {
        configuration: Some(ConfigurationCondition {
            key: "Cache:Mode".to_string(),
            operator: ComparisonOperator::NotEquals,
            expected: "redis".to_string(),
        }),
        ..ConditionalPredicate::default()
    };
    assert!(redis.is_exclusive_with(&not_redis));
    assert!(!memory.is_exclusive_with(&not_redis));
}
