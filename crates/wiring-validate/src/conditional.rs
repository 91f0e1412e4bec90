//! Conditional Predicate Validation
//!
//! Validates conditional registration markers:
//! - a predicate needs an explicit lifetime to coexist with
//! - at least one concrete condition
//! - configuration key and comparison only together, key not blank
//! - at most one predicate set per declaration
//! - across declarations, conditional implementations of one contract whose
//!   predicates can hold at the same time
//!
//! A malformed predicate excludes its declaration from the plan. Overlaps are
//! reported but never auto-resolved.

use std::collections::BTreeMap;
use wiring_domain::{ConditionalPredicate, DiagnosticCategory, PredicateDefect, ServiceDeclaration};

define_findings! {
    DiagnosticCategory::MalformedPredicate,
    pub enum ConditionalFinding {
        #[finding(
            code = "CND001",
            severity = Error,
            message = "{declaration} has a conditional registration but no explicit lifetime"
        )]
        MissingLifetime {
            declaration: String,
            location: Location,
        },
        #[finding(
            code = "CND002",
            severity = Error,
            message = "Conditional registration on {declaration} declares no environment or configuration condition"
        )]
        NoCondition {
            declaration: String,
            location: Location,
        },
        #[finding(
            code = "CND003",
            severity = Error,
            message = "Configuration key '{key}' on {declaration} has no comparison operator"
        )]
        KeyWithoutComparison {
            declaration: String,
            location: Location,
            key: String,
        },
        #[finding(
            code = "CND004",
            severity = Error,
            message = "Comparison '{operator} {expected}' on {declaration} has no configuration key"
        )]
        ComparisonWithoutKey {
            declaration: String,
            location: Location,
            operator: String,
            expected: String,
        },
        #[finding(
            code = "CND005",
            severity = Error,
            message = "Configuration key of the conditional registration on {declaration} is empty"
        )]
        BlankKey {
            declaration: String,
            location: Location,
        },
        #[finding(
            code = "CND006",
            severity = Error,
            message = "{declaration} declares {count} conditional registration markers; at most one is allowed"
        )]
        MultiplePredicates {
            declaration: String,
            location: Location,
            count: usize,
        },
        #[finding(
            code = "CND007",
            severity = Warning,
            message = "Conditional registrations of {contract} by {declaration} and {other} are not mutually exclusive"
        )]
        OverlappingConditions {
            declaration: String,
            location: Location,
            contract: String,
            other: String,
        },
    }
}

/// Result of validating one declaration's predicate markers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateOutcome {
    /// Validated predicate when exactly one well-formed marker is present
    pub predicate: Option<ConditionalPredicate>,
    /// The declaration must be excluded from the plan
    pub malformed: bool,
    pub findings: Vec<ConditionalFinding>,
}

/// Validate the predicate markers of one declaration
pub fn validate_predicates(declaration: &ServiceDeclaration) -> PredicateOutcome {
    let tags = declaration.predicates();
    if tags.is_empty() {
        return PredicateOutcome::default();
    }

    let id = || declaration.id.clone();
    let location = || declaration.location.clone();
    let mut findings = Vec::new();

    if tags.len() > 1 {
        findings.push(ConditionalFinding::MultiplePredicates {
            declaration: id(),
            location: location(),
            count: tags.len(),
        });
    }

    if !declaration.lifetime().is_specified() {
        findings.push(ConditionalFinding::MissingLifetime {
            declaration: id(),
            location: location(),
        });
    }

    let mut validated = Vec::with_capacity(tags.len());
    for tag in tags {
        match tag.validate() {
            Ok(predicate) => validated.push(predicate),
            Err(defects) => findings.extend(defects.into_iter().map(|defect| match defect {
                PredicateDefect::NoCondition => ConditionalFinding::NoCondition {
                    declaration: id(),
                    location: location(),
                },
                PredicateDefect::KeyWithoutComparison => ConditionalFinding::KeyWithoutComparison {
                    declaration: id(),
                    location: location(),
                    key: tag.config_key.clone().unwrap_or_default(),
                },
                PredicateDefect::ComparisonWithoutKey => {
                    let (operator, expected) = tag
                        .comparison
                        .as_ref()
                        .map(|c| (c.operator.to_string(), c.expected.clone()))
                        .unwrap_or_default();
                    ConditionalFinding::ComparisonWithoutKey {
                        declaration: id(),
                        location: location(),
                        operator,
                        expected,
                    }
                }
                PredicateDefect::BlankKey => ConditionalFinding::BlankKey {
                    declaration: id(),
                    location: location(),
                },
            })),
        }
    }

    let malformed = !findings.is_empty();
    PredicateOutcome {
        predicate: if malformed { None } else { validated.pop() },
        malformed,
        findings,
    }
}

/// One conditional registration taking part in the overlap check
pub struct ConditionalCandidate<'a> {
    pub declaration: &'a ServiceDeclaration,
    pub contracts: &'a [String],
    pub predicate: &'a ConditionalPredicate,
}

/// Flag pairs of conditional implementations of one contract that can both
/// be active
///
/// The finding is attributed to the later declaration of each pair.
pub fn overlapping_predicates(candidates: &[ConditionalCandidate<'_>]) -> Vec<ConditionalFinding> {
    let mut by_contract: BTreeMap<&str, Vec<&ConditionalCandidate<'_>>> = BTreeMap::new();
    for candidate in candidates {
        for contract in candidate.contracts {
            by_contract.entry(contract.as_str()).or_default().push(candidate);
        }
    }

    let mut findings = Vec::new();
    for (contract, implementations) in by_contract {
        for (i, later) in implementations.iter().enumerate() {
            for earlier in &implementations[..i] {
                if !later.predicate.is_exclusive_with(earlier.predicate) {
                    findings.push(ConditionalFinding::OverlappingConditions {
                        declaration: later.declaration.id.clone(),
                        location: later.declaration.location.clone(),
                        contract: contract.to_string(),
                        other: earlier.declaration.id.clone(),
                    });
                }
            }
        }
    }
    findings
}
