//! Conditional registration predicates
//!
//! [`PredicateTag`] is the raw decoded marker exactly as the host supplied it
//! and may be malformed. [`PredicateTag::validate`] turns a well-formed tag
//! into a [`ConditionalPredicate`] or reports every defect found.

use crate::constants::ENVIRONMENT_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Comparison applied to a configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Value must equal the expected text
    Equals,
    /// Value must differ from the expected text
    NotEquals,
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equals => write!(f, "=="),
            Self::NotEquals => write!(f, "!="),
        }
    }
}

/// Operator plus expected value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Comparison {
    pub operator: ComparisonOperator,
    #[serde(default)]
    pub expected: String,
}

/// Raw conditional-registration marker
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PredicateTag {
    /// Comma-separated environments the registration is active in
    pub environment: Option<String>,
    /// Comma-separated environments the registration is inactive in
    pub not_environment: Option<String>,
    /// Configuration key to compare
    pub config_key: Option<String>,
    /// Comparison applied to the configuration value
    pub comparison: Option<Comparison>,
}

/// Reason a [`PredicateTag`] cannot be evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateDefect {
    /// No environment or configuration condition present
    NoCondition,
    /// Configuration key given without a comparison
    KeyWithoutComparison,
    /// Comparison given without a configuration key
    ComparisonWithoutKey,
    /// Configuration key is empty or whitespace
    BlankKey,
}

/// Configuration-value condition of a validated predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigurationCondition {
    pub key: String,
    pub operator: ComparisonOperator,
    pub expected: String,
}

/// Validated conditional-registration gate
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionalPredicate {
    /// Environments the registration is active in (empty = any)
    pub environments: Vec<String>,
    /// Environments the registration is inactive in
    pub excluded_environments: Vec<String>,
    /// Optional configuration-value comparison
    pub configuration: Option<ConfigurationCondition>,
}

impl PredicateTag {
    /// Validate the tag, collecting every defect
    pub fn validate(&self) -> std::result::Result<ConditionalPredicate, Vec<PredicateDefect>> {
        let environments = split_environments(self.environment.as_deref());
        let excluded_environments = split_environments(self.not_environment.as_deref());
        let mut defects = Vec::new();

        let configuration = match (&self.config_key, &self.comparison) {
            (Some(key), Some(comparison)) => {
                if key.trim().is_empty() {
                    defects.push(PredicateDefect::BlankKey);
                    None
                } else {
                    Some(ConfigurationCondition {
                        key: key.trim().to_string(),
                        operator: comparison.operator,
                        expected: comparison.expected.clone(),
                    })
                }
            }
            (Some(key), None) => {
                if key.trim().is_empty() {
                    defects.push(PredicateDefect::BlankKey);
                }
                defects.push(PredicateDefect::KeyWithoutComparison);
                None
            }
            (None, Some(_)) => {
                defects.push(PredicateDefect::ComparisonWithoutKey);
                None
            }
            (None, None) => None,
        };

        let has_condition = !environments.is_empty()
            || !excluded_environments.is_empty()
            || self.config_key.is_some()
            || self.comparison.is_some();
        if !has_condition {
            defects.push(PredicateDefect::NoCondition);
        }

        if defects.is_empty() {
            Ok(ConditionalPredicate {
                environments,
                excluded_environments,
                configuration,
            })
        } else {
            Err(defects)
        }
    }
}

impl ConditionalPredicate {
    /// True when no input can satisfy both predicates at once
    pub fn is_exclusive_with(&self, other: &ConditionalPredicate) -> bool {
        self.environments_exclusive(other) || self.configuration_exclusive(other)
    }

    fn environments_exclusive(&self, other: &ConditionalPredicate) -> bool {
        let disjoint = !self.environments.is_empty()
            && !other.environments.is_empty()
            && !self
                .environments
                .iter()
                .any(|env| contains_ignore_case(&other.environments, env));

        let covered_by = |active: &[String], excluded: &[String]| {
            !active.is_empty() && active.iter().all(|env| contains_ignore_case(excluded, env))
        };

        disjoint
            || covered_by(&self.environments, &other.excluded_environments)
            || covered_by(&other.environments, &self.excluded_environments)
    }

    fn configuration_exclusive(&self, other: &ConditionalPredicate) -> bool {
        let (Some(left), Some(right)) = (&self.configuration, &other.configuration) else {
            return false;
        };
        if left.key != right.key {
            return false;
        }
        match (left.operator, right.operator) {
            (ComparisonOperator::Equals, ComparisonOperator::Equals) => {
                left.expected != right.expected
            }
            (ComparisonOperator::Equals, ComparisonOperator::NotEquals)
            | (ComparisonOperator::NotEquals, ComparisonOperator::Equals) => {
                left.expected == right.expected
            }
            (ComparisonOperator::NotEquals, ComparisonOperator::NotEquals) => false,
        }
    }
}

impl std::fmt::Display for ConditionalPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if !self.environments.is_empty() {
            parts.push(format!("environment in [{}]", self.environments.join(", ")));
        }
        if !self.excluded_environments.is_empty() {
            parts.push(format!(
                "environment not in [{}]",
                self.excluded_environments.join(", ")
            ));
        }
        if let Some(config) = &self.configuration {
            parts.push(format!(
                "{} {} \"{}\"",
                config.key, config.operator, config.expected
            ));
        }
        write!(f, "{}", parts.join(" && "))
    }
}

fn split_environments(raw: Option<&str>) -> Vec<String> {
    raw.map(|text| {
        text.split(ENVIRONMENT_SEPARATOR)
            .map(str::trim)
            .filter(|env| !env.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|env| env.eq_ignore_ascii_case(needle))
}

