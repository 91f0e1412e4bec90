//! Analysis policy types
//!
//! Loaded by the infrastructure layer; defined here so the engine depends on
//! policy values, not on how they are sourced.

use crate::constants::{DEFAULT_CONTRACT_MARKER, DEFAULT_EXTERNAL_CONTRACTS};
use crate::diagnostic::Severity;
use crate::value_objects::{Lifetime, NamingDirective};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Treatment of a Singleton edge to a contract with several implementations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousEdgePolicy {
    /// Emit a low-confidence diagnostic, never a hard violation
    #[default]
    LowConfidence,
    /// Report against the shortest-lived implementation as if it were unique
    Strict,
    /// Skip ambiguous edges entirely
    Ignore,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lifetime of a candidate without an explicit tag
    pub default_lifetime: Lifetime,
    /// Field naming applied when a declarative entry does not override it
    pub naming: NamingDirective,
    /// Leading marker stripped from contract names
    pub contract_marker: char,
    pub ambiguous_edge_policy: AmbiguousEdgePolicy,
    /// Contract names (or generic prefixes) supplied by the host framework
    pub external_contracts: Vec<String>,
    /// Evaluate per-declaration work on the rayon pool
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_lifetime: Lifetime::Scoped,
            naming: NamingDirective::default(),
            contract_marker: DEFAULT_CONTRACT_MARKER,
            ambiguous_edge_policy: AmbiguousEdgePolicy::default(),
            external_contracts: DEFAULT_EXTERNAL_CONTRACTS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// True when `contract` is provided by the host framework
    ///
    /// Matches on the simple name with generic arguments removed, so
    /// `Microsoft.Extensions.Logging.ILogger<Foo>` matches `ILogger`.
    pub fn is_external_contract(&self, contract: &str) -> bool {
        let without_generics = contract.split('<').next().unwrap_or(contract);
        let simple = without_generics
            .rsplit('.')
            .next()
            .unwrap_or(without_generics);
        self.external_contracts
            .iter()
            .any(|external| external == simple || external == without_generics)
    }
}

/// Host severity policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Per-code severity replacing the built-in default
    pub severity_overrides: BTreeMap<String, Severity>,
}

impl DiagnosticsConfig {
    pub fn with_override(mut self, code: impl Into<String>, severity: Severity) -> Self {
        self.severity_overrides.insert(code.into(), severity);
        self
    }

    /// Effective severity for `code`
    pub fn severity_for(&self, code: &str, default: Severity) -> Severity {
        self.severity_overrides
            .get(code)
            .copied()
            .unwrap_or(default)
    }
}
