//! Diagnostics handed back to the host

use crate::declaration::Location;
use serde::{Deserialize, Serialize};

/// Severity level for diagnostics
///
/// Mapping severities to build failure is host policy; the analyzer only tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hidden,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
            Self::Hidden => write!(f, "HIDDEN"),
        }
    }
}

/// Failure class of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCategory {
    /// Contradictory or duplicate metadata on one declaration
    StructuralConflict,
    /// Singleton depending on a shorter-lived contract
    LifetimeViolation,
    /// Conditional metadata that cannot be evaluated
    MalformedPredicate,
    /// Target contract without a known in-scope implementation
    UnresolvedReference,
}

impl std::fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StructuralConflict => write!(f, "Structural Conflict"),
            Self::LifetimeViolation => write!(f, "Lifetime Violation"),
            Self::MalformedPredicate => write!(f, "Malformed Predicate"),
            Self::UnresolvedReference => write!(f, "Unresolved Reference"),
        }
    }
}

/// One finding, as reported to the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable namespaced code (e.g. `LIF001`)
    pub code: String,
    pub category: DiagnosticCategory,
    pub severity: Severity,
    pub message: String,
    /// Declaration the finding is attributed to
    pub declaration: String,
    pub location: Location,
    /// Additional context (e.g. the base a violation was inherited from)
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.location, self.severity, self.code, self.message
        )?;
        for note in &self.notes {
            write!(f, " (note: {note})")?;
        }
        Ok(())
    }
}
