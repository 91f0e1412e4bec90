//! Diagnostic code catalog
//!
//! Stable codes hosts can reference in severity overrides. The analyzer's
//! finding definitions must stay in step with this table.

use crate::diagnostic::DiagnosticCategory::{
    LifetimeViolation, MalformedPredicate, StructuralConflict, UnresolvedReference,
};
use crate::diagnostic::Severity::{Error, Info, Warning};
use crate::diagnostic::{DiagnosticCategory, Severity};
use serde::Serialize;

/// Catalog entry for one diagnostic code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeInfo {
    pub code: &'static str,
    pub category: DiagnosticCategory,
    /// Built-in severity before host overrides
    pub severity: Severity,
    pub summary: &'static str,
}

const fn entry(
    code: &'static str,
    category: DiagnosticCategory,
    severity: Severity,
    summary: &'static str,
) -> CodeInfo {
    CodeInfo {
        code,
        category,
        severity,
        summary,
    }
}

/// Every diagnostic the analyzer can emit, ordered by code
pub const DIAGNOSTIC_CODES: &[CodeInfo] = &[
    entry("CFL001", StructuralConflict, Warning, "Contract declared as field and list entry"),
    entry("CFL002", StructuralConflict, Warning, "Duplicate contract within one list entry"),
    entry("CFL003", StructuralConflict, Warning, "Duplicate contract across list entries"),
    entry("CFL004", StructuralConflict, Info, "Redundant lifetime tag"),
    entry("CFL005", StructuralConflict, Info, "Selective list redundant with default inference"),
    entry("CFL006", StructuralConflict, Warning, "Register-all and selective list on one declaration"),
    entry("CFL007", StructuralConflict, Warning, "Mixed configuration and service fields without explicit lifetime"),
    entry("CND001", MalformedPredicate, Error, "Conditional registration without explicit lifetime"),
    entry("CND002", MalformedPredicate, Error, "Conditional registration with no condition"),
    entry("CND003", MalformedPredicate, Error, "Configuration key without comparison"),
    entry("CND004", MalformedPredicate, Error, "Comparison without configuration key"),
    entry("CND005", MalformedPredicate, Error, "Empty configuration key"),
    entry("CND006", MalformedPredicate, Error, "Multiple conditional registration markers"),
    entry("CND007", MalformedPredicate, Warning, "Overlapping conditional registrations"),
    entry("DEP001", StructuralConflict, Error, "Generated field-name collision"),
    entry("DEP002", StructuralConflict, Warning, "Self-dependency"),
    entry("DEP003", UnresolvedReference, Warning, "Dependency contract has no known implementation"),
    entry("LIF001", LifetimeViolation, Error, "Singleton depends on Scoped contract"),
    entry("LIF002", LifetimeViolation, Warning, "Singleton depends on Transient contract"),
    entry("LIF003", LifetimeViolation, Info, "Ambiguous lifetime edge"),
    entry("LIF004", LifetimeViolation, Error, "Background worker not Singleton"),
    entry("REG001", StructuralConflict, Error, "Empty selective registration list"),
    entry("REG002", StructuralConflict, Warning, "Skip entry names a contract not implemented"),
    entry("REG003", StructuralConflict, Info, "Skip entry targets a contract the mode does not register"),
    entry("REG004", UnresolvedReference, Warning, "Selective entry names a contract not implemented"),
    entry("REG005", StructuralConflict, Warning, "Conflicting registration modes"),
];

/// Catalog entry for `code`
pub fn lookup(code: &str) -> Option<&'static CodeInfo> {
    DIAGNOSTIC_CODES.iter().find(|info| info.code == code)
}

pub fn is_known(code: &str) -> bool {
    lookup(code).is_some()
}
