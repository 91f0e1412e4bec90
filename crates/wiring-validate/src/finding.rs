//! Finding Trait
//!
//! Generic trait for every analyzer finding. Each validator defines its own
//! finding enum (see [`crate::define_findings`]); the aggregator only sees
//! this trait and turns findings into host-facing [`Diagnostic`] values.

use std::fmt::Display;
use wiring_domain::{Diagnostic, DiagnosticCategory, Location, Severity};

/// Generic finding trait - all validator findings implement this
pub trait Finding: Display + Send + Sync {
    /// Stable diagnostic code (e.g., "LIF001", "CND003")
    fn code(&self) -> &'static str;

    /// Failure class for grouping in reports
    fn category(&self) -> DiagnosticCategory;

    /// Built-in severity before host overrides
    fn severity(&self) -> Severity;

    /// Declaration the finding is attributed to
    fn declaration(&self) -> &str;

    /// Source location of that declaration (if known)
    fn location(&self) -> Option<&Location>;

    /// Base declaration the offending edge was inherited from
    fn origin(&self) -> Option<&str> {
        None
    }

    /// Human-readable message describing the finding
    fn message(&self) -> String {
        self.to_string()
    }

    /// Convert into the host-facing diagnostic with its built-in severity
    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            code: self.code().to_string(),
            category: self.category(),
            severity: self.severity(),
            message: self.message(),
            declaration: self.declaration().to_string(),
            location: self.location().cloned().unwrap_or_default(),
            notes: self
                .origin()
                .map(|base| vec![format!("inherited from base declaration {base}")])
                .unwrap_or_default(),
        }
    }
}

/// Extension trait for converting finding lists to diagnostics
pub trait FindingExt {
    fn into_diagnostics(self) -> Vec<Diagnostic>;
}

impl<T: Finding> FindingExt for Vec<T> {
    fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.iter().map(Finding::to_diagnostic).collect()
    }
}
