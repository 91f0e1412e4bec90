//! Analysis Report Generation
//!
//! Generates reports in two formats:
//! - JSON for build tooling
//! - Human-readable for terminal output

use crate::analyzer::AnalysisOutput;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wiring_domain::{
    ConstructorFieldMap, Diagnostic, DiagnosticCategory, RegistrationDirective, Severity,
};

/// Analysis report for one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp of the analysis run (RFC 3339)
    pub timestamp: String,
    /// Snapshot the report was produced from
    pub source: String,
    pub summary: AnalysisSummary,
    pub directives: Vec<RegistrationDirective>,
    pub diagnostics: Vec<Diagnostic>,
    pub constructor_fields: Vec<ConstructorFieldMap>,
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_directives: usize,
    pub total_diagnostics: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub hidden: usize,
    /// Diagnostic count per category
    pub by_category: BTreeMap<String, usize>,
    /// No Error-level diagnostics after severity overrides
    pub passed: bool,
}

impl AnalysisSummary {
    pub fn of(output: &AnalysisOutput) -> Self {
        let count = |severity: Severity| {
            output
                .diagnostics
                .iter()
                .filter(|d| d.severity == severity)
                .count()
        };
        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
        for diagnostic in &output.diagnostics {
            *by_category
                .entry(category_key(diagnostic.category).to_string())
                .or_default() += 1;
        }

        let errors = count(Severity::Error);
        Self {
            total_directives: output.plan.len(),
            total_diagnostics: output.diagnostics.len(),
            errors,
            warnings: count(Severity::Warning),
            infos: count(Severity::Info),
            hidden: count(Severity::Hidden),
            by_category,
            passed: errors == 0,
        }
    }
}

impl AnalysisReport {
    pub fn new(source: impl Into<String>, output: &AnalysisOutput) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            source: source.into(),
            summary: AnalysisSummary::of(output),
            directives: output.plan.directives().to_vec(),
            diagnostics: output.diagnostics.clone(),
            constructor_fields: output.constructor_fields.clone(),
        }
    }
}

/// Report generator
pub struct Reporter;

impl Reporter {
    /// Generate JSON report
    pub fn to_json(report: &AnalysisReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Generate human-readable report
    pub fn to_human_readable(report: &AnalysisReport) -> String {
        let mut output = String::new();
        let summary = &report.summary;

        output.push_str("=== Wiring Analysis Report ===\n\n");
        output.push_str(&format!("Timestamp: {}\n", report.timestamp));
        output.push_str(&format!("Snapshot:  {}\n\n", report.source));

        output.push_str("--- Summary ---\n");
        output.push_str(&format!("Registrations: {}\n", summary.total_directives));
        output.push_str(&format!("Diagnostics:   {}\n", summary.total_diagnostics));
        output.push_str(&format!("  Errors:   {}\n", summary.errors));
        output.push_str(&format!("  Warnings: {}\n", summary.warnings));
        output.push_str(&format!("  Info:     {}\n", summary.infos));
        if summary.hidden > 0 {
            output.push_str(&format!("  Hidden:   {}\n", summary.hidden));
        }
        for (category, count) in &summary.by_category {
            output.push_str(&format!("  {category:<22} {count}\n"));
        }
        output.push('\n');

        let status = if summary.passed { "PASSED" } else { "FAILED" };
        output.push_str(&format!("Status: {status}\n\n"));

        if !report.directives.is_empty() {
            output.push_str("--- Registration Plan ---\n");
            for directive in &report.directives {
                output.push_str(&format!("  {}\n", render_directive(directive)));
            }
            output.push('\n');
        }

        if !report.constructor_fields.is_empty() {
            output.push_str("--- Generated Constructor Fields ---\n");
            for map in &report.constructor_fields {
                output.push_str(&format!("  {}\n", map.declaration));
                for field in &map.fields {
                    output.push_str(&format!("    {} <- {}\n", field.field, field.contract));
                }
            }
            output.push('\n');
        }

        let visible: Vec<&Diagnostic> = report
            .diagnostics
            .iter()
            .filter(|d| d.severity != Severity::Hidden)
            .collect();
        if !visible.is_empty() {
            output.push_str("--- Diagnostics ---\n");
            for diagnostic in visible {
                output.push_str(&format!("  {diagnostic}\n"));
            }
            output.push('\n');
        }

        output
    }
}

fn render_directive(directive: &RegistrationDirective) -> String {
    let mut line = format!(
        "{} -> {} ({})",
        directive.service, directive.implementation, directive.lifetime
    );
    if let Some(anchor) = &directive.factory {
        line.push_str(&format!(" via {anchor}"));
    }
    if directive.hosted {
        line.push_str(" [hosted]");
    }
    if let Some(condition) = &directive.condition {
        line.push_str(&format!(" when {condition}"));
    }
    line
}

fn category_key(category: DiagnosticCategory) -> &'static str {
    match category {
        DiagnosticCategory::StructuralConflict => "structural_conflict",
        DiagnosticCategory::LifetimeViolation => "lifetime_violation",
        DiagnosticCategory::MalformedPredicate => "malformed_predicate",
        DiagnosticCategory::UnresolvedReference => "unresolved_reference",
    }
}
