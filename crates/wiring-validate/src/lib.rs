//! Registration Analysis for Declarative Dependency Injection
//!
//! This crate inspects annotated service declarations and produces:
//! - a registration plan (which concrete types and contracts are wired, with
//!   what lifetime, sharing and condition)
//! - diagnostics for lifetime mismatches, conflicting or duplicate metadata,
//!   malformed conditional predicates and unresolved references
//! - generated-constructor field names per declaration
//!
//! # Example
//!
//! ```ignore
//! use wiring_validate::Analyzer;
//! use wiring_domain::{AnalysisConfig, DeclarationSnapshot};
//!
//! let snapshot = DeclarationSnapshot::from_json_str(&text)?;
//! let output = Analyzer::new(AnalysisConfig::default()).analyze(&snapshot.declarations)?;
//! for directive in output.plan.directives() {
//!     println!("{} -> {}", directive.service, directive.implementation);
//! }
//! ```

pub mod finding;
#[macro_use]
pub mod finding_macro;

pub mod aggregate;
pub mod analyzer;
pub mod conditional;
pub mod conflict;
pub mod graph;
pub mod incremental;
pub mod index;
pub mod intent;
pub mod lifetime;
pub mod model;
pub mod registration;
pub mod reporter;

pub use aggregate::DiagnosticAggregator;
pub use analyzer::{AnalysisOutput, Analyzer, DeclarationAnalysis};
pub use conditional::ConditionalFinding;
pub use conflict::ConflictFinding;
pub use finding::{Finding, FindingExt};
pub use graph::{DependencyClosure, GraphFinding};
pub use incremental::{IncrementalAnalyzer, PassStats};
pub use index::{ContractIndex, ImplementationResolver};
pub use intent::{IntentSignals, evaluate_intent};
pub use lifetime::{LifetimeFinding, LifetimeValidator};
pub use model::DeclarationSet;
pub use registration::{RegistrationFinding, Selection};
pub use reporter::{AnalysisReport, AnalysisSummary, Reporter};

// Re-export domain types used throughout the public API
pub use wiring_domain::{
    AnalysisConfig, ClassDeclaration, Diagnostic, DiagnosticCategory, DiagnosticsConfig,
    RegistrationDirective, RegistrationPlan, Severity,
};
