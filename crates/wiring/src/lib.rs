//! # Wiring
//!
//! Build-time analysis of declarative dependency-injection metadata.
//!
//! Given a snapshot of annotated class declarations, the analyzer produces a
//! registration plan (which concrete types and contracts a container should
//! wire, with what lifetime and sharing), generated-constructor field names,
//! and diagnostics for lifetime mismatches, conflicting metadata, malformed
//! conditional predicates and unresolved references.
//!
//! ## Example
//!
//! ```ignore
//! use wiring::{Analyzer, AnalysisConfig};
//! use wiring::infrastructure::load_snapshot;
//!
//! let snapshot = load_snapshot("declarations.json")?;
//! let output = Analyzer::new(AnalysisConfig::default()).analyze(&snapshot.declarations)?;
//! assert!(!output.has_errors());
//! ```
//!
//! ## Architecture
//!
//! - `domain` - declarations, value objects, diagnostics and policy types
//! - `validate` - the analysis engine and reporter
//! - `infrastructure` - configuration, logging and snapshot loading
//! - `cli` - the `wiring` command line front end

pub mod cli;

/// Domain layer - declarations, plan and diagnostic types
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wiring_domain::*;
}

/// Analysis engine
///
/// Re-exports from the validate crate for convenience
pub mod validate {
    pub use wiring_validate::*;
}

/// Infrastructure layer - config, logging and snapshot loading
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wiring_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the engine entry points at the crate root
pub use validate::{
    AnalysisOutput, AnalysisReport, Analyzer, ContractIndex, ImplementationResolver,
    IncrementalAnalyzer, Reporter,
};
