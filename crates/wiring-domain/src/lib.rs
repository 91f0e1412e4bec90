//! # Wiring Domain
//!
//! Core types shared by the wiring analyzer:
//!
//! - `declaration` - host-supplied class declarations and their decoded metadata bundle
//! - `service` - the analyzer's per-declaration model (`ServiceDeclaration`)
//! - `value_objects` - lifetimes, registration modes, predicates, naming directives
//!   and the produced registration plan
//! - `diagnostic` - severity-tagged findings handed back to the host
//! - `config` - analysis and diagnostic-severity policy
//! - `codes` - catalog of stable diagnostic codes
//!
//! This crate holds no analysis logic; it is the vocabulary the engine and its
//! hosts agree on.

pub mod codes;
pub mod config;
pub mod constants;
pub mod declaration;
pub mod diagnostic;
pub mod error;
pub mod service;
pub mod value_objects;

pub use codes::{CodeInfo, DIAGNOSTIC_CODES};
pub use config::{AmbiguousEdgePolicy, AnalysisConfig, DiagnosticsConfig};
pub use declaration::{
    ClassDeclaration, DeclarationFlags, DeclarationSnapshot, DependencyListEntry,
    FieldDescriptor, FieldKind, Location, MetadataBundle, RegisterAllTag, RegistrationScope,
    SelectiveTag,
};
pub use diagnostic::{Diagnostic, DiagnosticCategory, Severity};
pub use error::{Error, Result};
pub use service::{
    BaseRef, DependencyReference, DependencySource, ServiceDeclaration,
};
pub use value_objects::{
    Comparison, ComparisonOperator, ConditionalPredicate, ConfigurationCondition,
    ConstructorFieldMap, FieldMapping, InstanceSharing, Lifetime, NamingConvention,
    NamingDirective, PredicateDefect, PredicateTag, RegistrationDirective, RegistrationMode,
    RegistrationPlan,
};
