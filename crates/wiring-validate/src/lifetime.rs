//! Lifetime Validator
//!
//! Walks the dependency closure of every Singleton and flags edges that
//! capture shorter-lived instances:
//! - LIF001: uniquely implemented Scoped contract (hard violation)
//! - LIF002: uniquely implemented Transient contract
//! - LIF003: several known implementations, at least one shorter-lived or of
//!   unknown lifetime (low confidence)
//! - LIF004: background worker declared with a non-Singleton lifetime
//!
//! Edges inherited from a base are reported against the most-derived
//! declaration with a note naming the base.

use crate::graph::DependencyClosure;
use crate::index::ImplementationResolver;
use std::collections::HashMap;
use tracing::trace;
use wiring_domain::{
    AmbiguousEdgePolicy, AnalysisConfig, DependencyReference, DiagnosticCategory, Lifetime,
    ServiceDeclaration,
};

define_findings! {
    DiagnosticCategory::LifetimeViolation,
    pub enum LifetimeFinding {
        #[finding(
            code = "LIF001",
            severity = Error,
            message = "Singleton {declaration} depends on {contract}, implemented by Scoped {implementation}",
            origin = origin
        )]
        CapturesScoped {
            declaration: String,
            location: Location,
            contract: String,
            implementation: String,
            origin: Option<String>,
        },
        #[finding(
            code = "LIF002",
            severity = Warning,
            message = "Singleton {declaration} depends on {contract}, implemented by Transient {implementation}",
            origin = origin
        )]
        CapturesTransient {
            declaration: String,
            location: Location,
            contract: String,
            implementation: String,
            origin: Option<String>,
        },
        #[finding(
            code = "LIF003",
            severity = Info,
            message = "Singleton {declaration} depends on {contract}, which has {count} implementations, at least one shorter-lived or of unknown lifetime; the captured lifetime cannot be determined statically",
            origin = origin
        )]
        AmbiguousLifetime {
            declaration: String,
            location: Location,
            contract: String,
            count: usize,
            origin: Option<String>,
        },
        #[finding(
            code = "LIF004",
            severity = Error,
            message = "Background worker {declaration} is declared {lifetime}; background workers must be Singleton"
        )]
        WorkerNotSingleton {
            declaration: String,
            location: Location,
            lifetime: Lifetime,
        },
    }
}

/// Background-worker shape check, independent of the dependency walk
pub fn worker_lifetime(declaration: &ServiceDeclaration) -> Option<LifetimeFinding> {
    let declared = declaration.lifetime();
    (declaration.flags.background_worker
        && declared.is_specified()
        && declared != Lifetime::Singleton)
        .then(|| LifetimeFinding::WorkerNotSingleton {
            declaration: declaration.id.clone(),
            location: declaration.location.clone(),
            lifetime: declared,
        })
}

/// Captive-dependency checker for one analysis pass
pub struct LifetimeValidator<'a> {
    resolver: &'a dyn ImplementationResolver,
    lifetimes: &'a HashMap<String, Lifetime>,
    config: &'a AnalysisConfig,
}

impl<'a> LifetimeValidator<'a> {
    /// `lifetimes` maps each in-scope implementation to its resolved lifetime
    pub fn new(
        resolver: &'a dyn ImplementationResolver,
        lifetimes: &'a HashMap<String, Lifetime>,
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            resolver,
            lifetimes,
            config,
        }
    }

    /// Check every edge of a Singleton's closure
    pub fn validate(
        &self,
        declaration: &ServiceDeclaration,
        lifetime: Lifetime,
        closure: &DependencyClosure,
    ) -> Vec<LifetimeFinding> {
        if lifetime != Lifetime::Singleton {
            return Vec::new();
        }

        closure
            .references
            .iter()
            .filter(|r| !r.external && !self.config.is_external_contract(&r.contract))
            .filter_map(|r| self.check_edge(declaration, r))
            .collect()
    }

    fn check_edge(
        &self,
        declaration: &ServiceDeclaration,
        reference: &DependencyReference,
    ) -> Option<LifetimeFinding> {
        // Multiplicity counts every implementation the resolver knows; only
        // in-scope ones have a lifetime.
        let mut implementations: Vec<(String, Option<Lifetime>)> = self
            .resolver
            .implementations(&reference.contract)
            .into_iter()
            .map(|id| {
                let lifetime = self.lifetimes.get(&id).copied();
                (id, lifetime)
            })
            .collect();

        let (implementation, captured) = match implementations.len() {
            0 => return None,
            1 => match implementations.pop()? {
                (id, Some(lifetime)) => (id, lifetime),
                (_, None) => return None,
            },
            count => {
                let may_capture = implementations.iter().any(|(_, lifetime)| {
                    lifetime.is_none_or(|lifetime| Lifetime::Singleton.outlives(lifetime))
                });
                if !may_capture {
                    return None;
                }
                trace!(
                    declaration = %declaration.id,
                    contract = %reference.contract,
                    count,
                    "Ambiguous lifetime edge"
                );
                match self.config.ambiguous_edge_policy {
                    AmbiguousEdgePolicy::Ignore => return None,
                    AmbiguousEdgePolicy::LowConfidence => {
                        return Some(LifetimeFinding::AmbiguousLifetime {
                            declaration: declaration.id.clone(),
                            location: declaration.location.clone(),
                            contract: reference.contract.clone(),
                            count,
                            origin: reference.origin.clone(),
                        });
                    }
                    AmbiguousEdgePolicy::Strict => implementations
                        .into_iter()
                        .filter_map(|(id, lifetime)| lifetime.map(|lifetime| (id, lifetime)))
                        .min_by_key(|(_, lifetime)| capture_rank(*lifetime))?,
                }
            }
        };

        let declaration_id = declaration.id.clone();
        let location = declaration.location.clone();
        let contract = reference.contract.clone();
        let origin = reference.origin.clone();
        match captured {
            Lifetime::Scoped => Some(LifetimeFinding::CapturesScoped {
                declaration: declaration_id,
                location,
                contract,
                implementation,
                origin,
            }),
            Lifetime::Transient => Some(LifetimeFinding::CapturesTransient {
                declaration: declaration_id,
                location,
                contract,
                implementation,
                origin,
            }),
            Lifetime::Singleton | Lifetime::Unspecified => None,
        }
    }
}

/// Strict policy reports the most severe capture: Scoped, then Transient
fn capture_rank(lifetime: Lifetime) -> u8 {
    match lifetime {
        Lifetime::Scoped => 0,
        Lifetime::Transient => 1,
        Lifetime::Singleton => 2,
        Lifetime::Unspecified => 3,
    }
}
