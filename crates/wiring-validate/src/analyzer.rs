//! Analysis pass
//!
//! One pass over an immutable snapshot:
//!
//! 1. Model Builder: [`DeclarationSet::build`]
//! 2. Local pass, per declaration and free of shared state (parallel on rayon
//!    when enabled): intent, closure, constructor fields, structural,
//!    predicate and registration checks
//! 3. Global pass: contract index, lifetime walk, unresolved references,
//!    predicate overlap
//! 4. Aggregation into a plan, a diagnostic list and constructor field maps

use crate::aggregate::DiagnosticAggregator;
use crate::conditional::{self, ConditionalCandidate};
use crate::conflict;
use crate::finding::{Finding, FindingExt};
use crate::graph::{self, DependencyClosure};
use crate::index::{ContractIndex, ImplementationResolver};
use crate::intent::IntentSignals;
use crate::lifetime::{self, LifetimeValidator};
use crate::model::DeclarationSet;
use crate::registration;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info_span};
use wiring_domain::{
    AnalysisConfig, ClassDeclaration, ConditionalPredicate, ConstructorFieldMap, Diagnostic,
    DiagnosticsConfig, Lifetime, RegistrationDirective, RegistrationPlan, Result,
};

/// Result of the local pass for one declaration
///
/// Depends only on the declaration and its base chain, so it can be cached
/// across passes while those inputs are unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationAnalysis {
    /// Position in the current snapshot
    pub index: usize,
    pub id: String,
    pub intent: bool,
    /// Declared lifetime, or the default the declaration resolves to
    pub lifetime: Lifetime,
    /// Implemented contracts including inherited ones
    pub implemented: Vec<String>,
    pub closure: DependencyClosure,
    pub fields: ConstructorFieldMap,
    /// Validated predicate, when one well-formed marker is present
    pub predicate: Option<ConditionalPredicate>,
    /// Malformed predicate: no directives reach the plan
    pub excluded: bool,
    /// Directives this declaration contributes to the plan
    pub directives: Vec<RegistrationDirective>,
    /// Local findings, at their built-in severity
    pub diagnostics: Vec<Diagnostic>,
}

impl DeclarationAnalysis {
    fn empty(index: usize) -> Self {
        Self {
            index,
            id: String::new(),
            intent: false,
            lifetime: Lifetime::Unspecified,
            implemented: Vec::new(),
            closure: DependencyClosure::default(),
            fields: ConstructorFieldMap {
                declaration: String::new(),
                fields: Vec::new(),
            },
            predicate: None,
            excluded: false,
            directives: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Takes part in the contract index
    ///
    /// Declarations dropped from the plan for a malformed predicate are not
    /// implementations the container will ever see.
    fn is_implementation(&self, set: &DeclarationSet) -> bool {
        self.intent
            && !self.excluded
            && set
                .get(self.index)
                .is_some_and(|declaration| !declaration.flags.is_abstract)
    }
}

/// Everything handed back to the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisOutput {
    pub plan: RegistrationPlan,
    pub diagnostics: Vec<Diagnostic>,
    /// Field maps for candidates with a non-empty dependency closure
    pub constructor_fields: Vec<ConstructorFieldMap>,
}

impl AnalysisOutput {
    /// True when any diagnostic carries Error severity after overrides
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Field map generated for `declaration`
    pub fn fields_for(&self, declaration: &str) -> Option<&ConstructorFieldMap> {
        self.constructor_fields
            .iter()
            .find(|map| map.declaration == declaration)
    }
}

/// Registration-resolution and validation engine
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
    diagnostics: DiagnosticsConfig,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            diagnostics: DiagnosticsConfig::default(),
        }
    }

    /// Apply a host severity policy to produced diagnostics
    pub fn with_diagnostics_config(mut self, diagnostics: DiagnosticsConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn diagnostics_config(&self) -> &DiagnosticsConfig {
        &self.diagnostics
    }

    /// Analyze a snapshot, resolving contracts against the snapshot itself
    pub fn analyze(&self, inputs: &[ClassDeclaration]) -> Result<AnalysisOutput> {
        self.run(inputs, None)
    }

    /// Analyze a snapshot with a host resolver for contract implementations
    pub fn analyze_with_resolver(
        &self,
        inputs: &[ClassDeclaration],
        resolver: &dyn ImplementationResolver,
    ) -> Result<AnalysisOutput> {
        self.run(inputs, Some(resolver))
    }

    fn run(
        &self,
        inputs: &[ClassDeclaration],
        resolver: Option<&dyn ImplementationResolver>,
    ) -> Result<AnalysisOutput> {
        let _span = info_span!("analysis", declarations = inputs.len()).entered();
        let set = DeclarationSet::build(inputs, &self.config)?;
        let analyses = self.local_pass(&set, 0..set.len());
        Ok(self.global_pass(&set, analyses, resolver))
    }

    /// Evaluate the local pass for the given arena indices
    pub(crate) fn local_pass<I>(&self, set: &DeclarationSet, indices: I) -> Vec<DeclarationAnalysis>
    where
        I: IntoIterator<Item = usize>,
    {
        let indices: Vec<usize> = indices.into_iter().collect();
        if self.config.parallel {
            indices
                .into_par_iter()
                .map(|index| analyze_declaration(set, index, &self.config))
                .collect()
        } else {
            indices
                .into_iter()
                .map(|index| analyze_declaration(set, index, &self.config))
                .collect()
        }
    }

    /// Cross-declaration checks and final assembly
    ///
    /// `analyses` must hold one entry per declaration, in arena order.
    pub(crate) fn global_pass(
        &self,
        set: &DeclarationSet,
        analyses: Vec<DeclarationAnalysis>,
        resolver: Option<&dyn ImplementationResolver>,
    ) -> AnalysisOutput {
        let index = ContractIndex::build(
            analyses
                .iter()
                .filter(|analysis| analysis.is_implementation(set))
                .map(|analysis| (analysis.id.as_str(), analysis.implemented.as_slice())),
        );
        let resolver = resolver.unwrap_or(&index as &dyn ImplementationResolver);
        let lifetimes: HashMap<String, Lifetime> = analyses
            .iter()
            .filter(|analysis| analysis.is_implementation(set))
            .map(|analysis| (analysis.id.clone(), analysis.lifetime))
            .collect();
        let lifetime_validator = LifetimeValidator::new(resolver, &lifetimes, &self.config);

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let mut candidates: Vec<ConditionalCandidate<'_>> = Vec::new();
        for analysis in analyses.iter().filter(|analysis| analysis.intent) {
            let Some(declaration) = set.get(analysis.index) else {
                continue;
            };
            diagnostics.extend(analysis.diagnostics.iter().cloned());
            diagnostics.extend(
                lifetime_validator
                    .validate(declaration, analysis.lifetime, &analysis.closure)
                    .into_diagnostics(),
            );
            diagnostics.extend(
                graph::unresolved_references(declaration, &analysis.closure, resolver, &self.config)
                    .into_diagnostics(),
            );

            if let Some(predicate) = &analysis.predicate
                && analysis.is_implementation(set)
            {
                candidates.push(ConditionalCandidate {
                    declaration,
                    contracts: &analysis.implemented,
                    predicate,
                });
            }
        }
        diagnostics.extend(conditional::overlapping_predicates(&candidates).into_diagnostics());

        let aggregator =
            DiagnosticAggregator::new(&self.diagnostics, set.iter().map(|d| d.id.as_str()));
        let diagnostics = aggregator.aggregate(diagnostics);

        let plan = RegistrationPlan::from_directives(
            analyses
                .iter()
                .flat_map(|analysis| analysis.directives.iter().cloned()),
        );
        let constructor_fields: Vec<ConstructorFieldMap> = analyses
            .iter()
            .filter(|analysis| analysis.intent && !analysis.closure.is_empty())
            .map(|analysis| analysis.fields.clone())
            .collect();

        debug!(
            contracts = index.len(),
            directives = plan.len(),
            diagnostics = diagnostics.len(),
            constructors = constructor_fields.len(),
            "Analysis pass complete"
        );

        AnalysisOutput {
            plan,
            diagnostics,
            constructor_fields,
        }
    }
}

/// Local pass for one declaration
pub(crate) fn analyze_declaration(
    set: &DeclarationSet,
    index: usize,
    config: &AnalysisConfig,
) -> DeclarationAnalysis {
    let Some(declaration) = set.get(index) else {
        return DeclarationAnalysis::empty(index);
    };

    let implemented = set.implemented_contracts(index);
    let intent = IntentSignals::of(declaration, &implemented).has_intent();
    let closure = graph::build_closure(set, index);
    let (fields, field_findings) = graph::constructor_fields(declaration, &closure, config);

    if !intent {
        return DeclarationAnalysis {
            index,
            id: declaration.id.clone(),
            intent,
            lifetime: declaration.lifetime(),
            implemented,
            closure,
            fields,
            predicate: None,
            excluded: false,
            directives: Vec::new(),
            diagnostics: Vec::new(),
        };
    }

    let fallback = if declaration.flags.background_worker {
        Lifetime::Singleton
    } else {
        config.default_lifetime
    };
    let lifetime = declaration.lifetime().or(fallback);

    let outcome = conditional::validate_predicates(declaration);
    let selection = registration::select_registrations(
        declaration,
        &implemented,
        lifetime,
        outcome.predicate.as_ref(),
    );

    let mut diagnostics = field_findings.into_diagnostics();
    diagnostics.extend(graph::self_dependencies(declaration, &closure, &implemented).into_diagnostics());
    diagnostics.extend(conflict::structural_conflicts(declaration, &implemented, config).into_diagnostics());
    diagnostics.extend(lifetime::worker_lifetime(declaration).map(|finding| finding.to_diagnostic()));
    diagnostics.extend(outcome.findings.into_diagnostics());
    diagnostics.extend(selection.findings.into_diagnostics());

    let registrable = !declaration.flags.is_abstract
        && !declaration.flags.externally_managed
        && !outcome.malformed;
    if outcome.malformed {
        debug!(declaration = %declaration.id, "Malformed predicate, excluded from plan");
    }

    DeclarationAnalysis {
        index,
        id: declaration.id.clone(),
        intent,
        lifetime,
        implemented,
        closure,
        fields,
        predicate: outcome.predicate,
        excluded: outcome.malformed,
        directives: if registrable {
            selection.directives
        } else {
            Vec::new()
        },
        diagnostics,
    }
}
