//! Dependency Graph Builder
//!
//! Builds each declaration's closed dependency set:
//! - direct field-style references
//! - declarative-list entries, each with its own naming directive
//! - everything inherited transitively from in-scope base declarations
//!
//! Dependencies target contracts, not declarations, so inter-declaration
//! cycles are not modelled here; construction ordering is a container concern.

pub mod naming;

use crate::index::ImplementationResolver;
use crate::model::DeclarationSet;
use std::collections::HashMap;
use wiring_domain::{
    AnalysisConfig, ConstructorFieldMap, DependencyReference, DependencySource, DiagnosticCategory,
    FieldMapping, NamingDirective, ServiceDeclaration,
};

define_findings! {
    DiagnosticCategory::StructuralConflict,
    pub enum GraphFinding {
        #[finding(
            code = "DEP001",
            severity = Error,
            message = "Generated field {field} for {contract} on {declaration} collides with the field for {existing_contract}"
        )]
        FieldNameCollision {
            declaration: String,
            location: Location,
            field: String,
            contract: String,
            existing_contract: String,
        },
        #[finding(
            code = "DEP002",
            severity = Warning,
            message = "{declaration} depends on its own contract {contract}"
        )]
        SelfDependency {
            declaration: String,
            location: Location,
            contract: String,
        },
        #[finding(
            code = "DEP003",
            severity = Warning,
            category = UnresolvedReference,
            message = "{declaration} depends on {contract}, which has no known implementation in scope"
        )]
        UnresolvedDependency {
            declaration: String,
            location: Location,
            contract: String,
        },
    }
}

/// Closed dependency set of one declaration
///
/// Inherited edges come first (root-most base first), then own fields, then
/// own declarative entries. Each contract appears once; the first edge wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyClosure {
    pub references: Vec<DependencyReference>,
}

impl DependencyClosure {
    pub fn own(&self) -> impl Iterator<Item = &DependencyReference> {
        self.references.iter().filter(|r| !r.is_inherited())
    }

    pub fn inherited(&self) -> impl Iterator<Item = &DependencyReference> {
        self.references.iter().filter(|r| r.is_inherited())
    }

    pub fn contracts(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(|r| r.contract.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

/// Build the closure of the declaration at `index`
pub fn build_closure(set: &DeclarationSet, index: usize) -> DependencyClosure {
    let Some(declaration) = set.get(index) else {
        return DependencyClosure::default();
    };

    let mut bases: Vec<&ServiceDeclaration> = set.ancestors(index).collect();
    bases.reverse();

    let inherited = bases.into_iter().flat_map(|base| {
        base.dependencies
            .iter()
            .map(move |reference| reference.inherited_from(&base.id))
    });
    let own = declaration.dependencies.iter().cloned();

    let mut references: Vec<DependencyReference> = Vec::new();
    for reference in inherited.chain(own) {
        if !references.iter().any(|r| r.contract == reference.contract) {
            references.push(reference);
        }
    }
    DependencyClosure { references }
}

/// Generated-constructor field identifier for one edge
pub fn field_identifier(reference: &DependencyReference, config: &AnalysisConfig) -> String {
    match &reference.source {
        DependencySource::Field { name } => name.clone(),
        DependencySource::DeclarativeList { .. } => {
            let fallback = NamingDirective::default();
            let directive = reference.naming.as_ref().unwrap_or(&fallback);
            naming::field_name(&reference.contract, directive, config.contract_marker)
        }
    }
}

/// Contract → field mapping for a declaration's closure
///
/// A collision between two contracts' computed names keeps the first mapping
/// and is reported when at least one side is declared on this declaration.
pub fn constructor_fields(
    declaration: &ServiceDeclaration,
    closure: &DependencyClosure,
    config: &AnalysisConfig,
) -> (ConstructorFieldMap, Vec<GraphFinding>) {
    let mut fields: Vec<FieldMapping> = Vec::new();
    let mut by_name: HashMap<String, (String, bool)> = HashMap::new();
    let mut findings = Vec::new();

    for reference in &closure.references {
        let field = field_identifier(reference, config);
        if let Some((existing_contract, existing_inherited)) = by_name.get(&field) {
            if !(reference.is_inherited() && *existing_inherited) {
                findings.push(GraphFinding::FieldNameCollision {
                    declaration: declaration.id.clone(),
                    location: declaration.location.clone(),
                    field: field.clone(),
                    contract: reference.contract.clone(),
                    existing_contract: existing_contract.clone(),
                });
            }
            continue;
        }
        by_name.insert(
            field.clone(),
            (reference.contract.clone(), reference.is_inherited()),
        );
        fields.push(FieldMapping {
            contract: reference.contract.clone(),
            field,
            origin: reference.origin.clone(),
        });
    }

    let map = ConstructorFieldMap {
        declaration: declaration.id.clone(),
        fields,
    };
    (map, findings)
}

/// Own edges that target the declaration itself or a contract it implements
pub fn self_dependencies(
    declaration: &ServiceDeclaration,
    closure: &DependencyClosure,
    implemented: &[String],
) -> Vec<GraphFinding> {
    closure
        .own()
        .filter(|r| r.contract == declaration.id || implemented.contains(&r.contract))
        .map(|r| GraphFinding::SelfDependency {
            declaration: declaration.id.clone(),
            location: declaration.location.clone(),
            contract: r.contract.clone(),
        })
        .collect()
}

/// Own edges whose contract has no known implementation
///
/// Edges marked external and contracts supplied by the host framework are
/// never reported.
pub fn unresolved_references(
    declaration: &ServiceDeclaration,
    closure: &DependencyClosure,
    resolver: &dyn ImplementationResolver,
    config: &AnalysisConfig,
) -> Vec<GraphFinding> {
    closure
        .own()
        .filter(|r| !r.external && !config.is_external_contract(&r.contract))
        .filter(|r| resolver.implementations(&r.contract).is_empty())
        .map(|r| GraphFinding::UnresolvedDependency {
            declaration: declaration.id.clone(),
            location: declaration.location.clone(),
            contract: r.contract.clone(),
        })
        .collect()
}
