//! Conflict & Duplicate Validator
//!
//! Flags contradictory or duplicate metadata on a single declaration. Every
//! finding here is non-fatal; the first-seen declaration of a contract wins
//! and plan generation continues.

use crate::intent::IntentSignals;
use std::collections::HashMap;
use wiring_domain::{
    AnalysisConfig, DiagnosticCategory, FieldKind, Lifetime, RegistrationScope,
    ServiceDeclaration,
};

define_findings! {
    DiagnosticCategory::StructuralConflict,
    pub enum ConflictFinding {
        #[finding(
            code = "CFL001",
            severity = Warning,
            message = "{contract} is declared on {declaration} both as field {field} and in a dependency list"
        )]
        FieldAndListEntry {
            declaration: String,
            location: Location,
            contract: String,
            field: String,
        },
        #[finding(
            code = "CFL002",
            severity = Warning,
            message = "{contract} appears more than once in dependency list entry {entry} of {declaration}"
        )]
        DuplicateInEntry {
            declaration: String,
            location: Location,
            contract: String,
            entry: usize,
        },
        #[finding(
            code = "CFL003",
            severity = Warning,
            message = "{contract} is listed in dependency list entries {first} and {second} of {declaration}"
        )]
        DuplicateAcrossEntries {
            declaration: String,
            location: Location,
            contract: String,
            first: usize,
            second: usize,
        },
        #[finding(
            code = "CFL004",
            severity = Info,
            message = "Lifetime {lifetime} on {declaration} restates the default already implied by its other metadata"
        )]
        RedundantLifetime {
            declaration: String,
            location: Location,
            lifetime: Lifetime,
        },
        #[finding(
            code = "CFL005",
            severity = Info,
            message = "Selective list on {declaration} names every implemented contract and the concrete type; default inference registers the same set"
        )]
        RedundantSelective {
            declaration: String,
            location: Location,
        },
        #[finding(
            code = "CFL006",
            severity = Warning,
            message = "{declaration} declares both register-all and a selective list; the selective list is redundant"
        )]
        RedundantSelectiveWithAll {
            declaration: String,
            location: Location,
        },
        #[finding(
            code = "CFL007",
            severity = Warning,
            message = "{declaration} mixes configuration bindings with service dependencies but declares no explicit lifetime"
        )]
        MixedFieldsWithoutLifetime {
            declaration: String,
            location: Location,
        },
    }
}

/// Run every structural check against one declaration
pub fn structural_conflicts(
    declaration: &ServiceDeclaration,
    implemented: &[String],
    config: &AnalysisConfig,
) -> Vec<ConflictFinding> {
    let mut findings = duplicate_dependencies(declaration);
    findings.extend(redundant_lifetime(declaration, implemented, config));
    findings.extend(redundant_selective(declaration, implemented));
    findings.extend(mixed_fields(declaration));
    findings
}

/// CFL001-CFL003
fn duplicate_dependencies(declaration: &ServiceDeclaration) -> Vec<ConflictFinding> {
    let metadata = &declaration.metadata;
    let id = || declaration.id.clone();
    let location = || declaration.location.clone();
    let mut findings = Vec::new();

    // contract -> first list entry it was seen in
    let mut seen_in: HashMap<&str, usize> = HashMap::new();
    for (entry_index, entry) in metadata.dependency_lists.iter().enumerate() {
        let mut within: Vec<&str> = Vec::new();
        for contract in &entry.contracts {
            if within.contains(&contract.as_str()) {
                findings.push(ConflictFinding::DuplicateInEntry {
                    declaration: id(),
                    location: location(),
                    contract: contract.clone(),
                    entry: entry_index,
                });
                continue;
            }
            within.push(contract);

            match seen_in.get(contract.as_str()) {
                Some(&first) => findings.push(ConflictFinding::DuplicateAcrossEntries {
                    declaration: id(),
                    location: location(),
                    contract: contract.clone(),
                    first,
                    second: entry_index,
                }),
                None => {
                    seen_in.insert(contract, entry_index);
                }
            }
        }
    }

    for field in &metadata.fields {
        if seen_in.contains_key(field.contract.as_str()) {
            findings.push(ConflictFinding::FieldAndListEntry {
                declaration: id(),
                location: location(),
                contract: field.contract.clone(),
                field: field.name.clone(),
            });
        }
    }

    findings
}

/// CFL004
///
/// A Scoped tag is redundant when the declaration would be a candidate without
/// it and the configured default is Scoped; a Singleton tag on a background
/// worker restates what the worker shape implies. A conditional predicate
/// needs the explicit tag, so neither applies there.
fn redundant_lifetime(
    declaration: &ServiceDeclaration,
    implemented: &[String],
    config: &AnalysisConfig,
) -> Option<ConflictFinding> {
    let declared = declaration.lifetime();
    if !declared.is_specified() || !declaration.predicates().is_empty() {
        return None;
    }

    let implied = if declaration.flags.background_worker {
        Lifetime::Singleton
    } else {
        config.default_lifetime
    };
    let redundant = declared == implied
        && (declaration.flags.background_worker
            || IntentSignals::of(declaration, implemented).implied_without_lifetime());

    redundant.then(|| ConflictFinding::RedundantLifetime {
        declaration: declaration.id.clone(),
        location: declaration.location.clone(),
        lifetime: declared,
    })
}

/// CFL005, CFL006
fn redundant_selective(
    declaration: &ServiceDeclaration,
    implemented: &[String],
) -> Option<ConflictFinding> {
    let metadata = &declaration.metadata;
    let selective = metadata.register_as.as_ref()?;
    if selective.contracts.is_empty() {
        return None;
    }

    match &metadata.register_all {
        Some(tag) if tag.mode == RegistrationScope::All => {
            Some(ConflictFinding::RedundantSelectiveWithAll {
                declaration: declaration.id.clone(),
                location: declaration.location.clone(),
            })
        }
        Some(_) => None,
        None => {
            let covers_all = selective.include_self
                && implemented.iter().all(|c| selective.contracts.contains(c))
                && selective.contracts.iter().all(|c| implemented.contains(c));
            covers_all.then(|| ConflictFinding::RedundantSelective {
                declaration: declaration.id.clone(),
                location: declaration.location.clone(),
            })
        }
    }
}

/// CFL007
fn mixed_fields(declaration: &ServiceDeclaration) -> Option<ConflictFinding> {
    let fields = &declaration.metadata.fields;
    let has = |kind: FieldKind| fields.iter().any(|field| field.kind == kind);
    let mixed = has(FieldKind::Service) && has(FieldKind::Configuration);

    (mixed && !declaration.lifetime().is_specified()).then(|| {
        ConflictFinding::MixedFieldsWithoutLifetime {
            declaration: declaration.id.clone(),
            location: declaration.location.clone(),
        }
    })
}
