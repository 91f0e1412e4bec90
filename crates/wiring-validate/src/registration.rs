//! Registration Selector
//!
//! Turns one declaration's resolved mode, sharing and implemented-contract set
//! into [`RegistrationDirective`]s:
//!
//! | Mode          | Concrete type      | Contracts                   |
//! |---------------|--------------------|-----------------------------|
//! | All           | yes                | every implemented contract  |
//! | DirectOnly    | yes                | none                        |
//! | Exclusionary  | no                 | every implemented contract  |
//! | Selective     | when include_self  | exactly the named contracts |
//!
//! Skip entries are removed afterwards. Invalid skip and selective entries
//! are reported and ignored so a plan is always produced.

use wiring_domain::{
    ConditionalPredicate, DiagnosticCategory, InstanceSharing, Lifetime, RegistrationDirective,
    RegistrationMode, RegistrationScope, ServiceDeclaration,
};

define_findings! {
    DiagnosticCategory::StructuralConflict,
    pub enum RegistrationFinding {
        #[finding(
            code = "REG001",
            severity = Error,
            message = "Selective registration list on {declaration} is empty; the default mode is used instead"
        )]
        EmptySelectiveList {
            declaration: String,
            location: Location,
        },
        #[finding(
            code = "REG002",
            severity = Warning,
            message = "{declaration} skips {contract}, which it does not implement"
        )]
        SkipNotImplemented {
            declaration: String,
            location: Location,
            contract: String,
        },
        #[finding(
            code = "REG003",
            severity = Info,
            message = "{declaration} skips {contract}, which mode {mode} does not register anyway"
        )]
        RedundantSkip {
            declaration: String,
            location: Location,
            contract: String,
            mode: String,
        },
        #[finding(
            code = "REG004",
            severity = Warning,
            category = UnresolvedReference,
            message = "Selective registration on {declaration} names {contract}, which it does not implement"
        )]
        SelectiveNotImplemented {
            declaration: String,
            location: Location,
            contract: String,
        },
        #[finding(
            code = "REG005",
            severity = Warning,
            message = "{declaration} combines register-all mode {mode} with a selective list; the selective list is ignored"
        )]
        ConflictingModes {
            declaration: String,
            location: Location,
            mode: String,
        },
    }
}

/// Directives and findings produced for one declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub directives: Vec<RegistrationDirective>,
    pub findings: Vec<RegistrationFinding>,
}

/// Compute the registrations of one declaration
///
/// `implemented` is the full contract set including inherited contracts;
/// `lifetime` is already resolved. The caller decides whether the directives
/// reach the plan.
pub fn select_registrations(
    declaration: &ServiceDeclaration,
    implemented: &[String],
    lifetime: Lifetime,
    condition: Option<&ConditionalPredicate>,
) -> Selection {
    let mut findings = tag_findings(declaration);
    let mut services = mode_targets(declaration, implemented, &mut findings);
    apply_skips(declaration, implemented, &mut services, &mut findings);

    // Shared instances hang off the first registered service: the concrete
    // type when the mode keeps it, otherwise the first contract.
    let anchor = services
        .first()
        .filter(|_| declaration.sharing == InstanceSharing::Shared && services.len() > 1)
        .cloned();

    let directives = services
        .into_iter()
        .map(|service| {
            let factory = anchor.clone().filter(|anchor| *anchor != service);
            RegistrationDirective {
                declaration: declaration.id.clone(),
                implementation: declaration.id.clone(),
                service,
                lifetime,
                sharing: declaration.sharing,
                factory,
                condition: condition.cloned(),
                hosted: declaration.flags.background_worker,
            }
        })
        .collect();

    Selection {
        directives,
        findings,
    }
}

/// Findings about the registration markers themselves
fn tag_findings(declaration: &ServiceDeclaration) -> Vec<RegistrationFinding> {
    let metadata = &declaration.metadata;
    let Some(selective) = &metadata.register_as else {
        return Vec::new();
    };

    if selective.contracts.is_empty() {
        return vec![RegistrationFinding::EmptySelectiveList {
            declaration: declaration.id.clone(),
            location: declaration.location.clone(),
        }];
    }

    match &metadata.register_all {
        // All + Selective is a redundancy, reported by the conflict validator
        Some(tag) if tag.mode != RegistrationScope::All => {
            vec![RegistrationFinding::ConflictingModes {
                declaration: declaration.id.clone(),
                location: declaration.location.clone(),
                mode: declaration.mode.to_string(),
            }]
        }
        _ => Vec::new(),
    }
}

/// Services the active mode registers, before skips
fn mode_targets(
    declaration: &ServiceDeclaration,
    implemented: &[String],
    findings: &mut Vec<RegistrationFinding>,
) -> Vec<String> {
    let concrete = declaration.id.clone();
    match &declaration.mode {
        RegistrationMode::DirectOnly => vec![concrete],
        RegistrationMode::All => std::iter::once(concrete)
            .chain(implemented.iter().cloned())
            .collect(),
        RegistrationMode::Exclusionary => implemented.to_vec(),
        RegistrationMode::Selective {
            contracts,
            include_self,
        } => {
            let mut services: Vec<String> = Vec::new();
            if *include_self {
                services.push(concrete);
            }
            for contract in contracts {
                if !implemented.contains(contract) {
                    findings.push(RegistrationFinding::SelectiveNotImplemented {
                        declaration: declaration.id.clone(),
                        location: declaration.location.clone(),
                        contract: contract.clone(),
                    });
                } else if !services.contains(contract) {
                    services.push(contract.clone());
                }
            }
            services
        }
    }
}

fn apply_skips(
    declaration: &ServiceDeclaration,
    implemented: &[String],
    services: &mut Vec<String>,
    findings: &mut Vec<RegistrationFinding>,
) {
    for contract in declaration.skip() {
        let known = *contract == declaration.id || implemented.contains(contract);
        if !known {
            findings.push(RegistrationFinding::SkipNotImplemented {
                declaration: declaration.id.clone(),
                location: declaration.location.clone(),
                contract: contract.clone(),
            });
            continue;
        }

        match services.iter().position(|service| service == contract) {
            Some(position) => {
                services.remove(position);
            }
            None => findings.push(RegistrationFinding::RedundantSkip {
                declaration: declaration.id.clone(),
                location: declaration.location.clone(),
                contract: contract.clone(),
                mode: declaration.mode.to_string(),
            }),
        }
    }
}
