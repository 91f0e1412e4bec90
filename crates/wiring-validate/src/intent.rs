//! Intent Evaluation
//!
//! Decides whether a declaration is a registrable service candidate. A pure
//! configuration-binding holder must not auto-register; a class with real
//! behavioral dependencies should.

use crate::model::DeclarationSet;
use serde::Serialize;
use wiring_domain::{FieldKind, ServiceDeclaration};

/// Precomputed shape signals feeding the intent rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntentSignals {
    /// Any hand-written injected field (service or configuration)
    pub has_direct_dependency_fields: bool,
    /// Injected fields exist and every one of them is a configuration binding
    pub has_configuration_only_fields: bool,
    pub has_declarative_dependency_list: bool,
    pub has_conditional_predicate: bool,
    pub has_register_all_directive: bool,
    pub has_register_selective_directive: bool,
    pub has_explicit_lifetime: bool,
    pub looks_like_background_worker: bool,
    pub is_partial_with_contracts: bool,
}

impl IntentSignals {
    /// `implemented` is the full contract set, inherited contracts included
    pub fn of(declaration: &ServiceDeclaration, implemented: &[String]) -> Self {
        let metadata = &declaration.metadata;
        let has_fields = !metadata.fields.is_empty();
        Self {
            has_direct_dependency_fields: has_fields,
            has_configuration_only_fields: has_fields
                && metadata
                    .fields
                    .iter()
                    .all(|field| field.kind == FieldKind::Configuration),
            has_declarative_dependency_list: !metadata.dependency_lists.is_empty(),
            has_conditional_predicate: !metadata.conditions.is_empty(),
            has_register_all_directive: metadata.register_all.is_some(),
            has_register_selective_directive: metadata.register_as.is_some(),
            has_explicit_lifetime: metadata.lifetime.is_specified(),
            looks_like_background_worker: declaration.flags.background_worker,
            is_partial_with_contracts: declaration.flags.partial && !implemented.is_empty(),
        }
    }

    /// Primary intent rule
    pub fn primary(&self) -> bool {
        self.has_explicit_lifetime
            || self.has_conditional_predicate
            || self.has_register_all_directive
            || self.has_register_selective_directive
            || self.looks_like_background_worker
            || self.has_declarative_dependency_list
            || (self.has_direct_dependency_fields && !self.has_configuration_only_fields)
    }

    /// Primary rule, or a partial declaration exposing at least one contract
    pub fn has_intent(&self) -> bool {
        self.primary() || self.is_partial_with_contracts
    }

    /// Intent the declaration would have without its lifetime tag
    pub fn implied_without_lifetime(&self) -> bool {
        Self {
            has_explicit_lifetime: false,
            ..*self
        }
        .has_intent()
    }
}

/// Evaluate intent for the declaration at `index`
pub fn evaluate_intent(set: &DeclarationSet, index: usize) -> bool {
    set.get(index).is_some_and(|declaration| {
        IntentSignals::of(declaration, &set.implemented_contracts(index)).has_intent()
    })
}
