//! Contract Index
//!
//! Read-only map from contract (or concrete type) to the declarations that
//! implement it. Built once per pass after the per-declaration work
//! completes, and rebuilt from scratch on every pass.

use std::collections::BTreeMap;

/// Resolves a contract identity to known implementing declaration identities
///
/// Hosts that know about implementations outside the analyzed scope can
/// supply their own resolver; the engine falls back to [`ContractIndex`].
pub trait ImplementationResolver: Send + Sync {
    fn implementations(&self, contract: &str) -> Vec<String>;
}

/// Immutable contract → implementations map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractIndex {
    implementations: BTreeMap<String, Vec<String>>,
}

impl ContractIndex {
    /// Build from `(declaration id, implemented contracts)` pairs
    ///
    /// Every declaration also implements its own concrete type. Contract lists
    /// must already be deduplicated.
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut implementations: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (declaration, contracts) in entries {
            let keys = std::iter::once(declaration).chain(
                contracts
                    .iter()
                    .map(String::as_str)
                    .filter(|contract| *contract != declaration),
            );
            for key in keys {
                let slot = implementations.entry(key.to_string()).or_default();
                debug_assert!(
                    !slot.iter().any(|existing| existing == declaration),
                    "{declaration} indexed twice under {key}"
                );
                slot.push(declaration.to_string());
            }
        }
        Self { implementations }
    }

    /// Implementations of `contract`, in snapshot order
    pub fn get(&self, contract: &str) -> &[String] {
        self.implementations
            .get(contract)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Contracts with at least one implementation
    pub fn contracts(&self) -> impl Iterator<Item = &str> {
        self.implementations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }
}

impl ImplementationResolver for ContractIndex {
    fn implementations(&self, contract: &str) -> Vec<String> {
        self.get(contract).to_vec()
    }
}
