//! Model Builder
//!
//! Converts host [`ClassDeclaration`]s into the analyzer's
//! [`ServiceDeclaration`] arena. Each declaration records its base as an arena
//! index; inheritance walks follow that index chain.

use std::collections::HashMap;
use tracing::debug;
use wiring_domain::{
    AnalysisConfig, BaseRef, ClassDeclaration, DependencyReference, DependencySource, Error,
    FieldKind, InstanceSharing, MetadataBundle, RegistrationMode, RegistrationScope, Result,
    ServiceDeclaration,
};

/// Flat arena of service declarations for one snapshot
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    declarations: Vec<ServiceDeclaration>,
    by_id: HashMap<String, usize>,
}

impl DeclarationSet {
    /// Build the arena from a host snapshot
    ///
    /// Fails when two declarations share an identity or the inheritance chain
    /// is cyclic; both break the host contract.
    pub fn build(inputs: &[ClassDeclaration], config: &AnalysisConfig) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            if by_id.insert(input.id.clone(), index).is_some() {
                return Err(Error::invalid_input(format!(
                    "declaration {} appears more than once in the snapshot",
                    input.id
                )));
            }
        }

        let declarations = inputs
            .iter()
            .enumerate()
            .map(|(index, input)| build_declaration(index, input, &by_id, config))
            .collect();

        let set = Self {
            declarations,
            by_id,
        };
        set.check_acyclic()?;

        debug!(declarations = set.len(), "Declaration arena built");
        Ok(set)
    }

    pub fn get(&self, index: usize) -> Option<&ServiceDeclaration> {
        self.declarations.get(index)
    }

    pub fn by_id(&self, id: &str) -> Option<&ServiceDeclaration> {
        self.by_id.get(id).and_then(|&index| self.get(index))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDeclaration> {
        self.declarations.iter()
    }

    pub fn as_slice(&self) -> &[ServiceDeclaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Base declarations of `index`, nearest first
    pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
        Ancestors {
            set: self,
            next: self.get(index).and_then(ServiceDeclaration::local_base),
        }
    }

    /// Contracts implemented directly or through any in-scope base
    ///
    /// Own contracts come first, then each base's in chain order; duplicates
    /// keep their first position.
    pub fn implemented_contracts(&self, index: usize) -> Vec<String> {
        let Some(declaration) = self.get(index) else {
            return Vec::new();
        };
        let mut contracts: Vec<String> = Vec::new();
        let chain = std::iter::once(declaration).chain(self.ancestors(index));
        for contract in chain.flat_map(|d| d.contracts.iter()) {
            if !contracts.contains(contract) {
                contracts.push(contract.clone());
            }
        }
        contracts
    }

    fn check_acyclic(&self) -> Result<()> {
        for declaration in &self.declarations {
            let mut steps = 0;
            let mut cursor = declaration.local_base();
            while let Some(index) = cursor {
                steps += 1;
                if steps > self.declarations.len() {
                    return Err(Error::invalid_input(format!(
                        "inheritance chain of {} is cyclic",
                        declaration.id
                    )));
                }
                cursor = self.declarations[index].local_base();
            }
        }
        Ok(())
    }
}

/// Iterator over a declaration's in-scope base chain
pub struct Ancestors<'a> {
    set: &'a DeclarationSet,
    next: Option<usize>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ServiceDeclaration;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.set.get(self.next?)?;
        self.next = current.local_base();
        Some(current)
    }
}

fn build_declaration(
    index: usize,
    input: &ClassDeclaration,
    by_id: &HashMap<String, usize>,
    config: &AnalysisConfig,
) -> ServiceDeclaration {
    let base = input.base.as_ref().map(|base| match by_id.get(base) {
        Some(&base_index) => BaseRef::Local(base_index),
        None => BaseRef::External(base.clone()),
    });
    let (mode, sharing) = resolve_mode(&input.metadata);

    ServiceDeclaration {
        index,
        id: input.id.clone(),
        location: input.location.clone(),
        base,
        contracts: input.contracts.clone(),
        mode,
        sharing,
        dependencies: own_dependencies(&input.metadata, config),
        flags: input.flags.clone(),
        metadata: input.metadata.clone(),
    }
}

/// Effective registration mode and sharing
///
/// A register-all marker takes precedence over a selective list; an empty
/// selective list is ignored (both conflicts are reported by the validators).
fn resolve_mode(metadata: &MetadataBundle) -> (RegistrationMode, InstanceSharing) {
    if let Some(tag) = &metadata.register_all {
        let mode = match tag.mode {
            RegistrationScope::All => RegistrationMode::All,
            RegistrationScope::DirectOnly => RegistrationMode::DirectOnly,
            RegistrationScope::Exclusionary => RegistrationMode::Exclusionary,
        };
        return (mode, tag.sharing);
    }

    match &metadata.register_as {
        Some(tag) if !tag.contracts.is_empty() => (
            RegistrationMode::Selective {
                contracts: tag.contracts.clone(),
                include_self: tag.include_self,
            },
            tag.sharing,
        ),
        Some(tag) => (RegistrationMode::All, tag.sharing),
        None => (RegistrationMode::All, InstanceSharing::default()),
    }
}

/// Own dependency edges: service fields, then declarative entries in order
fn own_dependencies(metadata: &MetadataBundle, config: &AnalysisConfig) -> Vec<DependencyReference> {
    let fields = metadata
        .fields
        .iter()
        .filter(|field| field.kind == FieldKind::Service)
        .map(|field| DependencyReference {
            contract: field.contract.clone(),
            source: DependencySource::Field {
                name: field.name.clone(),
            },
            naming: None,
            external: field.external,
            origin: None,
        });

    let entries = metadata
        .dependency_lists
        .iter()
        .enumerate()
        .flat_map(|(entry_index, entry)| {
            let naming = entry.naming(&config.naming);
            entry.contracts.iter().map(move |contract| DependencyReference {
                contract: contract.clone(),
                source: DependencySource::DeclarativeList { entry: entry_index },
                naming: Some(naming.clone()),
                external: entry.external,
                origin: None,
            })
        });

    fields.chain(entries).collect()
}
