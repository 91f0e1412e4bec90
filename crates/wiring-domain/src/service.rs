//! Analyzer model of a declaration
//!
//! A [`ServiceDeclaration`] is derived from exactly one [`ClassDeclaration`]
//! and lives in a flat arena; the base class is referenced by arena index so
//! inheritance walks never chase live references.

use crate::declaration::{DeclarationFlags, Location, MetadataBundle};
use crate::value_objects::{
    InstanceSharing, Lifetime, NamingDirective, PredicateTag, RegistrationMode,
};
use serde::{Deserialize, Serialize};

/// Reference to a declaration's base class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseRef {
    /// Base is part of the snapshot, at this arena index
    Local(usize),
    /// Base lives outside the analyzed scope
    External(String),
}

/// How a dependency was declared
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencySource {
    /// Hand-written injected field
    Field { name: String },
    /// Entry of a declarative dependency list, by position
    DeclarativeList { entry: usize },
}

/// One edge from a declaration to a contract it needs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyReference {
    pub contract: String,
    pub source: DependencySource,
    /// Naming directive of a declarative entry; `None` for fields
    pub naming: Option<NamingDirective>,
    /// Provided outside the analyzed scope
    pub external: bool,
    /// Base declaration this edge was inherited from
    pub origin: Option<String>,
}

impl DependencyReference {
    /// Copy of this edge as seen from a derived declaration
    pub fn inherited_from(&self, base: &str) -> Self {
        Self {
            origin: Some(self.origin.clone().unwrap_or_else(|| base.to_string())),
            ..self.clone()
        }
    }

    pub fn is_inherited(&self) -> bool {
        self.origin.is_some()
    }
}

/// Analyzer model of one annotated class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDeclaration {
    /// Position in the declaration arena
    pub index: usize,
    pub id: String,
    pub location: Location,
    pub base: Option<BaseRef>,
    /// Contracts implemented directly (inherited ones are resolved by walking `base`)
    pub contracts: Vec<String>,
    /// Effective registration mode after tag resolution
    pub mode: RegistrationMode,
    pub sharing: InstanceSharing,
    /// Own dependency edges: fields first, then declarative entries
    pub dependencies: Vec<DependencyReference>,
    pub flags: DeclarationFlags,
    /// Raw metadata, kept for structural validation
    pub metadata: MetadataBundle,
}

impl ServiceDeclaration {
    /// Declared lifetime tag (may be `Unspecified`)
    pub fn lifetime(&self) -> Lifetime {
        self.metadata.lifetime
    }

    pub fn predicates(&self) -> &[PredicateTag] {
        &self.metadata.conditions
    }

    pub fn skip(&self) -> &[String] {
        &self.metadata.skip
    }

    /// Arena index of the base declaration when it is in scope
    pub fn local_base(&self) -> Option<usize> {
        match self.base {
            Some(BaseRef::Local(index)) => Some(index),
            _ => None,
        }
    }
}
