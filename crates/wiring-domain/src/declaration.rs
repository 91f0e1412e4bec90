//! Host-supplied class declarations
//!
//! These types mirror what the host compilation pipeline hands to the
//! analyzer: one entry per annotated class with its identity, declared base,
//! implemented contracts and the decoded metadata bundle. Nothing here is
//! validated yet; malformed combinations are the analyzer's job to report.

use crate::error::Result;
use crate::value_objects::{InstanceSharing, Lifetime, NamingConvention, NamingDirective, PredicateTag};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source location of a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Shape flags precomputed by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclarationFlags {
    /// Declared partial (the generator may add members)
    pub partial: bool,
    /// Cannot be instantiated
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    /// Derives from the host's background-worker base
    pub background_worker: bool,
    /// Registered by hand outside the generated plan
    pub externally_managed: bool,
}

/// Which registrations a register-all marker asks for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationScope {
    #[default]
    All,
    DirectOnly,
    Exclusionary,
}

/// Register-all marker
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterAllTag {
    pub mode: RegistrationScope,
    pub sharing: InstanceSharing,
}

/// Register-selective marker naming the contracts to expose
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectiveTag {
    pub contracts: Vec<String>,
    /// Also register the concrete type
    pub include_self: bool,
    pub sharing: InstanceSharing,
}

/// One declarative dependency-list entry
///
/// Naming fields left unset fall back to the analysis defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyListEntry {
    pub contracts: Vec<String>,
    pub prefix: Option<String>,
    pub convention: Option<NamingConvention>,
    pub strip_marker: Option<bool>,
    /// Dependencies are provided outside the analyzed scope
    pub external: bool,
}

impl DependencyListEntry {
    /// Naming directive for this entry, filling gaps from `defaults`
    pub fn naming(&self, defaults: &NamingDirective) -> NamingDirective {
        NamingDirective {
            prefix: self
                .prefix
                .clone()
                .unwrap_or_else(|| defaults.prefix.clone()),
            convention: self.convention.unwrap_or(defaults.convention),
            strip_marker: self.strip_marker.unwrap_or(defaults.strip_marker),
        }
    }
}

/// Kind of a hand-written injected field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Behavioral dependency resolved from the container
    #[default]
    Service,
    /// Configuration-binding value
    Configuration,
}

/// Hand-written injected field
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDescriptor {
    pub name: String,
    pub contract: String,
    pub kind: FieldKind,
    pub external: bool,
}

/// Decoded metadata bundle attached to a class
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataBundle {
    pub lifetime: Lifetime,
    pub register_all: Option<RegisterAllTag>,
    pub register_as: Option<SelectiveTag>,
    /// Every conditional-registration marker present (more than one is an error)
    pub conditions: Vec<PredicateTag>,
    pub dependency_lists: Vec<DependencyListEntry>,
    pub fields: Vec<FieldDescriptor>,
    /// Contracts excluded from registration
    pub skip: Vec<String>,
}

/// One annotated class declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassDeclaration {
    /// Fully qualified type identity
    pub id: String,
    #[serde(default)]
    pub location: Location,
    /// Declared base class, if any
    #[serde(default)]
    pub base: Option<String>,
    /// Contracts implemented directly by this class
    #[serde(default)]
    pub contracts: Vec<String>,
    #[serde(default)]
    pub metadata: MetadataBundle,
    #[serde(default)]
    pub flags: DeclarationFlags,
}

impl ClassDeclaration {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Immutable input snapshot for one analysis pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSnapshot {
    pub declarations: Vec<ClassDeclaration>,
}

impl DeclarationSnapshot {
    /// Parse a snapshot from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a snapshot from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
