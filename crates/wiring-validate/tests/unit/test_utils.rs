//! Shared test utilities for wiring-validate tests
//!
//! Builders for host declarations and small helpers for inspecting output.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use wiring_domain::{
    ClassDeclaration, Comparison, ComparisonOperator, DependencyListEntry, Diagnostic,
    FieldDescriptor, FieldKind, InstanceSharing, Lifetime, Location, PredicateTag, RegisterAllTag,
    RegistrationScope, SelectiveTag,
};
use wiring_validate::{AnalysisConfig, AnalysisOutput, Analyzer};

/// Fluent builder for a [`ClassDeclaration`]
pub struct DeclarationBuilder {
    declaration: ClassDeclaration,
}

impl DeclarationBuilder {
    pub fn new(id: &str) -> Self {
        let mut declaration = ClassDeclaration::new(id);
        let file = format!("{}.cs", id.rsplit('.').next().unwrap_or(id));
        declaration.location = Location::new(file, 1, 1);
        Self { declaration }
    }

    pub fn contracts(mut self, contracts: &[&str]) -> Self {
        self.declaration
            .contracts
            .extend(contracts.iter().map(|c| c.to_string()));
        self
    }

    pub fn base(mut self, base: &str) -> Self {
        self.declaration.base = Some(base.to_string());
        self
    }

    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.declaration.metadata.lifetime = lifetime;
        self
    }

    pub fn register_all(mut self, mode: RegistrationScope) -> Self {
        self.declaration.metadata.register_all = Some(RegisterAllTag {
            mode,
            sharing: InstanceSharing::Separate,
        });
        self
    }

    pub fn register_as(mut self, contracts: &[&str], include_self: bool) -> Self {
        self.declaration.metadata.register_as = Some(SelectiveTag {
            contracts: contracts.iter().map(|c| c.to_string()).collect(),
            include_self,
            sharing: InstanceSharing::Separate,
        });
        self
    }

    /// Mark whichever registration marker is present as shared
    pub fn shared(mut self) -> Self {
        let metadata = &mut self.declaration.metadata;
        if let Some(tag) = metadata.register_all.as_mut() {
            tag.sharing = InstanceSharing::Shared;
        }
        if let Some(tag) = metadata.register_as.as_mut() {
            tag.sharing = InstanceSharing::Shared;
        }
        self
    }

    /// Declarative dependency list entry with default naming
    pub fn depends_on(self, contracts: &[&str]) -> Self {
        self.entry(DependencyListEntry {
            contracts: contracts.iter().map(|c| c.to_string()).collect(),
            ..DependencyListEntry::default()
        })
    }

    pub fn entry(mut self, entry: DependencyListEntry) -> Self {
        self.declaration.metadata.dependency_lists.push(entry);
        self
    }

    pub fn field(self, name: &str, contract: &str) -> Self {
        self.field_of_kind(name, contract, FieldKind::Service)
    }

    pub fn config_field(self, name: &str, contract: &str) -> Self {
        self.field_of_kind(name, contract, FieldKind::Configuration)
    }

    fn field_of_kind(mut self, name: &str, contract: &str, kind: FieldKind) -> Self {
        self.declaration.metadata.fields.push(FieldDescriptor {
            name: name.to_string(),
            contract: contract.to_string(),
            kind,
            external: false,
        });
        self
    }

    pub fn condition(mut self, tag: PredicateTag) -> Self {
        self.declaration.metadata.conditions.push(tag);
        self
    }

    pub fn skip(mut self, contracts: &[&str]) -> Self {
        self.declaration
            .metadata
            .skip
            .extend(contracts.iter().map(|c| c.to_string()));
        self
    }

    pub fn partial(mut self) -> Self {
        self.declaration.flags.partial = true;
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.declaration.flags.is_abstract = true;
        self
    }

    pub fn worker(mut self) -> Self {
        self.declaration.flags.background_worker = true;
        self
    }

    pub fn externally_managed(mut self) -> Self {
        self.declaration.flags.externally_managed = true;
        self
    }

    pub fn build(self) -> ClassDeclaration {
        self.declaration
    }
}

/// Shorthand for [`DeclarationBuilder::new`]
pub fn declaration(id: &str) -> DeclarationBuilder {
    DeclarationBuilder::new(id)
}

pub fn environment(value: &str) -> PredicateTag {
    PredicateTag {
        environment: Some(value.to_string()),
        ..PredicateTag::default()
    }
}

pub fn not_environment(value: &str) -> PredicateTag {
    PredicateTag {
        not_environment: Some(value.to_string()),
        ..PredicateTag::default()
    }
}

pub fn config_equals(key: &str, expected: &str) -> PredicateTag {
    PredicateTag {
        config_key: Some(key.to_string()),
        comparison: Some(Comparison {
            operator: ComparisonOperator::Equals,
            expected: expected.to_string(),
        }),
        ..PredicateTag::default()
    }
}

/// Analyze with the default config on the calling thread
pub fn analyze(declarations: &[ClassDeclaration]) -> AnalysisOutput {
    analyze_with(AnalysisConfig::default(), declarations)
}

pub fn analyze_with(config: AnalysisConfig, declarations: &[ClassDeclaration]) -> AnalysisOutput {
    let config = AnalysisConfig {
        parallel: false,
        ..config
    };
    Analyzer::new(config)
        .analyze(declarations)
        .expect("snapshot should be well formed")
}

/// Diagnostic codes in output order
pub fn codes(output: &AnalysisOutput) -> Vec<&str> {
    output.diagnostics.iter().map(|d| d.code.as_str()).collect()
}

/// Diagnostics carrying `code`
pub fn with_code<'a>(output: &'a AnalysisOutput, code: &str) -> Vec<&'a Diagnostic> {
    output
        .diagnostics
        .iter()
        .filter(|d| d.code == code)
        .collect()
}

/// `(service, implementation)` pairs of the plan, in plan order
pub fn plan_pairs(output: &AnalysisOutput) -> Vec<(&str, &str)> {
    output
        .plan
        .directives()
        .iter()
        .map(|d| (d.service.as_str(), d.implementation.as_str()))
        .collect()
}
