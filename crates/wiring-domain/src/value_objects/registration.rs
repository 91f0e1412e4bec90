//! Registration value objects
//!
//! Registration modes and instance sharing describe *which* registrations a
//! declaration produces; [`RegistrationDirective`] and [`RegistrationPlan`]
//! are the resolved output handed to the host.

use super::{ConditionalPredicate, Lifetime};
use serde::{Deserialize, Serialize};

/// Policy governing which implemented contracts become registrations
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    /// Concrete type plus every implemented contract
    #[default]
    All,
    /// Concrete type only
    DirectOnly,
    /// Every implemented contract, no concrete-type registration
    Exclusionary,
    /// Exactly the named contracts
    Selective {
        /// Contracts to register, in declaration order
        contracts: Vec<String>,
        /// Also register the concrete type
        include_self: bool,
    },
}

impl RegistrationMode {
    /// True when the concrete type itself is registered under this mode
    pub fn registers_concrete(&self) -> bool {
        match self {
            Self::All | Self::DirectOnly => true,
            Self::Exclusionary => false,
            Self::Selective { include_self, .. } => *include_self,
        }
    }
}

impl std::fmt::Display for RegistrationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::DirectOnly => write!(f, "DirectOnly"),
            Self::Exclusionary => write!(f, "Exclusionary"),
            Self::Selective { contracts, .. } => write!(f, "Selective[{}]", contracts.join(", ")),
        }
    }
}

/// Whether registrations from one declaration share a physical instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceSharing {
    /// Every registration is independently instantiable
    #[default]
    Separate,
    /// All registrations resolve to one instance per scope via a factory
    Shared,
}

/// One resolved registration
///
/// `service` is the contract or concrete type the container exposes,
/// `implementation` the concrete type that satisfies it. When `factory` is
/// set, the registration forwards to the instance registered under that
/// service instead of constructing its own. The anchor is always another
/// directive of the same declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationDirective {
    /// Declaration the directive was derived from
    pub declaration: String,
    /// Resolvable service type (contract or concrete type)
    pub service: String,
    /// Concrete implementation type
    pub implementation: String,
    /// Resolved lifetime
    pub lifetime: Lifetime,
    /// Sharing mode of the owning declaration
    pub sharing: InstanceSharing,
    /// Service whose registration owns the shared instance, if any
    pub factory: Option<String>,
    /// Gate controlling whether the registration is included
    pub condition: Option<ConditionalPredicate>,
    /// Registered as a hosted background worker
    pub hosted: bool,
}

impl RegistrationDirective {
    /// True when the directive registers the concrete type as itself
    pub fn is_concrete(&self) -> bool {
        self.service == self.implementation
    }
}

/// Ordered, deduplicated list of registration directives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationPlan {
    directives: Vec<RegistrationDirective>,
}

impl RegistrationPlan {
    /// Build a plan, dropping directives whose `(service, implementation)`
    /// pair was already seen
    pub fn from_directives<I>(directives: I) -> Self
    where
        I: IntoIterator<Item = RegistrationDirective>,
    {
        let mut seen = std::collections::HashSet::new();
        let directives = directives
            .into_iter()
            .filter(|d| seen.insert((d.service.clone(), d.implementation.clone())))
            .collect();
        Self { directives }
    }

    /// All directives in plan order
    pub fn directives(&self) -> &[RegistrationDirective] {
        &self.directives
    }

    /// Directives derived from one declaration
    pub fn for_declaration<'a>(
        &'a self,
        declaration: &'a str,
    ) -> impl Iterator<Item = &'a RegistrationDirective> + 'a {
        self.directives
            .iter()
            .filter(move |d| d.declaration == declaration)
    }

    /// Look up the directive registering `service` with `implementation`
    pub fn find(&self, service: &str, implementation: &str) -> Option<&RegistrationDirective> {
        self.directives
            .iter()
            .find(|d| d.service == service && d.implementation == implementation)
    }

    /// Number of directives
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// True when the plan is empty
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}
