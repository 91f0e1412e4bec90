//! Value Objects
//!
//! Immutable values describing how a declaration is registered and what the
//! analyzer hands back to the host.

mod lifetime;
mod naming;
mod predicate;
mod registration;

pub use lifetime::Lifetime;
pub use naming::{ConstructorFieldMap, FieldMapping, NamingConvention, NamingDirective};
pub use predicate::{
    Comparison, ComparisonOperator, ConditionalPredicate, ConfigurationCondition,
    PredicateDefect, PredicateTag,
};
pub use registration::{InstanceSharing, RegistrationDirective, RegistrationMode, RegistrationPlan};
