//! Field-naming value objects for generated constructors

use crate::constants::DEFAULT_FIELD_PREFIX;
use serde::{Deserialize, Serialize};

/// Case convention applied to a generated field name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// `paymentService`
    #[default]
    CamelCase,
    /// `PaymentService`
    PascalCase,
    /// `payment_service`
    SnakeCase,
}

/// How a contract name becomes a field identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingDirective {
    /// Text prepended to the converted name
    pub prefix: String,
    /// Case convention of the converted name
    pub convention: NamingConvention,
    /// Drop the conventional leading contract marker
    pub strip_marker: bool,
}

impl Default for NamingDirective {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_FIELD_PREFIX.to_string(),
            convention: NamingConvention::CamelCase,
            strip_marker: true,
        }
    }
}

/// One contract → field identifier pair of a generated constructor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldMapping {
    pub contract: String,
    pub field: String,
    /// Base declaration the dependency was inherited from
    pub origin: Option<String>,
}

/// Generated-constructor field mapping for one declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorFieldMap {
    pub declaration: String,
    pub fields: Vec<FieldMapping>,
}

impl ConstructorFieldMap {
    /// Field identifier generated for `contract`
    pub fn field_for(&self, contract: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|m| m.contract == contract)
            .map(|m| m.field.as_str())
    }
}
