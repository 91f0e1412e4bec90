//! Service lifetime value object

use serde::{Deserialize, Serialize};

/// Instance-reuse scope of a registered service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// One instance per process
    Singleton,
    /// One instance per logical unit of work
    Scoped,
    /// A new instance per resolution
    Transient,
    /// No lifetime tag present on the declaration
    #[default]
    Unspecified,
}

impl Lifetime {
    /// True when the declaration carries an explicit lifetime tag
    pub fn is_specified(self) -> bool {
        !matches!(self, Self::Unspecified)
    }

    /// Resolve an unspecified lifetime to `fallback`
    pub fn or(self, fallback: Lifetime) -> Lifetime {
        match self {
            Self::Unspecified => fallback,
            other => other,
        }
    }

    /// True when an instance with this lifetime outlives one with `other`
    ///
    /// Holding a reference to a shorter-lived instance from a longer-lived one
    /// keeps the captured instance alive past its intended scope.
    pub fn outlives(self, other: Lifetime) -> bool {
        self.rank() > other.rank()
    }

    fn rank(self) -> u8 {
        match self {
            Self::Singleton => 3,
            Self::Scoped => 2,
            Self::Transient => 1,
            Self::Unspecified => 0,
        }
    }
}

impl std::fmt::Display for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Singleton => write!(f, "Singleton"),
            Self::Scoped => write!(f, "Scoped"),
            Self::Transient => write!(f, "Transient"),
            Self::Unspecified => write!(f, "Unspecified"),
        }
    }
}
