//! Finding Definition Macro
//!
//! Provides a declarative macro for defining finding enums with automatic
//! `Display` and [`Finding`](crate::finding::Finding) implementations.
//!
//! # Example
//!
//! ```ignore
//! define_findings! {
//!     DiagnosticCategory::LifetimeViolation,
//!     pub enum LifetimeFinding {
//!         #[finding(
//!             code = "LIF001",
//!             severity = Error,
//!             message = "Singleton {declaration} depends on Scoped contract {contract}",
//!             origin = origin
//!         )]
//!         CapturesScoped {
//!             declaration: String,
//!             location: Location,
//!             contract: String,
//!             origin: Option<String>,
//!         },
//!     }
//! }
//! ```

/// Macro to define finding enums with automatic trait implementations
///
/// This macro generates:
/// - The enum with all variants
/// - `Display` implementation rendering the message template
/// - `Finding` trait implementation
///
/// # Parameters
///
/// - `$category`: default `DiagnosticCategory` for all variants
/// - For each variant:
///   - `code`: stable diagnostic code (e.g., "LIF001")
///   - `severity`: Error, Warning, Info or Hidden
///   - `category` (optional): overrides the enum-wide category
///   - `message`: display template; fields are referenced by name (`{contract}`)
///   - `origin` (optional): name of an `Option<String>` field holding the
///     base declaration the finding was inherited from
///   - The first two fields must be the declaration identity (`String`) and
///     its `Location`
#[macro_export]
macro_rules! define_findings {
    // Category helper - per-variant override
    (@category $default:expr, $variant_category:ident) => {
        wiring_domain::DiagnosticCategory::$variant_category
    };

    // Category helper - enum-wide default
    (@category $default:expr,) => {
        $default
    };

    // Origin helper - variant carries an origin field
    (@origin $origin:ident) => {
        $origin.as_deref()
    };

    // Origin helper - no origin field
    (@origin) => {
        None
    };

    // Main rule
    (
        $category:expr,
        $vis:vis enum $name:ident {
            $(
                #[finding(
                    code = $code:literal,
                    severity = $severity:ident
                    $(, category = $variant_category:ident)?
                    , message = $msg:literal
                    $(, origin = $origin:ident)?
                )]
                $variant:ident {
                    $decl:ident : String,
                    $loc:ident : Location
                    $(, $field:ident : $field_ty:ty )* $(,)?
                }
            ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
        $vis enum $name {
            $( $variant { $decl: String, $loc: wiring_domain::Location $(, $field: $field_ty )* } ),*
        }

        impl std::fmt::Display for $name {
            #[allow(unused_variables)]
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant { $decl, $loc $(, $field )* } => write!(f, $msg)
                    ),*
                }
            }
        }

        impl $crate::finding::Finding for $name {
            fn code(&self) -> &'static str {
                match self {
                    $( Self::$variant { .. } => $code ),*
                }
            }

            fn category(&self) -> wiring_domain::DiagnosticCategory {
                match self {
                    $(
                        Self::$variant { .. } => {
                            $crate::define_findings!(@category $category, $($variant_category)?)
                        }
                    ),*
                }
            }

            fn severity(&self) -> wiring_domain::Severity {
                match self {
                    $( Self::$variant { .. } => wiring_domain::Severity::$severity ),*
                }
            }

            fn declaration(&self) -> &str {
                match self {
                    $( Self::$variant { $decl, .. } => $decl.as_str() ),*
                }
            }

            fn location(&self) -> Option<&wiring_domain::Location> {
                match self {
                    $( Self::$variant { $loc, .. } => Some($loc) ),*
                }
            }

            fn origin(&self) -> Option<&str> {
                match self {
                    $(
                        Self::$variant { $( $origin, )? .. } => {
                            $crate::define_findings!(@origin $($origin)?)
                        }
                    ),*
                }
            }
        }
    };
}
