//! Domain constants

// ============================================================================
// NAMING CONSTANTS
// ============================================================================

/// Prefix prepended to generated constructor fields unless an entry overrides it
pub const DEFAULT_FIELD_PREFIX: &str = "_";

/// Conventional leading marker on contract names (`IPaymentService`)
pub const DEFAULT_CONTRACT_MARKER: char = 'I';

// ============================================================================
// CONDITIONAL REGISTRATION CONSTANTS
// ============================================================================

/// Separator between environment names in a single environment condition
pub const ENVIRONMENT_SEPARATOR: char = ',';

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Contracts assumed to be supplied by the host framework
pub const DEFAULT_EXTERNAL_CONTRACTS: &[&str] = &[
    "ILogger",
    "IConfiguration",
    "IOptions",
    "IOptionsSnapshot",
    "IOptionsMonitor",
    "IServiceProvider",
    "IServiceScopeFactory",
    "IHostEnvironment",
];
