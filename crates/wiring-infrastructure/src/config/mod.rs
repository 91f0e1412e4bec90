//! Configuration management
//!
//! Layered configuration for analyzer hosts:
//! defaults, then a TOML file, then `WIRING_`-prefixed environment variables.

pub mod loader;

pub use loader::ConfigLoader;

use crate::constants::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wiring_domain::{AnalysisConfig, DiagnosticsConfig};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Engine policy (default lifetime, naming, ambiguity handling)
    pub analysis: AnalysisConfig,
    /// Host severity overrides
    pub diagnostics: DiagnosticsConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stderr
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
