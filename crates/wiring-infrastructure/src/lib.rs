//! # Wiring Infrastructure
//!
//! Cross-cutting concerns for analyzer hosts:
//!
//! - `config` - layered configuration (defaults, `wiring.toml`, `WIRING_` environment)
//! - `logging` - tracing subscriber setup
//! - `error_ext` - context helpers that wrap foreign errors into the domain error
//! - `snapshot` - JSON/YAML declaration snapshot loading
//!
//! The analysis engine itself never depends on this crate.

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod snapshot;

pub use config::{AppConfig, ConfigLoader, LoggingConfig};
pub use error_ext::ErrorContext;
pub use logging::{init_logging, parse_log_level};
pub use snapshot::{SnapshotFormat, load_snapshot, parse_snapshot};
