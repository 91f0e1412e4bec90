//! Declaration snapshot loading
//!
//! Reads a [`DeclarationSnapshot`] from disk. Files ending in `.yaml`/`.yml`
//! are parsed as YAML; anything else as JSON.

use crate::constants::YAML_EXTENSIONS;
use crate::error_ext::ErrorContext;
use std::path::Path;
use tracing::debug;
use wiring_domain::DeclarationSnapshot;
use wiring_domain::error::{Error, Result};

/// Snapshot text formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Self {
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                YAML_EXTENSIONS
                    .iter()
                    .any(|yaml| ext.eq_ignore_ascii_case(yaml))
            });
        if is_yaml { Self::Yaml } else { Self::Json }
    }
}

/// Parse snapshot text in the given format
pub fn parse_snapshot(text: &str, format: SnapshotFormat) -> Result<DeclarationSnapshot> {
    match format {
        SnapshotFormat::Json => DeclarationSnapshot::from_json_str(text),
        SnapshotFormat::Yaml => DeclarationSnapshot::from_yaml_str(text),
    }
}

/// Read and parse a snapshot file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<DeclarationSnapshot> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .io_context(format!("Failed to read snapshot {}", path.display()))?;

    let snapshot = parse_snapshot(&text, SnapshotFormat::from_path(path)).map_err(|err| {
        Error::invalid_input(format!("Malformed snapshot {}: {err}", path.display()))
    })?;

    debug!(
        path = %path.display(),
        declarations = snapshot.declarations.len(),
        "Snapshot loaded"
    );
    Ok(snapshot)
}
