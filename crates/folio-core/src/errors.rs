//! Cross-cutting error types for Folio.
//!
//! Transport, configuration, and migration failures live in their own crates
//! (`RemoteError`, `ConfigError`, `MigrateError`); the binary converges them
//! with `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or validating the source export.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The export file does not exist.
    #[error("Content file not found: {}", path.display())]
    ExportNotFound { path: PathBuf },

    /// The export file exists but could not be read.
    #[error("Failed to read content file {}: {source}", path.display())]
    ExportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export is not valid JSON or has neither accepted shape.
    #[error("Invalid project data structure: {0}")]
    InvalidExport(String),

    /// Data failed validation (empty identifiers, blank names).
    #[error("Validation error: {0}")]
    Validation(String),
}
