//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by configuration passes and service reconciliation.
#[derive(Debug, Error)]
pub enum Error {
    /// A pool file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state of the managed service could not be determined.
    #[error("cannot query service {unit}: {source}")]
    ServiceQuery {
        unit: String,
        #[source]
        source: std::io::Error,
    },

    /// A start or restart of the managed service failed.
    #[error("service {unit} {action} failed: {detail}")]
    ServiceAction {
        unit: String,
        action: &'static str,
        detail: String,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for pool and service operations.
pub type Result<T> = std::result::Result<T, Error>;
