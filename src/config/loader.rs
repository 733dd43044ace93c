//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ManagerConfig;
use crate::config::sites::SiteSet;
use crate::config::validation::{validate_config, validate_sites, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ManagerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ManagerConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate a site set. `.json` files are read as JSON, anything
/// else as TOML.
pub fn load_sites(path: &Path, backend_kind: &str) -> Result<SiteSet, ConfigError> {
    let content = fs::read_to_string(path)?;
    let sites: SiteSet = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => toml::from_str(&content)?,
    };

    validate_sites(&sites, backend_kind).map_err(ConfigError::Validation)?;

    Ok(sites)
}
