//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that backend ids are usable as file names, section names and
//!   socket names (`[A-Za-z0-9._-]`, no `..`)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: config → Result<(), Vec<ValidationError>>
//! - Duplicate pool ids are allowed (last write wins) and only logged

use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::ManagerConfig;
use crate::config::sites::SiteSet;

/// A single semantic problem found in a config or site set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("socket namespace {0:?} must not contain '/'")]
    SocketNamespace(String),

    #[error("backend id {id:?} of website {website:?} is not a valid file name")]
    BackendId { website: String, id: String },
}

/// Validate the manager configuration.
pub fn validate_config(config: &ManagerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let required = [
        ("fpm.backend_kind", &config.fpm.backend_kind),
        ("fpm.config_path", &config.fpm.config_path),
        ("fpm.socket_namespace", &config.fpm.socket_namespace),
        ("fpm.worker_user", &config.fpm.worker_user),
        ("service.name", &config.service.name),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty(field));
        }
    }

    if config.fpm.socket_namespace.contains('/') {
        errors.push(ValidationError::SocketNamespace(
            config.fpm.socket_namespace.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the backends of `backend_kind` in a site set.
///
/// Backends of other kinds belong to other components and are not checked.
pub fn validate_sites(sites: &SiteSet, backend_kind: &str) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for website in &sites.websites {
        for location in &website.locations {
            let backend = &location.backend;
            if backend.kind != backend_kind {
                continue;
            }
            if !is_valid_file_stem(&backend.id) {
                errors.push(ValidationError::BackendId {
                    website: website.name.clone(),
                    id: backend.id.clone(),
                });
                continue;
            }
            if let Some(previous) = seen.insert(&backend.id, &website.name) {
                tracing::warn!(
                    id = %backend.id,
                    first = %previous,
                    second = %website.name,
                    "Backend id used more than once, last rendered pool wins"
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Ids name a file, a pool section and a socket, so only a conservative
/// character set is accepted.
fn is_valid_file_stem(id: &str) -> bool {
    !id.is_empty()
        && !id.contains("..")
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sites::{BackendDescriptor, WebsiteDescriptor};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ManagerConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = ManagerConfig::default();
        config.fpm.config_path = String::new();
        config.service.name = " ".into();
        config.fpm.socket_namespace = "a/b".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Empty("fpm.config_path"),
                ValidationError::Empty("service.name"),
                ValidationError::SocketNamespace("a/b".into()),
            ]
        );
    }

    #[test]
    fn test_backend_ids_must_be_file_stems() {
        let sites = SiteSet {
            websites: vec![WebsiteDescriptor::new("evil", true)
                .with_location("/", BackendDescriptor::new("../etc/passwd", "php7.1-fcgi"))
                .with_location("/a", BackendDescriptor::new("", "php7.1-fcgi"))
                .with_location("/b", BackendDescriptor::new("../ignored", "python-wsgi"))
                .with_location("/c", BackendDescriptor::new("fine", "php7.1-fcgi"))
                .with_location("/d", BackendDescriptor::new("x]\nuser = root\n[y", "php7.1-fcgi"))
                .with_location("/e", BackendDescriptor::new("[pool]", "php7.1-fcgi"))
                .with_location("/f", BackendDescriptor::new("two words", "php7.1-fcgi"))
                .with_location("/g", BackendDescriptor::new("shop_v2.main-php", "php7.1-fcgi"))],
        };

        let errors = validate_sites(&sites, "php7.1-fcgi").unwrap_err();
        let rejected: Vec<&str> = errors
            .iter()
            .map(|e| match e {
                ValidationError::BackendId { id, .. } => id.as_str(),
                other => panic!("unexpected error: {other}"),
            })
            .collect();
        assert_eq!(
            rejected,
            vec!["../etc/passwd", "", "x]\nuser = root\n[y", "[pool]", "two words"]
        );
    }

    #[test]
    fn test_duplicate_ids_are_not_errors() {
        let sites = SiteSet {
            websites: vec![
                WebsiteDescriptor::new("a", true)
                    .with_location("/", BackendDescriptor::new("shared", "php7.1-fcgi")),
                WebsiteDescriptor::new("b", true)
                    .with_location("/", BackendDescriptor::new("shared", "php7.1-fcgi")),
            ],
        };
        assert!(validate_sites(&sites, "php7.1-fcgi").is_ok());
    }
}
