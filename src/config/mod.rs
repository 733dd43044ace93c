//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! manager config (TOML)          site set (TOML/JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ManagerConfig / SiteSet (validated, immutable)
//!
//! On site-set change:
//!     watcher.rs detects change
//!     → loader.rs loads the new site set
//!     → validation.rs validates
//!     → new SiteSet sent to the orchestrator for a configuration pass
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod sites;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_sites, ConfigError};
pub use schema::{FpmConfig, ManagerConfig, ObservabilityConfig, ServiceConfig};
pub use sites::{BackendDescriptor, LocationDescriptor, ParamValue, Params, SiteSet, WebsiteDescriptor};
