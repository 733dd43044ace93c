//! Capability traits a host registers components under.
//!
//! The host owns discovery and registration; this crate only provides
//! concrete implementations of these roles.

use crate::config::sites::WebsiteDescriptor;
use crate::error::Result;

/// Outcome of one configuration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Pool files written, counting overwrites of the same id.
    pub pools_written: usize,
    /// Websites skipped because they are disabled.
    pub sites_skipped: usize,
}

/// Renders on-disk configuration for a set of websites.
pub trait ConfigRenderer {
    /// Backend type tag this renderer is responsible for.
    fn backend_kind(&self) -> &str;

    /// Write configuration for every enabled website.
    fn create_configuration(&self, websites: &[WebsiteDescriptor]) -> Result<PassReport>;

    /// Request that written configuration be picked up.
    fn apply_configuration(&self);

    /// Health checks this renderer contributes.
    fn checks(&self) -> Vec<Box<dyn HealthCheck>>;
}

/// Reconciliation action taken by a [`Restartable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartAction {
    Started,
    Restarted,
}

/// Something that can coalesce restart requests.
pub trait Restartable: Send + Sync {
    /// Mark a restart as needed. Idempotent.
    fn schedule(&self);

    /// Perform the pending restart, if any.
    fn apply(&self) -> Result<Option<RestartAction>>;
}

/// A named yes/no health probe.
pub trait HealthCheck: Send + Sync {
    fn title(&self) -> &str;

    fn check(&self) -> Result<bool>;
}
