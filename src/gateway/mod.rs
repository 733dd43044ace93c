//! FastCGI pool gateway component.
//!
//! # Data Flow
//! ```text
//! SiteSet.websites (in order)
//!     → skip disabled websites
//!     → site.rs: locations whose backend kind matches
//!         → pool::render_pool(backend, backend.id)
//!         → <config_path>/<backend.id>.conf (whole-file replace)
//!     → apply_configuration(): schedule one coalesced restart
//! ```
//!
//! # Design Decisions
//! - Files are replaced wholesale; nothing is merged or patched
//! - Pool files of disabled or removed websites are left in place
//! - A write failure aborts the pass; earlier files are not rolled back

pub mod site;

pub use site::{configure_website, write_pool};

use std::path::PathBuf;
use std::sync::Arc;

use crate::component::{ConfigRenderer, HealthCheck, PassReport, Restartable};
use crate::config::schema::FpmConfig;
use crate::config::sites::WebsiteDescriptor;
use crate::error::Result;
use crate::service::{ManagedService, RestartCoalescer, ServiceHealthCheck};

/// Renders pools for one process manager and owns its restart handle.
pub struct FpmGateway {
    fpm: FpmConfig,
    service: Arc<dyn ManagedService>,
    restarts: Arc<RestartCoalescer>,
}

impl FpmGateway {
    pub fn new(
        fpm: FpmConfig,
        service: Arc<dyn ManagedService>,
        restarts: Arc<RestartCoalescer>,
    ) -> Self {
        Self {
            fpm,
            service,
            restarts,
        }
    }

    /// Directory pool files are written to.
    pub fn config_path(&self) -> PathBuf {
        PathBuf::from(&self.fpm.config_path)
    }

    /// Shared restart handle.
    pub fn restarts(&self) -> &Arc<RestartCoalescer> {
        &self.restarts
    }

    /// Run a configuration pass over `websites` into `config_path`.
    pub fn create_configuration_in(
        &self,
        websites: &[WebsiteDescriptor],
        config_path: &std::path::Path,
    ) -> Result<PassReport> {
        let mut report = PassReport::default();

        for website in websites {
            if !website.enabled {
                tracing::debug!(website = %website.name, "Skipping disabled website");
                report.sites_skipped += 1;
                continue;
            }
            report.pools_written += configure_website(website, config_path, &self.fpm)?;
        }

        tracing::info!(
            path = %config_path.display(),
            pools = report.pools_written,
            skipped = report.sites_skipped,
            "Configuration pass complete"
        );
        Ok(report)
    }
}

impl ConfigRenderer for FpmGateway {
    fn backend_kind(&self) -> &str {
        &self.fpm.backend_kind
    }

    fn create_configuration(&self, websites: &[WebsiteDescriptor]) -> Result<PassReport> {
        self.create_configuration_in(websites, &self.config_path())
    }

    fn apply_configuration(&self) {
        self.restarts.schedule();
    }

    fn checks(&self) -> Vec<Box<dyn HealthCheck>> {
        vec![Box::new(ServiceHealthCheck::new(self.service.clone()))]
    }
}
