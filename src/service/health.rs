//! Service liveness check for health reporting.

use std::sync::Arc;

use crate::component::HealthCheck;
use crate::error::Result;
use crate::service::ManagedService;

/// Reports whether the managed service is running.
pub struct ServiceHealthCheck {
    title: String,
    service: Arc<dyn ManagedService>,
}

impl ServiceHealthCheck {
    pub fn new(service: Arc<dyn ManagedService>) -> Self {
        Self {
            title: format!("{} service", service.name()),
            service,
        }
    }
}

impl HealthCheck for ServiceHealthCheck {
    fn title(&self) -> &str {
        &self.title
    }

    /// A failed query is an error, never a `false`.
    fn check(&self) -> Result<bool> {
        self.service.running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Fixed(Option<bool>);

    impl ManagedService for Fixed {
        fn name(&self) -> &str {
            "php7.1-fpm"
        }
        fn running(&self) -> Result<bool> {
            self.0.ok_or_else(|| Error::ServiceQuery {
                unit: "php7.1-fpm".into(),
                source: std::io::Error::other("no dbus"),
            })
        }
        fn start(&self) -> Result<()> {
            unreachable!("health checks never start services")
        }
        fn restart(&self) -> Result<()> {
            unreachable!("health checks never restart services")
        }
    }

    #[test]
    fn test_check_reports_running_state() {
        let up = ServiceHealthCheck::new(Arc::new(Fixed(Some(true))));
        assert_eq!(up.title(), "php7.1-fpm service");
        assert!(up.check().unwrap());

        let down = ServiceHealthCheck::new(Arc::new(Fixed(Some(false))));
        assert!(!down.check().unwrap());
    }

    #[test]
    fn test_query_failure_is_fatal() {
        let unknown = ServiceHealthCheck::new(Arc::new(Fixed(None)));
        assert!(matches!(unknown.check(), Err(Error::ServiceQuery { .. })));
    }
}
