//! Coalesced restart scheduling.
//!
//! # States
//! - Idle: nothing to apply
//! - Pending: at least one `schedule()` since the last `apply()`
//!
//! # State Transitions
//! ```text
//! Idle    --schedule--> Pending
//! Pending --schedule--> Pending
//! Pending --apply-->    Idle   (start if stopped, restart if running)
//! Idle    --apply-->    Idle   (no action)
//! ```
//!
//! The flag is cleared before the service is touched, so a failed action
//! leaves the coalescer idle; the caller re-schedules to retry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::component::{RestartAction, Restartable};
use crate::error::Result;
use crate::service::ManagedService;

/// Collapses any number of restart requests into at most one action.
pub struct RestartCoalescer {
    service: Arc<dyn ManagedService>,
    pending: AtomicBool,
}

impl RestartCoalescer {
    pub fn new(service: Arc<dyn ManagedService>) -> Self {
        Self {
            service,
            pending: AtomicBool::new(false),
        }
    }

    /// Whether a restart is waiting to be applied.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for RestartCoalescer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestartCoalescer")
            .field("service", &self.service.name())
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl Restartable for RestartCoalescer {
    fn schedule(&self) {
        if !self.pending.swap(true, Ordering::AcqRel) {
            tracing::debug!(service = %self.service.name(), "Restart scheduled");
        }
    }

    fn apply(&self) -> Result<Option<RestartAction>> {
        if !self.pending.swap(false, Ordering::AcqRel) {
            return Ok(None);
        }

        let running = self.service.running()?;
        let action = if running {
            self.service.restart()?;
            RestartAction::Restarted
        } else {
            self.service.start()?;
            RestartAction::Started
        };

        tracing::info!(service = %self.service.name(), ?action, "Service reconciled");
        Ok(Some(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeService {
        running: bool,
        fail_query: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl ManagedService for FakeService {
        fn name(&self) -> &str {
            "fake"
        }

        fn running(&self) -> Result<bool> {
            if self.fail_query {
                return Err(Error::ServiceQuery {
                    unit: "fake".into(),
                    source: std::io::Error::other("boom"),
                });
            }
            Ok(self.running)
        }

        fn start(&self) -> Result<()> {
            self.calls.lock().unwrap().push("start");
            Ok(())
        }

        fn restart(&self) -> Result<()> {
            self.calls.lock().unwrap().push("restart");
            Ok(())
        }
    }

    #[test]
    fn test_many_schedules_one_restart() {
        let service = Arc::new(FakeService {
            running: true,
            ..Default::default()
        });
        let coalescer = RestartCoalescer::new(service.clone());

        coalescer.schedule();
        coalescer.schedule();
        coalescer.schedule();
        assert!(coalescer.is_pending());

        assert_eq!(coalescer.apply().unwrap(), Some(RestartAction::Restarted));
        assert_eq!(coalescer.apply().unwrap(), None);
        assert_eq!(*service.calls.lock().unwrap(), vec!["restart"]);
    }

    #[test]
    fn test_stopped_service_is_started() {
        let service = Arc::new(FakeService::default());
        let coalescer = RestartCoalescer::new(service.clone());

        coalescer.schedule();
        assert_eq!(coalescer.apply().unwrap(), Some(RestartAction::Started));
        assert_eq!(*service.calls.lock().unwrap(), vec!["start"]);
    }

    #[test]
    fn test_idle_apply_does_nothing() {
        let service = Arc::new(FakeService::default());
        let coalescer = RestartCoalescer::new(service.clone());

        assert_eq!(coalescer.apply().unwrap(), None);
        assert!(service.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_query_failure_propagates_and_clears() {
        let service = Arc::new(FakeService {
            fail_query: true,
            ..Default::default()
        });
        let coalescer = RestartCoalescer::new(service.clone());

        coalescer.schedule();
        assert!(matches!(coalescer.apply(), Err(Error::ServiceQuery { .. })));
        assert!(!coalescer.is_pending());
        assert!(service.calls.lock().unwrap().is_empty());
    }
}
