//! Managed service subsystem.
//!
//! # Data Flow
//! ```text
//! configuration pass touches N pools
//!     → restart.rs: schedule() N times (coalesced into one pending flag)
//!     → restart.rs: apply() once
//!         → running? restart : start
//!
//! health reporting
//!     → health.rs: check() → running?
//! ```
//!
//! # Design Decisions
//! - The OS service manager sits behind the `ManagedService` trait
//! - One coalescer per managed service instance
//! - Query or control failures are fatal and propagate to the caller

pub mod health;
pub mod restart;
pub mod systemd;

pub use health::ServiceHealthCheck;
pub use restart::RestartCoalescer;
pub use systemd::SystemdService;

use crate::error::Result;

/// Query and control of an OS-level daemon.
pub trait ManagedService: Send + Sync {
    /// Unit name, for logs and errors.
    fn name(&self) -> &str;

    /// Whether the service is currently running.
    fn running(&self) -> Result<bool>;

    fn start(&self) -> Result<()>;

    fn restart(&self) -> Result<()>;
}
