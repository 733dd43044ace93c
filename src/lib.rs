//! FastCGI process-manager pool configuration.
//!
//! Renders one pool file per PHP backend of every enabled website and
//! reconciles the managed service with a single coalesced restart.

pub mod component;
pub mod config;
pub mod error;
pub mod gateway;
pub mod observability;
pub mod pool;
pub mod service;

pub use component::{ConfigRenderer, HealthCheck, PassReport, RestartAction, Restartable};
pub use config::ManagerConfig;
pub use error::{Error, Result};
pub use gateway::FpmGateway;
pub use service::{ManagedService, RestartCoalescer, ServiceHealthCheck, SystemdService};
