//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; every pool write and service action
//!   carries the pool id, path or unit as fields
//! - Log level comes from `RUST_LOG` first, then the manager config

pub mod logging;
