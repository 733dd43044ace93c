//! Pool configuration rendering.
//!
//! # Data Flow
//! ```text
//! BackendDescriptor.params (untyped)
//!     → params.rs (normalize into PoolSettings, apply defaults)
//!     → directives.rs (php_admin_values / php_flags lines)
//!     → render.rs (pool section text)
//! ```
//!
//! # Design Decisions
//! - Rendering is a pure function; it never fails
//! - Malformed directive lines are dropped, not reported
//! - Nonsensical sizes (pm_max below pm_min) are rendered as given

pub mod directives;
pub mod params;
pub mod render;

pub use directives::Directive;
pub use params::PoolSettings;
pub use render::{render_global, render_pool};
