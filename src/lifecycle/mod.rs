//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → build handlers → Dispatcher → ShutdownGuard
//!
//! Shutdown (shutdown.rs):
//!     Guard dropped on the graceful path → close_all → final flush
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then handlers, then the guard
//! - A misconfigured logger is skipped, never fatal; the rest of the
//!   pipeline starts
//! - Exactly one final delivery per handler: close_all is idempotent and
//!   no sink delivers from a destructor

pub mod shutdown;
pub mod startup;

pub use shutdown::ShutdownGuard;
pub use startup::{bootstrap, BootstrapOptions, ExecutionMode};
