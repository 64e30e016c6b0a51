//! Observability of the pipeline itself.
//!
//! # Data Flow
//! ```text
//! pipeline internals produce:
//!     → logging.rs (tracing diagnostics for the host log)
//!     → metrics.rs (delivery / drop / fault counters)
//!
//! Consumers:
//!     → host tracing subscriber (stdout, file, remote)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The pipeline's own diagnostics never re-enter the pipeline; they go
//!   through `tracing` and the `metrics` facade only
//! - Counter updates are cheap and fire-and-forget, like the deliveries
//!   they describe

pub mod logging;
pub mod metrics;
