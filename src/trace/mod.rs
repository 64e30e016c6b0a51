//! Trace span pipeline.
//!
//! # Data Flow
//! ```text
//! host instrumentation
//!     → Span::start(...).finish() → span record
//!     → Dispatcher::log
//!     → SpanHandler: drop unsampled, batch sampled
//!     → SpanEncoder (backend wire format)
//!     → HttpTransport (fire and forget)
//! ```
//!
//! # Design Decisions
//! - Sampling verdict is decided once per trace, keyed by the trace id,
//!   so every span of one trace shares the verdict
//! - Backends differ only in encoder + endpoint; the batching core is
//!   shared

pub mod encoder;
pub mod handler;
pub mod sampling;
pub mod span;

pub use encoder::{GenericJsonEncoder, SpanEncoder, ZipkinJsonEncoder};
pub use handler::SpanHandler;
pub use sampling::Sampler;
pub use span::Span;
