//! Record sinks.
//!
//! # Data Flow
//! ```text
//! Dispatcher::log(record)
//!     → threshold check (dispatcher side)
//!     → Handler::handle(record) → accepted: bool
//!     → buffered sinks append, flush on size / close
//!     → unbuffered sinks deliver inline
//! ```
//!
//! # Design Decisions
//! - One capability trait for every sink; batching is a decorator concern
//! - Handler errors never reach producers; the dispatcher isolates them
//! - `close` is the only path that performs final delivery and must be
//!   idempotent

use thiserror::Error;

use crate::record::Record;

pub mod archive;
pub mod buffered;
pub mod console;

pub use archive::{ArchiveHandler, ArchiveRow, EventStore, StoreError};
pub use buffered::{BatchEncoder, BufferedHttpHandler, JsonLinesEncoder};
pub use console::ConsoleHandler;

/// Errors surfaced by a sink.
///
/// Always isolated at the dispatcher: a failing handler is skipped for
/// the current record and dispatch continues with the remaining handlers.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("sink i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive store rejected row: {0}")]
    Store(String),
}

/// Capability contract implemented by every sink.
pub trait Handler: Send {
    /// Process one record.
    ///
    /// Returns `Ok(true)` when the record passed this handler's own
    /// filters and was accepted. The dispatcher combines the accepted
    /// flag with the registration's bubble setting to decide whether the
    /// record continues to later handlers.
    fn handle(&mut self, record: &Record) -> Result<bool, HandlerError>;

    /// Deliver any buffered records now. A no-op for empty buffers and
    /// for sinks that deliver inline.
    fn flush(&mut self) -> Result<(), HandlerError>;

    /// Final flush plus resource release. Safe to call more than once;
    /// only the first call delivers.
    fn close(&mut self);
}
