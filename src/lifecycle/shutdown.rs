//! Shutdown coordination for the pipeline.

use std::sync::Arc;

use crate::dispatch::Dispatcher;

/// Scoped guard guaranteeing one final flush-and-close on the graceful
/// shutdown path.
///
/// The host keeps the guard alive for the process lifetime; dropping it
/// closes every handler. `Dispatcher::close_all` stays idempotent, so an
/// explicit early `close` and the drop at scope exit cannot double-flush.
/// A host that is killed without unwinding loses buffered records, which
/// the delivery contract accepts.
pub struct ShutdownGuard {
    dispatcher: Arc<Dispatcher>,
}

impl ShutdownGuard {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Close now instead of at scope exit.
    pub fn close(self) {
        // Drop runs close_all.
    }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        self.dispatcher.close_all();
    }
}
