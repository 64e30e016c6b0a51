//! Record dispatch across registered handlers.
//!
//! # Responsibilities
//! - Hold the ordered handler list built at startup
//! - Apply per-handler level thresholds before invoking a sink
//! - Stop propagation when an accepting handler is registered non-bubbling
//! - Isolate handler failures from producers and from other handlers
//! - Close every handler exactly once on shutdown
//!
//! # Design Decisions
//! - Registration order is priority order; first registered, first tried
//! - No hidden global registry: the dispatcher is constructed once and
//!   shared by handle
//! - `log` returns nothing; a logging pipeline must never fail its caller

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::handler::Handler;
use crate::observability::metrics as diag;
use crate::record::{Level, Record};

struct HandlerEntry {
    name: String,
    min_level: Level,
    bubble: bool,
    handler: Mutex<Box<dyn Handler>>,
}

/// Ordered, immutable set of configured handlers.
pub struct Dispatcher {
    handlers: Vec<HandlerEntry>,
    closed: AtomicBool,
}

/// Builder collecting handlers during startup.
///
/// Registration happens once, at process initialization; reconfiguring
/// means rebuilding the dispatcher, not mutating a live one.
#[derive(Default)]
pub struct DispatcherBuilder {
    entries: Vec<HandlerEntry>,
}

impl DispatcherBuilder {
    /// Append a handler. Records at or above `min_level` are offered to
    /// it; when it accepts and `bubble` is false, later handlers are
    /// skipped for that record.
    pub fn register(
        mut self,
        name: impl Into<String>,
        min_level: Level,
        bubble: bool,
        handler: Box<dyn Handler>,
    ) -> Self {
        self.entries.push(HandlerEntry {
            name: name.into(),
            min_level,
            bubble,
            handler: Mutex::new(handler),
        });
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            handlers: self.entries,
            closed: AtomicBool::new(false),
        }
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Forward one record to every handler whose threshold admits it, in
    /// registration order.
    ///
    /// A failing handler is skipped and dispatch continues; nothing here
    /// surfaces to the producer.
    pub fn log(&self, record: &Record) {
        for entry in &self.handlers {
            if record.level < entry.min_level {
                continue;
            }
            let mut handler = match entry.handler.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            match handler.handle(record) {
                Ok(true) if !entry.bubble => return,
                Ok(_) => {}
                Err(e) => {
                    diag::record_handler_fault(&entry.name);
                    tracing::warn!(
                        handler = %entry.name,
                        error = %e,
                        "handler failed; continuing with remaining handlers"
                    );
                }
            }
        }
    }

    /// Flush every handler's pending records without closing anything.
    pub fn flush_all(&self) {
        for entry in &self.handlers {
            let mut handler = match entry.handler.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Err(e) = handler.flush() {
                diag::record_handler_fault(&entry.name);
                tracing::warn!(handler = %entry.name, error = %e, "flush failed");
            }
        }
    }

    /// Close every handler exactly once. Later calls are no-ops, so the
    /// shutdown guard and an explicit early call can coexist.
    pub fn close_all(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        for entry in &self.handlers {
            let mut handler = match entry.handler.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            handler.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::HandlerError;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    struct Probe {
        handled: Arc<AtomicUsize>,
        flushed: Arc<AtomicUsize>,
        closed: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Handler for Probe {
        fn handle(&mut self, _record: &Record) -> Result<bool, HandlerError> {
            if self.fail {
                return Err(HandlerError::Store("injected".into()));
            }
            self.handled.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        fn flush(&mut self) -> Result<(), HandlerError> {
            self.flushed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn close(&mut self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Counters {
        handled: Arc<AtomicUsize>,
        flushed: Arc<AtomicUsize>,
        closed: Arc<AtomicUsize>,
    }

    fn probe(fail: bool) -> (Box<Probe>, Counters) {
        let handled = Arc::new(AtomicUsize::new(0));
        let flushed = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));
        (
            Box::new(Probe {
                handled: handled.clone(),
                flushed: flushed.clone(),
                closed: closed.clone(),
                fail,
            }),
            Counters {
                handled,
                flushed,
                closed,
            },
        )
    }

    #[test]
    fn test_threshold_gates_each_handler_independently() {
        let (low, low_counters) = probe(false);
        let (high, high_counters) = probe(false);
        let dispatcher = Dispatcher::builder()
            .register("low", Level::Debug, true, low)
            .register("high", Level::Error, true, high)
            .build();

        dispatcher.log(&Record::new(Level::Info, "core", "info"));
        dispatcher.log(&Record::new(Level::Error, "core", "error"));

        assert_eq!(low_counters.handled.load(Ordering::SeqCst), 2);
        assert_eq!(high_counters.handled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_threshold_is_at_or_above() {
        let (exact, counters) = probe(false);
        let dispatcher = Dispatcher::builder()
            .register("exact", Level::Warning, true, exact)
            .build();

        dispatcher.log(&Record::new(Level::Warning, "core", "at threshold"));
        assert_eq!(counters.handled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_non_bubbling_handler_stops_propagation() {
        let (first, first_counters) = probe(false);
        let (second, second_counters) = probe(false);
        let dispatcher = Dispatcher::builder()
            .register("first", Level::Debug, false, first)
            .register("second", Level::Debug, true, second)
            .build();

        dispatcher.log(&Record::new(Level::Info, "core", "stops early"));

        assert_eq!(first_counters.handled.load(Ordering::SeqCst), 1);
        assert_eq!(second_counters.handled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failing_handler_does_not_block_later_handlers() {
        let (bad, _) = probe(true);
        let (good, good_counters) = probe(false);
        let dispatcher = Dispatcher::builder()
            .register("bad", Level::Debug, true, bad)
            .register("good", Level::Debug, true, good)
            .build();

        dispatcher.log(&Record::new(Level::Info, "core", "survives"));
        assert_eq!(good_counters.handled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_close_all_is_idempotent() {
        let (handler, counters) = probe(false);
        let dispatcher = Dispatcher::builder()
            .register("only", Level::Debug, true, handler)
            .build();

        dispatcher.close_all();
        dispatcher.close_all();
        assert_eq!(counters.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_flush_all_reaches_every_handler() {
        let (a, a_counters) = probe(false);
        let (b, b_counters) = probe(false);
        let dispatcher = Dispatcher::builder()
            .register("a", Level::Debug, true, a)
            .register("b", Level::Debug, true, b)
            .build();

        dispatcher.flush_all();
        assert_eq!(a_counters.flushed.load(Ordering::SeqCst), 1);
        assert_eq!(b_counters.flushed.load(Ordering::SeqCst), 1);
    }
}
