//! Internal diagnostic counters.
//!
//! # Metrics
//! - `relay_delivery_attempts_total` (counter): transport calls made
//! - `relay_delivery_failures_total` (counter): transport calls that did
//!   not reach the collector
//! - `relay_handler_faults_total` (counter): handler errors isolated by
//!   the dispatcher, labeled by handler
//! - `relay_spans_dropped_total` (counter): spans discarded by sampling
//! - `relay_unknown_gauge_total` (counter): mutations of gauges that
//!   were never created
//! - `relay_loggers_rejected_total` (counter): logger definitions
//!   skipped at startup
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; the host decides on a
//!   recorder, or none
//! - Counters only: these are drop/fault tallies, not a metrics product

use metrics::counter;

use crate::transport::Delivery;

/// Count one transport call and, when it failed, the failure.
pub fn record_delivery(outcome: Delivery) {
    counter!("relay_delivery_attempts_total").increment(1);
    if outcome == Delivery::Failed {
        counter!("relay_delivery_failures_total").increment(1);
    }
}

/// Count one handler error isolated by the dispatcher.
pub fn record_handler_fault(handler: &str) {
    counter!("relay_handler_faults_total", "handler" => handler.to_string()).increment(1);
}

/// Count one span discarded by sampling.
pub fn record_span_dropped() {
    counter!("relay_spans_dropped_total").increment(1);
}

/// Count one mutation of a gauge that does not exist.
pub fn record_unknown_gauge() {
    counter!("relay_unknown_gauge_total").increment(1);
}

/// Count one logger definition rejected during bootstrap.
pub fn record_logger_rejected() {
    counter!("relay_loggers_rejected_total").increment(1);
}
