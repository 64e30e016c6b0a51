//! Buffered sink for trace spans.

use crate::handler::{Handler, HandlerError};
use crate::observability::metrics as diag;
use crate::record::{Level, Record, RecordKind};
use crate::trace::encoder::SpanEncoder;
use crate::trace::sampling::Sampler;
use crate::trace::span::Span;
use crate::transport::Transport;

/// Batching sink for span records.
///
/// Unsampled spans are dropped on arrival, before they occupy buffer
/// capacity, so sampled data is never delayed by discarded traces. The
/// sink's own verdict is keyed by the trace id, exactly like the
/// creation-time draw, so both decisions agree for equal rates and every
/// span of one trace shares the verdict. The wire format and endpoint
/// are injected; swapping collectors does not touch this type.
pub struct SpanHandler {
    min_level: Level,
    buffered: bool,
    buffer_size: usize,
    buffer: Vec<Span>,
    sampler: Sampler,
    encoder: Box<dyn SpanEncoder>,
    transport: Box<dyn Transport>,
    closed: bool,
}

impl SpanHandler {
    pub fn new(
        min_level: Level,
        buffered: bool,
        buffer_size: usize,
        sampler: Sampler,
        encoder: Box<dyn SpanEncoder>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            min_level,
            buffered,
            buffer_size: buffer_size.max(1),
            buffer: Vec::new(),
            sampler,
            encoder,
            transport,
            closed: false,
        }
    }

    /// Number of sampled spans currently awaiting delivery.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Handler for SpanHandler {
    fn handle(&mut self, record: &Record) -> Result<bool, HandlerError> {
        let span = match &record.kind {
            RecordKind::Span(span) => span,
            _ => return Ok(false),
        };
        if record.level < self.min_level {
            return Ok(false);
        }
        if !span.sampled() || !self.sampler.verdict(span.trace_id) {
            diag::record_span_dropped();
            return Ok(true);
        }
        self.buffer.push(span.clone());
        if !self.buffered || self.buffer.len() >= self.buffer_size {
            self.flush()?;
        }
        Ok(true)
    }

    fn flush(&mut self) -> Result<(), HandlerError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let batch: Vec<Span> = self.buffer.drain(..).collect();
        let body = self.encoder.encode(&batch)?;
        // Outcome is diagnostic only; the batch is gone either way.
        let _ = self.transport.send(body);
        Ok(())
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.flush() {
            diag::record_handler_fault("span");
            tracing::debug!(error = %e, "final span flush failed");
        }
    }
}
