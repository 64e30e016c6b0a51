//! Buffered fire-and-forget HTTP sink.
//!
//! # Responsibilities
//! - Apply the sink's own level filter
//! - Append accepted records to an in-memory batch
//! - Flush on size, on demand, and exactly once on close
//! - Encode the drained batch and hand it to the transport in one call
//!
//! # Design Decisions
//! - Flush clears the buffer unconditionally; a failed delivery never
//!   re-queues records
//! - Wire format is an injected strategy, so a new backend is a new
//!   encoder plus endpoint, not a new sink
//! - No `Drop` impl: final delivery belongs to `close`, which the host
//!   triggers through the shutdown guard

use crate::handler::{Handler, HandlerError};
use crate::observability::metrics as diag;
use crate::record::{Level, Record, RecordKind};
use crate::transport::Transport;

/// Wire-format strategy for a record batch.
pub trait BatchEncoder: Send {
    /// MIME type of the encoded payload.
    fn content_type(&self) -> &'static str;

    /// Encode a drained batch into the backend wire format.
    fn encode(&self, batch: &[Record]) -> Result<Vec<u8>, HandlerError>;
}

/// Newline-delimited JSON, one record per line.
pub struct JsonLinesEncoder;

impl BatchEncoder for JsonLinesEncoder {
    fn content_type(&self) -> &'static str {
        "application/x-ndjson"
    }

    fn encode(&self, batch: &[Record]) -> Result<Vec<u8>, HandlerError> {
        let mut body = Vec::new();
        for record in batch {
            body.extend_from_slice(&serde_json::to_vec(record)?);
            body.push(b'\n');
        }
        Ok(body)
    }
}

/// Batching decorator around a remote HTTP endpoint.
///
/// Ships event and metric records; span records belong to the tracing
/// sink and are skipped here.
pub struct BufferedHttpHandler {
    min_level: Level,
    buffered: bool,
    buffer_size: usize,
    buffer: Vec<Record>,
    encoder: Box<dyn BatchEncoder>,
    transport: Box<dyn Transport>,
    closed: bool,
}

impl BufferedHttpHandler {
    pub fn new(
        min_level: Level,
        buffered: bool,
        buffer_size: usize,
        encoder: Box<dyn BatchEncoder>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            min_level,
            buffered,
            buffer_size: buffer_size.max(1),
            buffer: Vec::new(),
            encoder,
            transport,
            closed: false,
        }
    }

    /// Number of records currently awaiting delivery.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

impl Handler for BufferedHttpHandler {
    fn handle(&mut self, record: &Record) -> Result<bool, HandlerError> {
        if matches!(record.kind, RecordKind::Span(_)) {
            return Ok(false);
        }
        if record.level < self.min_level {
            return Ok(false);
        }
        self.buffer.push(record.clone());
        if !self.buffered || self.buffer.len() >= self.buffer_size {
            self.flush()?;
        }
        Ok(true)
    }

    fn flush(&mut self) -> Result<(), HandlerError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let batch: Vec<Record> = self.buffer.drain(..).collect();
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
            diag::record_handler_fault("buffered_http");
            tracing::debug!(error = %e, "final flush failed");
        }
    }
}
