//! Console sink for local development.

use std::io::Write;

use crate::handler::{Handler, HandlerError};
use crate::record::{Record, RecordKind};

/// Unbuffered sink writing one formatted line per event to stderr.
///
/// Metric and span records are skipped; they have dedicated sinks.
pub struct ConsoleHandler;

impl ConsoleHandler {
    pub fn new() -> Self {
        Self
    }

    fn format_line(record: &Record) -> String {
        let epoch_secs = record
            .timestamp
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        if record.context.is_empty() {
            format!(
                "[{}] {}.{}: {}",
                epoch_secs,
                record.channel,
                record.level.as_str().to_uppercase(),
                record.message
            )
        } else {
            let context = serde_json::to_string(&record.context).unwrap_or_default();
            format!(
                "[{}] {}.{}: {} {}",
                epoch_secs,
                record.channel,
                record.level.as_str().to_uppercase(),
                record.message,
                context
            )
        }
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn handle(&mut self, record: &Record) -> Result<bool, HandlerError> {
        if !matches!(record.kind, RecordKind::Event) {
            return Ok(false);
        }
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", Self::format_line(record))?;
        Ok(true)
    }

    fn flush(&mut self) -> Result<(), HandlerError> {
        Ok(())
    }

    fn close(&mut self) {}
}
