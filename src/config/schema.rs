//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! pipeline. All types derive Serde traits for deserialization from
//! config files.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::Level;
use crate::transport::Verb;

/// Root configuration for the relay pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Records per buffered handler before an automatic flush.
    pub buffer_size: usize,

    /// Force unbuffered delivery when the host runs in CLI mode.
    pub unbuffered_cli: bool,

    /// Configured logger definitions, in priority order.
    pub loggers: Vec<LoggerConfig>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1000,
            unbuffered_cli: false,
            loggers: Vec::new(),
        }
    }
}

/// One configured logger: a sink plus its routing settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggerConfig {
    /// Unique logger identifier.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Display name, used in diagnostics.
    pub name: String,

    /// Disabled loggers are skipped at startup.
    #[serde(default = "default_true")]
    pub running: bool,

    /// Minimum severity accepted by this logger.
    #[serde(default)]
    pub level: Level,

    /// Continue to later handlers after this one accepts a record.
    #[serde(default = "default_true")]
    pub bubble: bool,

    /// Sink-specific settings.
    pub sink: SinkConfig,
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    3
}

fn default_sampling() -> u16 {
    100
}

fn default_service() -> String {
    "event-relay".to_string()
}

/// Sink-specific configuration, tagged by sink type.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    /// Line-formatted events on stderr.
    Console,

    /// Local event archive via the host-injected store.
    Archive,

    /// Batched delivery of events and metrics to a remote collector.
    Http {
        endpoint: String,
        #[serde(default)]
        verb: Verb,
        #[serde(default = "default_true")]
        buffered: bool,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },

    /// Batched, sampled span delivery to a tracing collector.
    Tracing {
        endpoint: String,
        /// Traces retained out of 1000.
        #[serde(default = "default_sampling")]
        sampling: u16,
        #[serde(default)]
        format: TraceFormat,
        #[serde(default = "default_service")]
        service: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

/// Wire format for span batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceFormat {
    Generic,
    Zipkin,
}

impl Default for TraceFormat {
    fn default() -> Self {
        TraceFormat::Generic
    }
}
