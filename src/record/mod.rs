//! Event records and severity levels.
//!
//! # Data Flow
//! ```text
//! producer code
//!     → Record::new(level, channel, message)
//!     → .with_context(...) / .with_kind(...)
//!     → Dispatcher::log(&record)
//!     → each handler derives its own wire payload from the shared record
//! ```
//!
//! # Design Decisions
//! - Records are immutable once constructed; handlers read, never mutate
//! - Context is an open string → JSON value map with well-known keys
//! - Metric samples and spans ride the same record type via `RecordKind`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;
use thiserror::Error;

use crate::monitor::MetricSample;
use crate::trace::span::Span;

/// Well-known context keys recognized by the archive sink.
pub mod context_keys {
    pub const COMPONENT: &str = "component";
    pub const VERSION: &str = "version";
    pub const CLASS: &str = "class";
    pub const SITE_ID: &str = "site_id";
    pub const SITE_NAME: &str = "site_name";
    pub const USER_ID: &str = "user_id";
    pub const USER_NAME: &str = "user_name";
    pub const REMOTE_IP: &str = "remote_ip";
    pub const CODE: &str = "code";
}

/// Ordinal severity of a record.
///
/// The declaration order is the severity order, so the derived `Ord`
/// matches the numeric scale returned by [`Level::as_u16`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Level {
    /// Numeric severity value used on the wire and in the archive.
    pub fn as_u16(self) -> u16 {
        match self {
            Level::Debug => 100,
            Level::Info => 200,
            Level::Notice => 250,
            Level::Warning => 300,
            Level::Error => 400,
            Level::Critical => 500,
            Level::Alert => 550,
            Level::Emergency => 600,
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Alert => "alert",
            Level::Emergency => "emergency",
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Debug
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Error)]
#[error("unknown level name: {0}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "notice" => Ok(Level::Notice),
            "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            "alert" => Ok(Level::Alert),
            "emergency" => Ok(Level::Emergency),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

/// What a record carries besides its message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A plain log event.
    Event,
    /// A gauge mutation emitted by the monitor facade.
    Metric(MetricSample),
    /// A traced unit of work.
    Span(Span),
}

/// One structured log or metric event.
///
/// A record is a value: once constructed it is never mutated. Handlers
/// that need a backend-specific shape build a derived payload and leave
/// the shared instance untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Severity used for threshold routing.
    pub level: Level,
    /// Logical source subsystem label.
    pub channel: String,
    /// Human-readable message.
    pub message: String,
    /// Structured context fields.
    pub context: BTreeMap<String, Value>,
    /// Creation instant, set once.
    pub timestamp: SystemTime,
    /// Payload kind.
    pub kind: RecordKind,
}

impl Record {
    /// Create a plain event record stamped with the current time.
    pub fn new(level: Level, channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            channel: channel.into(),
            message: message.into(),
            context: BTreeMap::new(),
            timestamp: SystemTime::now(),
            kind: RecordKind::Event,
        }
    }

    /// Attach one context field.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Replace the payload kind.
    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    /// Context value for a key, if present.
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    /// Context value rendered as a string, if present.
    pub fn context_str(&self, key: &str) -> Option<String> {
        self.context.get(key).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
