//! Local archive sink.
//!
//! The storage engine itself lives outside this crate; hosts inject an
//! [`EventStore`] implementation and the sink translates records into
//! archive rows. Reads, pagination and filtering happen on the store's
//! side entirely.

use serde::Serialize;
use std::time::SystemTime;
use thiserror::Error;
use uuid::Uuid;

use crate::handler::{Handler, HandlerError};
use crate::record::{context_keys, Level, Record, RecordKind};

/// One row in the local event archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveRow {
    pub id: Uuid,
    pub level: Level,
    pub channel: String,
    pub component: String,
    pub version: String,
    pub class: String,
    pub site_id: Option<u64>,
    pub site_name: Option<String>,
    pub user_id: Option<u64>,
    pub user_name: Option<String>,
    pub remote_ip: Option<String>,
    pub timestamp: SystemTime,
    pub code: u64,
    pub message: String,
}

impl ArchiveRow {
    /// Derive a row from a shared record without mutating it.
    pub fn from_record(record: &Record) -> Self {
        let ctx_u64 =
            |key: &str| record.context_value(key).and_then(|v| v.as_u64());
        Self {
            id: Uuid::new_v4(),
            level: record.level,
            channel: record.channel.clone(),
            component: record
                .context_str(context_keys::COMPONENT)
                .unwrap_or_default(),
            version: record
                .context_str(context_keys::VERSION)
                .unwrap_or_default(),
            class: record.context_str(context_keys::CLASS).unwrap_or_default(),
            site_id: ctx_u64(context_keys::SITE_ID),
            site_name: record.context_str(context_keys::SITE_NAME),
            user_id: ctx_u64(context_keys::USER_ID),
            user_name: record.context_str(context_keys::USER_NAME),
            remote_ip: record.context_str(context_keys::REMOTE_IP),
            timestamp: record.timestamp,
            code: ctx_u64(context_keys::CODE).unwrap_or_default(),
            message: record.message.clone(),
        }
    }
}

/// Error raised by a storage collaborator on insert.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Storage collaborator contract. Implementations own schema, queries
/// and retention.
pub trait EventStore: Send {
    fn insert(&mut self, row: ArchiveRow) -> Result<(), StoreError>;
}

/// Unbuffered sink inserting one archive row per accepted event.
pub struct ArchiveHandler {
    store: Box<dyn EventStore>,
}

impl ArchiveHandler {
    pub fn new(store: Box<dyn EventStore>) -> Self {
        Self { store }
    }
}

impl Handler for ArchiveHandler {
    fn handle(&mut self, record: &Record) -> Result<bool, HandlerError> {
        if !matches!(record.kind, RecordKind::Event) {
            return Ok(false);
        }
        self.store
            .insert(ArchiveRow::from_record(record))
            .map_err(|e| HandlerError::Store(e.to_string()))?;
        Ok(true)
    }

    fn flush(&mut self) -> Result<(), HandlerError> {
        Ok(())
    }

    fn close(&mut self) {}
}
