//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (buffer size, timeouts, sampling rate)
//! - Check endpoint URLs and logger identity uniqueness
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;
use url::Url;

use crate::config::schema::{RelayConfig, SinkConfig};

/// One semantic problem in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("buffer_size must be at least 1")]
    ZeroBufferSize,

    #[error("logger at index {0} has an empty name")]
    EmptyLoggerName(usize),

    #[error("duplicate logger id {0}")]
    DuplicateLoggerId(uuid::Uuid),

    #[error("logger '{name}': invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        name: String,
        endpoint: String,
        reason: String,
    },

    #[error("logger '{name}': sampling rate {rate} is out of range (0..=1000)")]
    SamplingOutOfRange { name: String, rate: u16 },

    #[error("logger '{name}': timeout must be at least 1 second")]
    ZeroTimeout { name: String },
}

fn check_endpoint(name: &str, endpoint: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(endpoint) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::InvalidEndpoint {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidEndpoint {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Run all semantic checks on a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.buffer_size == 0 {
        errors.push(ValidationError::ZeroBufferSize);
    }

    let mut seen_ids = HashSet::new();
    for (index, logger) in config.loggers.iter().enumerate() {
        if logger.name.trim().is_empty() {
            errors.push(ValidationError::EmptyLoggerName(index));
        }
        if !seen_ids.insert(logger.id) {
            errors.push(ValidationError::DuplicateLoggerId(logger.id));
        }

        match &logger.sink {
            SinkConfig::Console | SinkConfig::Archive => {}
            SinkConfig::Http {
                endpoint,
                timeout_secs,
                ..
            } => {
                check_endpoint(&logger.name, endpoint, &mut errors);
                if *timeout_secs == 0 {
                    errors.push(ValidationError::ZeroTimeout {
                        name: logger.name.clone(),
                    });
                }
            }
            SinkConfig::Tracing {
                endpoint,
                sampling,
                timeout_secs,
                ..
            } => {
                check_endpoint(&logger.name, endpoint, &mut errors);
                if *sampling > 1000 {
                    errors.push(ValidationError::SamplingOutOfRange {
                        name: logger.name.clone(),
                        rate: *sampling,
                    });
                }
                if *timeout_secs == 0 {
                    errors.push(ValidationError::ZeroTimeout {
                        name: logger.name.clone(),
                    });
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
