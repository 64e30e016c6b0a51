//! Outbound HTTP delivery boundary.
//!
//! # Responsibilities
//! - Build the outbound request (verb, endpoint, fixed header set)
//! - Send one batch in a single bounded call
//! - Surface the outcome as a value that callers deliberately discard
//!
//! # Design Decisions
//! - Fire and forget: no retry, no error propagation to producers
//! - The request timeout bounds shutdown latency, since the final flush
//!   runs on the teardown path
//! - Every request carries a marker header so an instrumented HTTP stack
//!   does not feed the delivery call back into the pipeline

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::observability::metrics as diag;

/// Marker header telling any instrumented HTTP stack not to log the
/// delivery call itself.
pub const NO_LOG_HEADER: &str = "x-relay-no-log";

/// Stable user-agent sent with every delivery request.
pub const RELAY_USER_AGENT: &str = concat!("event-relay/", env!("CARGO_PKG_VERSION"));

/// Default bound on a single delivery call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// HTTP verb used for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Get,
    Post,
}

impl Default for Verb {
    fn default() -> Self {
        Verb::Post
    }
}

/// Outcome of one delivery attempt.
///
/// Returned instead of a `Result` so call sites discard it deliberately:
/// a failed delivery is a diagnostic fact, never a caller-visible error,
/// and the batch is never re-queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Failed,
}

/// Errors raised while constructing a transport. Construction failures
/// are configuration errors; the send path itself never errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint url: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A sink-side transport step that accepts one encoded batch per call.
pub trait Transport: Send {
    /// Send one batch. Must not block beyond a single bounded call.
    fn send(&self, body: Vec<u8>) -> Delivery;
}

/// HTTP transport for remote collectors.
pub struct HttpTransport {
    endpoint: Url,
    verb: Verb,
    headers: HeaderMap,
    client: Client,
}

impl HttpTransport {
    /// Build a transport for the given endpoint.
    pub fn new(
        endpoint: Url,
        verb: Verb,
        content_type: &'static str,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(RELAY_USER_AGENT));
        headers.insert(NO_LOG_HEADER, HeaderValue::from_static("outbound"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));

        Ok(Self {
            endpoint,
            verb,
            headers,
            client,
        })
    }

    /// The configured endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send(&self, body: Vec<u8>) -> Delivery {
        let request = match self.verb {
            Verb::Post => self.client.post(self.endpoint.clone()),
            Verb::Get => self.client.get(self.endpoint.clone()),
        };

        let outcome = match request.headers(self.headers.clone()).body(body).send() {
            Ok(response) if response.status().is_success() => Delivery::Sent,
            Ok(response) => {
                tracing::debug!(
                    endpoint = %self.endpoint,
                    status = %response.status(),
                    "collector refused batch"
                );
                Delivery::Failed
            }
            Err(e) => {
                tracing::debug!(endpoint = %self.endpoint, error = %e, "delivery failed");
                Delivery::Failed
            }
        };
        diag::record_delivery(outcome);
        outcome
    }
}
