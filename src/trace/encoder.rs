//! Backend wire formats for span batches.
//!
//! Adding a collector means adding an encoder here (plus its endpoint in
//! configuration); the batching and sampling core never changes.

use serde_json::json;
use std::time::UNIX_EPOCH;

use crate::handler::HandlerError;
use crate::trace::span::Span;

/// Wire-format strategy for a span batch.
pub trait SpanEncoder: Send {
    /// MIME type of the encoded payload.
    fn content_type(&self) -> &'static str;

    /// Encode a batch of sampled spans.
    fn encode(&self, batch: &[Span]) -> Result<Vec<u8>, HandlerError>;
}

fn epoch_micros(span: &Span) -> u128 {
    span.start
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or_default()
}

/// Generic JSON representation: id, parent id, name, start, duration,
/// tags. Suitable for custom collectors.
pub struct GenericJsonEncoder;

impl SpanEncoder for GenericJsonEncoder {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode(&self, batch: &[Span]) -> Result<Vec<u8>, HandlerError> {
        let spans: Vec<_> = batch
            .iter()
            .map(|span| {
                json!({
                    "trace_id": span.trace_id.simple().to_string(),
                    "id": format!("{:016x}", span.id),
                    "parent_id": span.parent_id.map(|p| format!("{p:016x}")),
                    "name": span.name,
                    "start_us": epoch_micros(span) as u64,
                    "duration_us": span.duration.as_micros() as u64,
                    "tags": span.tags,
                })
            })
            .collect();
        Ok(serde_json::to_vec(&spans)?)
    }
}

/// Zipkin v2 JSON, as accepted on `POST /api/v2/spans`.
pub struct ZipkinJsonEncoder {
    service: String,
}

impl ZipkinJsonEncoder {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl SpanEncoder for ZipkinJsonEncoder {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode(&self, batch: &[Span]) -> Result<Vec<u8>, HandlerError> {
        let spans: Vec<_> = batch
            .iter()
            .map(|span| {
                let mut value = json!({
                    "traceId": span.trace_id.simple().to_string(),
                    "id": format!("{:016x}", span.id),
                    "name": span.name,
                    "timestamp": epoch_micros(span) as u64,
                    "duration": span.duration.as_micros() as u64,
                    "localEndpoint": { "serviceName": self.service },
                    "tags": span.tags,
                });
                if let Some(parent) = span.parent_id {
                    value["parentId"] = json!(format!("{parent:016x}"));
                }
                value
            })
            .collect();
        Ok(serde_json::to_vec(&spans)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::sampling::Sampler;
    use std::time::{Duration, SystemTime};

    fn sample_spans() -> Vec<Span> {
        let root = Span::root(
            "request",
            SystemTime::now(),
            Duration::from_millis(12),
            &Sampler::ALWAYS,
        )
        .with_tag("http.method", "GET");
        let child = root.child("db.query", SystemTime::now(), Duration::from_millis(3));
        vec![root, child]
    }

    #[test]
    fn test_generic_shape() {
        let body = GenericJsonEncoder.encode(&sample_spans()).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let spans = parsed.as_array().unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0]["name"], "request");
        assert!(spans[0]["parent_id"].is_null());
        assert_eq!(spans[0]["tags"]["http.method"], "GET");
        assert!(spans[1]["parent_id"].is_string());
    }

    #[test]
    fn test_zipkin_shape() {
        let body = ZipkinJsonEncoder::new("relay-test")
            .encode(&sample_spans())
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let spans = parsed.as_array().unwrap();
        assert_eq!(spans[0]["localEndpoint"]["serviceName"], "relay-test");
        assert_eq!(spans[0]["traceId"], spans[1]["traceId"]);
        assert!(spans[0].get("parentId").is_none());
        assert_eq!(spans[1]["parentId"], spans[0]["id"]);
        // ids are 16 hex chars, trace ids 32
        assert_eq!(spans[0]["id"].as_str().unwrap().len(), 16);
        assert_eq!(spans[0]["traceId"].as_str().unwrap().len(), 32);
    }
}
