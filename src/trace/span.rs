//! Trace span model.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::record::{Level, Record, RecordKind};
use crate::trace::sampling::Sampler;

/// One traced unit of work.
///
/// The sampled verdict is drawn exactly once, at creation, from the
/// trace id. It is never re-evaluated afterwards, so spans sharing a
/// trace id share the verdict.
#[derive(Debug, Clone, Serialize)]
pub struct Span {
    /// Trace this span belongs to.
    pub trace_id: Uuid,
    /// Span identifier, random per span.
    pub id: u64,
    /// Parent span, `None` at the trace root.
    pub parent_id: Option<u64>,
    /// Operation name.
    pub name: String,
    /// Wall-clock start.
    pub start: SystemTime,
    /// Elapsed time of the unit of work.
    pub duration: Duration,
    /// Free-form tags attached to the span.
    pub tags: BTreeMap<String, String>,
    #[serde(skip)]
    sampled: bool,
}

impl Span {
    /// Create a finished span and draw its sampling verdict.
    pub fn new(
        trace_id: Uuid,
        parent_id: Option<u64>,
        name: impl Into<String>,
        start: SystemTime,
        duration: Duration,
        sampler: &Sampler,
    ) -> Self {
        Self {
            trace_id,
            id: rand::random::<u64>(),
            parent_id,
            name: name.into(),
            start,
            duration,
            tags: BTreeMap::new(),
            sampled: sampler.verdict(trace_id),
        }
    }

    /// Root span of a fresh trace.
    pub fn root(
        name: impl Into<String>,
        start: SystemTime,
        duration: Duration,
        sampler: &Sampler,
    ) -> Self {
        Self::new(Uuid::new_v4(), None, name, start, duration, sampler)
    }

    /// Child span sharing this span's trace id and verdict.
    pub fn child(&self, name: impl Into<String>, start: SystemTime, duration: Duration) -> Self {
        Self {
            trace_id: self.trace_id,
            id: rand::random::<u64>(),
            parent_id: Some(self.id),
            name: name.into(),
            start,
            duration,
            tags: BTreeMap::new(),
            sampled: self.sampled,
        }
    }

    /// Attach one tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// The verdict drawn at creation.
    pub fn sampled(&self) -> bool {
        self.sampled
    }

    /// Wrap this span into a record for dispatch.
    pub fn into_record(self, channel: impl Into<String>) -> Record {
        let message = self.name.clone();
        Record::new(Level::Info, channel, message).with_kind(RecordKind::Span(self))
    }

    #[cfg(test)]
    pub(crate) fn for_tests(name: &str) -> Self {
        Self::root(
            name,
            SystemTime::now(),
            Duration::from_millis(1),
            &Sampler::ALWAYS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_inherits_trace_and_verdict() {
        let root = Span::root(
            "request",
            SystemTime::now(),
            Duration::from_millis(20),
            &Sampler::ALWAYS,
        );
        let child = root.child("db.query", SystemTime::now(), Duration::from_millis(5));

        assert_eq!(child.trace_id, root.trace_id);
        assert_eq!(child.parent_id, Some(root.id));
        assert_eq!(child.sampled(), root.sampled());
        assert_ne!(child.id, root.id);
    }

    #[test]
    fn test_verdict_fixed_at_creation() {
        let never = Span::root(
            "request",
            SystemTime::now(),
            Duration::ZERO,
            &Sampler::NEVER,
        );
        assert!(!never.sampled());
        // A later child still carries the creation-time verdict.
        let child = never.child("inner", SystemTime::now(), Duration::ZERO);
        assert!(!child.sampled());
    }

    #[test]
    fn test_into_record_carries_span_kind() {
        let span = Span::for_tests("request");
        let record = span.clone().into_record("trace");
        match record.kind {
            RecordKind::Span(s) => assert_eq!(s.name, "request"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
