//! Gauge facade feeding the record pipeline.
//!
//! # Responsibilities
//! - Maintain named gauges for two independent profiles
//! - Translate every gauge mutation into a metric-kind record
//! - Stamp emitted records with the owning component's identity
//!
//! # Design Decisions
//! - Decrement is increment by the negated delta; values may go negative
//! - Mutating an unknown gauge is a silent no-op (diagnostic-counted),
//!   never an error to the caller

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dispatch::Dispatcher;
use crate::observability::metrics as diag;
use crate::record::{context_keys, Level, Record, RecordKind};

/// Independent metric namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Production,
    Development,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Production => "production",
            Profile::Development => "development",
        }
    }
}

/// Gauge mutation kinds carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeOp {
    Create,
    Set,
    Inc,
}

/// One gauge mutation riding the record pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct MetricSample {
    pub profile: Profile,
    pub name: String,
    pub op: GaugeOp,
    /// New absolute value for create/set, signed delta for inc.
    pub value: f64,
}

struct Gauge {
    value: f64,
    help: Option<String>,
}

/// Per-component metrics front end.
///
/// Constructed once per emitting component; the component identity
/// (class, name, version) is stamped into the context of every record
/// the monitor emits.
pub struct Monitor {
    class: String,
    component: String,
    version: String,
    dispatcher: Arc<Dispatcher>,
    production: DashMap<String, Gauge>,
    development: DashMap<String, Gauge>,
}

impl Monitor {
    pub fn new(
        class: impl Into<String>,
        component: impl Into<String>,
        version: impl Into<String>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            class: class.into(),
            component: component.into(),
            version: version.into(),
            dispatcher,
            production: DashMap::new(),
            development: DashMap::new(),
        }
    }

    fn gauges(&self, profile: Profile) -> &DashMap<String, Gauge> {
        match profile {
            Profile::Production => &self.production,
            Profile::Development => &self.development,
        }
    }

    /// Create the named gauge and set its initial value. Re-creating an
    /// existing gauge resets it.
    pub fn create_gauge(
        &self,
        profile: Profile,
        name: impl Into<String>,
        initial: f64,
        help: Option<&str>,
    ) {
        let name = name.into();
        self.gauges(profile).insert(
            name.clone(),
            Gauge {
                value: initial,
                help: help.map(str::to_string),
            },
        );
        self.emit(profile, name, GaugeOp::Create, initial);
    }

    /// Set the named gauge to an absolute value.
    pub fn set_gauge(&self, profile: Profile, name: &str, value: f64) {
        match self.gauges(profile).get_mut(name) {
            Some(mut gauge) => {
                gauge.value = value;
                drop(gauge);
                self.emit(profile, name.to_string(), GaugeOp::Set, value);
            }
            None => self.unknown_gauge(profile, name),
        }
    }

    /// Increment the named gauge by a signed delta.
    pub fn inc_gauge(&self, profile: Profile, name: &str, delta: f64) {
        match self.gauges(profile).get_mut(name) {
            Some(mut gauge) => {
                gauge.value += delta;
                drop(gauge);
                self.emit(profile, name.to_string(), GaugeOp::Inc, delta);
            }
            None => self.unknown_gauge(profile, name),
        }
    }

    /// Decrement the named gauge: an increment of the negated delta. No
    /// floor is applied.
    pub fn dec_gauge(&self, profile: Profile, name: &str, delta: f64) {
        self.inc_gauge(profile, name, -delta);
    }

    /// Current value of a gauge, if it exists.
    pub fn gauge_value(&self, profile: Profile, name: &str) -> Option<f64> {
        self.gauges(profile).get(name).map(|g| g.value)
    }

    /// Help string of a gauge, if one was supplied at creation.
    pub fn gauge_help(&self, profile: Profile, name: &str) -> Option<String> {
        self.gauges(profile)
            .get(name)
            .and_then(|g| g.help.clone())
    }

    fn unknown_gauge(&self, profile: Profile, name: &str) {
        diag::record_unknown_gauge();
        tracing::debug!(
            profile = profile.as_str(),
            gauge = name,
            "mutation of unknown gauge ignored"
        );
    }

    fn emit(&self, profile: Profile, name: String, op: GaugeOp, value: f64) {
        let message = format!("gauge {name}");
        let record = Record::new(Level::Debug, "metrics", message)
            .with_context(context_keys::CLASS, self.class.clone())
            .with_context(context_keys::COMPONENT, self.component.clone())
            .with_context(context_keys::VERSION, self.version.clone())
            .with_kind(RecordKind::Metric(MetricSample {
                profile,
                name,
                op,
                value,
            }));
        self.dispatcher.log(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{Handler, HandlerError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MetricProbe {
        seen: Arc<AtomicUsize>,
    }

    impl Handler for MetricProbe {
        fn handle(&mut self, record: &Record) -> Result<bool, HandlerError> {
            if matches!(record.kind, RecordKind::Metric(_)) {
                self.seen.fetch_add(1, Ordering::SeqCst);
            }
            Ok(true)
        }

        fn flush(&mut self) -> Result<(), HandlerError> {
            Ok(())
        }

        fn close(&mut self) {}
    }

    fn monitor_with_probe() -> (Monitor, Arc<AtomicUsize>) {
        let seen = Arc::new(AtomicUsize::new(0));
        let dispatcher = Dispatcher::builder()
            .register(
                "probe",
                Level::Debug,
                true,
                Box::new(MetricProbe { seen: seen.clone() }),
            )
            .build();
        (
            Monitor::new("plugin", "scheduler", "1.0.0", Arc::new(dispatcher)),
            seen,
        )
    }

    #[test]
    fn test_dec_is_exact_inverse_of_inc() {
        let (monitor, _) = monitor_with_probe();
        monitor.create_gauge(Profile::Production, "jobs_active", 5.0, None);
        monitor.inc_gauge(Profile::Production, "jobs_active", 2.5);
        monitor.dec_gauge(Profile::Production, "jobs_active", 2.5);
        assert_eq!(
            monitor.gauge_value(Profile::Production, "jobs_active"),
            Some(5.0)
        );
    }

    #[test]
    fn test_no_floor_at_zero() {
        let (monitor, _) = monitor_with_probe();
        monitor.create_gauge(Profile::Development, "headroom", 1.0, None);
        monitor.dec_gauge(Profile::Development, "headroom", 3.0);
        assert_eq!(
            monitor.gauge_value(Profile::Development, "headroom"),
            Some(-2.0)
        );
    }

    #[test]
    fn test_profiles_are_independent() {
        let (monitor, _) = monitor_with_probe();
        monitor.create_gauge(Profile::Production, "size", 1.0, None);
        monitor.create_gauge(Profile::Development, "size", 10.0, None);
        monitor.inc_gauge(Profile::Production, "size", 1.0);
        assert_eq!(monitor.gauge_value(Profile::Production, "size"), Some(2.0));
        assert_eq!(
            monitor.gauge_value(Profile::Development, "size"),
            Some(10.0)
        );
    }

    #[test]
    fn test_every_mutation_emits_a_metric_record() {
        let (monitor, seen) = monitor_with_probe();
        monitor.create_gauge(Profile::Production, "g", 0.0, Some("a gauge"));
        monitor.set_gauge(Profile::Production, "g", 4.0);
        monitor.inc_gauge(Profile::Production, "g", 1.0);
        monitor.dec_gauge(Profile::Production, "g", 1.0);
        assert_eq!(seen.load(Ordering::SeqCst), 4);
        assert_eq!(
            monitor.gauge_help(Profile::Production, "g").as_deref(),
            Some("a gauge")
        );
    }

    #[test]
    fn test_unknown_gauge_mutation_is_a_no_op() {
        let (monitor, seen) = monitor_with_probe();
        monitor.set_gauge(Profile::Production, "missing", 1.0);
        monitor.inc_gauge(Profile::Production, "missing", 1.0);
        assert_eq!(seen.load(Ordering::SeqCst), 0);
        assert_eq!(monitor.gauge_value(Profile::Production, "missing"), None);
    }
}
