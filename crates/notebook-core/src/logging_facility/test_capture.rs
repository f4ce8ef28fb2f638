//! In-memory event capture for logging assertions
//!
//! Installs a subscriber layer that records every event as a flat map of
//! field name to rendered value, keyed by the canonical schema names
//! (`op`, `event`, `err.code`, ...).

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use notebook_core_types::schema::{FIELD_ERR_CODE, FIELD_EVENT, FIELD_OP};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    /// Rendered value of a field; strings are unquoted
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether this is the `event` of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.field(FIELD_OP) == Some(op) && self.field(FIELD_EVENT) == Some(event)
    }

    pub fn err_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }
}

struct FieldRecorder<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldRecorder<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    // Numbers and bools reach here too and render without quotes
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{:?}", value));
    }
}

type EventLog = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    log: EventLog,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldRecorder(&mut fields));
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CapturedEvent {
                level: *event.metadata().level(),
                fields,
            });
    }
}

/// Shared handle on everything captured so far
#[derive(Clone)]
pub struct TestCapture {
    log: EventLog,
}

impl TestCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured `event`s of operation `op`, oldest first
    pub fn events_of(&self, op: &str, event: &str) -> Vec<CapturedEvent> {
        self.events().into_iter().filter(|e| e.is(op, event)).collect()
    }

    /// Number of captured events matching `predicate`
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| predicate(e))
            .count()
    }

    /// # Panics
    ///
    /// Panics when no `event` of `op` was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        assert!(
            self.count(|e| e.is(op, event)) > 0,
            "no {} event captured for op {}",
            event,
            op
        );
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture layer as the global subscriber and return its handle
///
/// Every call returns the same handle. All tests of a binary share one
/// log, so assertions should filter on an operation or field unique to the
/// test.
///
/// ```
/// use notebook_core::logging_facility::test_capture::init_test_capture;
/// use notebook_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("list_interpreters");
/// capture.assert_event_exists("list_interpreters", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let log = EventLog::default();
            tracing_subscriber::registry()
                .with(CaptureLayer { log: log.clone() })
                .try_init()
                .ok();
            TestCapture { log }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(op: &str, event: &str) -> CapturedEvent {
        CapturedEvent {
            level: Level::INFO,
            fields: [(FIELD_OP, op), (FIELD_EVENT, event), (FIELD_ERR_CODE, "ERR_IO")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_event_matching_uses_schema_fields() {
        let captured = event("load_config", "end_error");
        assert!(captured.is("load_config", "end_error"));
        assert!(!captured.is("load_config", "end"));
        assert_eq!(captured.err_code(), Some("ERR_IO"));
        assert_eq!(captured.field("duration_ms"), None);
    }

    #[test]
    fn test_detached_handle_starts_empty() {
        let capture = TestCapture {
            log: EventLog::default(),
        };
        assert_eq!(capture.count(|_| true), 0);
        assert!(capture.events_of("resolve_interpreters", "start").is_empty());
    }
}
