//! Bridge tests: the logEvent / setUserProperty entry points over a
//! recording sink, including the degradation path for unparseable params.

use std::cell::RefCell;

use tagbundle_core::{
    AnalyticsBridge, AnalyticsSink, Bundle, BundleError, Diagnostics, Skip,
};

/// Sink that records everything it receives.
#[derive(Default)]
struct RecordingSink {
    events: Vec<(String, Bundle)>,
    properties: Vec<(String, String)>,
}

impl AnalyticsSink for RecordingSink {
    fn log_event(&mut self, name: &str, params: Bundle) {
        self.events.push((name.to_string(), params));
    }

    fn set_user_property(&mut self, name: &str, value: &str) {
        self.properties.push((name.to_string(), value.to_string()));
    }
}

/// Observer that records every note. Interior mutability because the
/// Diagnostics trait takes `&self`.
#[derive(Default)]
struct RecordingDiagnostics {
    skipped_keys: RefCell<Vec<String>>,
    parse_failures: RefCell<usize>,
}

impl Diagnostics for RecordingDiagnostics {
    fn skipped(&self, skip: Skip<'_>) {
        let key = match skip {
            Skip::Null { key }
            | Skip::EmptyArray { key }
            | Skip::UnsupportedArray { key }
            | Skip::Element { key, .. } => key,
        };
        self.skipped_keys.borrow_mut().push(key.to_string());
    }

    fn parse_failure(&self, _err: &BundleError) {
        *self.parse_failures.borrow_mut() += 1;
    }
}

#[test]
fn log_event_converts_and_forwards() {
    let mut bridge = AnalyticsBridge::new(RecordingSink::default());
    bridge.log_event("purchase", r#"{"currency":"AUD","value":29.98}"#);

    let sink = bridge.into_sink();
    assert_eq!(sink.events.len(), 1);
    let (name, bundle) = &sink.events[0];
    assert_eq!(name, "purchase");
    assert_eq!(bundle.get_string("currency"), Some("AUD"));
    assert_eq!(bundle.get_double("value"), Some(29.98));
}

#[test]
fn log_event_with_invalid_json_still_emits() {
    // Never block telemetry: the event goes out with an empty bundle.
    let mut bridge = AnalyticsBridge::new(RecordingSink::default());
    bridge.log_event("purchase", "not json {{{");

    let sink = bridge.into_sink();
    assert_eq!(sink.events.len(), 1);
    assert_eq!(sink.events[0].0, "purchase");
    assert!(sink.events[0].1.is_empty());
}

#[test]
fn log_event_with_non_object_params_still_emits() {
    let mut bridge = AnalyticsBridge::new(RecordingSink::default());
    bridge.log_event("view_item", "[1,2,3]");

    let sink = bridge.into_sink();
    assert_eq!(sink.events.len(), 1);
    assert!(sink.events[0].1.is_empty());
}

#[test]
fn log_event_ignores_empty_name() {
    let mut bridge = AnalyticsBridge::new(RecordingSink::default());
    bridge.log_event("", r#"{"value":1}"#);
    assert!(bridge.sink().events.is_empty());
}

#[test]
fn set_user_property_is_a_passthrough() {
    let mut bridge = AnalyticsBridge::new(RecordingSink::default());
    bridge.set_user_property("favourite_team", "hawks");

    let sink = bridge.into_sink();
    assert_eq!(
        sink.properties,
        vec![("favourite_team".to_string(), "hawks".to_string())]
    );
}

#[test]
fn set_user_property_ignores_empty_name_or_value() {
    let mut bridge = AnalyticsBridge::new(RecordingSink::default());
    bridge.set_user_property("", "value");
    bridge.set_user_property("name", "");
    assert!(bridge.sink().properties.is_empty());
}

#[test]
fn diagnostics_receive_parse_failures_and_skips() {
    let diag = RecordingDiagnostics::default();
    let mut bridge = AnalyticsBridge::with_diagnostics(RecordingSink::default(), &diag);

    bridge.log_event("broken", "not json");
    bridge.log_event("lossy", r#"{"a":null,"b":[],"c":[[1]],"d":1}"#);

    // Both events still reached the sink.
    assert_eq!(bridge.sink().events.len(), 2);
    let bundle = &bridge.sink().events[1].1;
    assert_eq!(bundle.get_int("d"), Some(1));
    assert_eq!(bundle.len(), 1);

    assert_eq!(*diag.parse_failures.borrow(), 1);
    assert_eq!(*diag.skipped_keys.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn recording_diagnostics_sees_each_drop_reason() {
    let diag = RecordingDiagnostics::default();
    let doc: serde_json::Value =
        serde_json::from_str(r#"{"a":null,"b":[],"c":[[1]],"d":[1,"x"],"e":1}"#).unwrap();
    let bundle = tagbundle_core::convert_with(doc.as_object().unwrap(), &diag);

    assert_eq!(bundle.len(), 2); // d (partial) and e survive
    let skipped = diag.skipped_keys.borrow();
    assert_eq!(*skipped, vec!["a", "b", "c", "d"]);
    assert_eq!(*diag.parse_failures.borrow(), 0);
}
