//! The two host-facing entry points, wired to an external analytics sink.
//!
//! An embedding layer (web view message channel, WASM export, test harness)
//! calls [`AnalyticsBridge::log_event`] with an event name plus raw JSON
//! parameter text, or [`AnalyticsBridge::set_user_property`] with a plain
//! key/value pair. The bridge converts parameters through the lenient
//! boundary and forwards the result to the [`AnalyticsSink`]. Neither call
//! can fail: a parse failure still emits the event, with an empty bundle.

use crate::bundle::Bundle;
use crate::convert::bundle_from_json_with;
use crate::diagnostics::{Diagnostics, LogDiagnostics};

/// The external analytics backend. Receives fully converted bundles and
/// user-property pairs; never sees JSON.
pub trait AnalyticsSink {
    /// Record an event with its typed parameters.
    fn log_event(&mut self, name: &str, params: Bundle);

    /// Set a single string-valued user property.
    fn set_user_property(&mut self, name: &str, value: &str);
}

/// Owns a sink and a diagnostics observer; exposes the two bridge
/// operations.
///
/// The default observer is [`LogDiagnostics`], so conversion notes show up
/// under any attached `tracing` subscriber and cost nothing otherwise.
pub struct AnalyticsBridge<S, D = LogDiagnostics> {
    sink: S,
    diagnostics: D,
}

impl<S: AnalyticsSink> AnalyticsBridge<S> {
    /// Create a bridge with the default tracing-backed diagnostics.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            diagnostics: LogDiagnostics,
        }
    }
}

impl<S: AnalyticsSink, D: Diagnostics> AnalyticsBridge<S, D> {
    /// Create a bridge with a custom diagnostics observer.
    pub fn with_diagnostics(sink: S, diagnostics: D) -> Self {
        Self { sink, diagnostics }
    }

    /// Convert `json_params` and forward `(name, bundle)` to the sink.
    ///
    /// Calls with an empty event name are ignored, matching the host glue
    /// this bridge replaces. Invalid JSON forwards an empty bundle -- the
    /// event still goes out, just without parameters.
    pub fn log_event(&mut self, name: &str, json_params: &str) {
        if name.is_empty() {
            return;
        }
        tracing::debug!(event = name, params = json_params, "logEvent");
        let bundle = bundle_from_json_with(json_params, &self.diagnostics);
        self.sink.log_event(name, bundle);
    }

    /// Forward a user property to the sink as-is. No conversion.
    ///
    /// Calls with an empty name or empty value are ignored.
    pub fn set_user_property(&mut self, name: &str, value: &str) {
        if name.is_empty() || value.is_empty() {
            return;
        }
        tracing::debug!(property = name, value, "setUserProperty");
        self.sink.set_user_property(name, value);
    }

    /// Borrow the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the bridge, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
