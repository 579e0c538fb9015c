//! WASM bindings for tagbundle-core.
//!
//! Exposes the two bridge operations to an embedding web page. The page
//! constructs an [`AnalyticsInterface`] with two callbacks -- one receiving
//! `(eventName, paramsObject)`, one receiving `(propertyName, value)` -- and
//! its tag-manager glue then calls `logEvent` / `setUserProperty` exactly as
//! it would call a native web-view interface:
//!
//! ```js
//! const analytics = new AnalyticsInterface(
//!   (name, params) => gtag("event", name, params),
//!   (name, value) => gtag("set", "user_properties", { [name]: value }),
//! );
//! analytics.logEvent("purchase", JSON.stringify(params));
//! ```
//!
//! Converted bundles cross the boundary as plain JS objects: nested bundles
//! become objects, typed arrays become JS arrays. Int and long values travel
//! as JS numbers, so longs above 2^53 lose precision on the JS side.
//!
//! Built with `wasm-bindgen-cli` (not wasm-pack):
//!
//! ```sh
//! cargo build -p tagbundle-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/tagbundle_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

use tagbundle_core::{AnalyticsBridge, AnalyticsSink, Bundle, BundleValue};

/// Sink that forwards to the page-provided JS callbacks.
struct JsSink {
    on_event: js_sys::Function,
    on_user_property: js_sys::Function,
}

impl AnalyticsSink for JsSink {
    fn log_event(&mut self, name: &str, params: Bundle) {
        // A throwing callback must not take the bridge down with it.
        let _ = self.on_event.call2(
            &JsValue::NULL,
            &JsValue::from_str(name),
            &bundle_to_js(&params),
        );
    }

    fn set_user_property(&mut self, name: &str, value: &str) {
        let _ = self.on_user_property.call2(
            &JsValue::NULL,
            &JsValue::from_str(name),
            &JsValue::from_str(value),
        );
    }
}

/// The JS-callable analytics interface.
#[wasm_bindgen]
pub struct AnalyticsInterface {
    bridge: AnalyticsBridge<JsSink>,
}

#[wasm_bindgen]
impl AnalyticsInterface {
    /// Create the interface from two sink callbacks:
    /// `onEvent(name, params)` and `onUserProperty(name, value)`.
    #[wasm_bindgen(constructor)]
    pub fn new(on_event: js_sys::Function, on_user_property: js_sys::Function) -> Self {
        Self {
            bridge: AnalyticsBridge::new(JsSink {
                on_event,
                on_user_property,
            }),
        }
    }

    /// Log an event: `jsonParams` is converted to a typed bundle and the
    /// event callback receives `(name, paramsObject)`. Never throws --
    /// unparseable params produce an empty object.
    #[wasm_bindgen(js_name = logEvent)]
    pub fn log_event(&mut self, name: &str, json_params: &str) {
        self.bridge.log_event(name, json_params);
    }

    /// Set a user property: the property callback receives `(name, value)`
    /// unchanged.
    #[wasm_bindgen(js_name = setUserProperty)]
    pub fn set_user_property(&mut self, name: &str, value: &str) {
        self.bridge.set_user_property(name, value);
    }
}

/// Render a bundle as a plain JS object, in key order.
fn bundle_to_js(bundle: &Bundle) -> JsValue {
    let obj = js_sys::Object::new();
    for (key, value) in bundle.iter() {
        // Reflect::set only fails on frozen/proxy targets; this object is ours.
        let _ = js_sys::Reflect::set(&obj, &JsValue::from_str(key), &value_to_js(value));
    }
    obj.into()
}

/// Render one typed value as a JS value.
fn value_to_js(value: &BundleValue) -> JsValue {
    match value {
        BundleValue::String(s) => JsValue::from_str(s),
        BundleValue::Int(i) => JsValue::from_f64(f64::from(*i)),
        BundleValue::Long(l) => JsValue::from_f64(*l as f64),
        BundleValue::Double(d) => JsValue::from_f64(*d),
        BundleValue::Bool(b) => JsValue::from_bool(*b),
        BundleValue::Bundle(b) => bundle_to_js(b),
        BundleValue::StringArray(xs) => collect_js(xs.iter().map(|x| JsValue::from_str(x))),
        BundleValue::IntArray(xs) => collect_js(xs.iter().map(|x| JsValue::from_f64(f64::from(*x)))),
        BundleValue::LongArray(xs) => collect_js(xs.iter().map(|x| JsValue::from_f64(*x as f64))),
        BundleValue::DoubleArray(xs) => collect_js(xs.iter().map(|x| JsValue::from_f64(*x))),
        BundleValue::BoolArray(xs) => collect_js(xs.iter().map(|x| JsValue::from_bool(*x))),
        BundleValue::BundleArray(xs) => collect_js(xs.iter().map(bundle_to_js)),
    }
}

fn collect_js(values: impl Iterator<Item = JsValue>) -> JsValue {
    let arr = js_sys::Array::new();
    for v in values {
        arr.push(&v);
    }
    arr.into()
}
