//! JSON document → typed bundle conversion.
//!
//! The converter walks a parsed JSON object depth-first and builds a
//! [`Bundle`] bottom-up. Per key:
//!
//! - objects recurse into nested bundles
//! - arrays are typed by their **first element only** and read uniformly
//!   into one homogeneous array form
//! - scalars map to the matching typed scalar (string before number before
//!   bool)
//! - `null` values and empty arrays are silently dropped
//!
//! The first-element array policy is deliberate: homogeneity of input arrays
//! is an implicit precondition, not enforced. A later element that does not
//! read as the chosen type is dropped individually and noted through
//! [`Diagnostics`].
//!
//! Conversion never fails. The strict boundary [`try_bundle_from_json`]
//! reports parse errors for callers that want them (the CLI); the lenient
//! boundary [`bundle_from_json`] recovers with an empty bundle so the
//! downstream analytics call still goes out.

use serde_json::{Map, Value};

use crate::bundle::{Bundle, BundleValue};
use crate::diagnostics::{Diagnostics, NoopDiagnostics, Skip};
use crate::error::{BundleError, Result};

/// Convert a parsed JSON object into a typed bundle.
///
/// Pure and infallible: unrepresentable values are dropped, everything else
/// is converted. Key order in the bundle mirrors the source object order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tagbundle_core::convert;
///
/// let doc = json!({"currency": "AUD", "value": 0, "note": null});
/// let bundle = convert(doc.as_object().unwrap());
/// assert_eq!(bundle.get_string("currency"), Some("AUD"));
/// assert_eq!(bundle.get_int("value"), Some(0));
/// assert!(!bundle.contains_key("note"));
/// ```
pub fn convert(params: &Map<String, Value>) -> Bundle {
    convert_with(params, &NoopDiagnostics)
}

/// Convert a parsed JSON object, reporting dropped keys and elements to the
/// given observer.
pub fn convert_with(params: &Map<String, Value>, diag: &dyn Diagnostics) -> Bundle {
    let mut bundle = Bundle::new();
    for (key, value) in params {
        convert_entry(&mut bundle, key, value, diag);
    }
    bundle
}

/// Parse JSON text and convert it, requiring a top-level object.
///
/// # Errors
///
/// Returns [`BundleError::JsonParse`] for invalid JSON and
/// [`BundleError::NotAnObject`] when the document parses to anything other
/// than an object.
pub fn try_bundle_from_json(json: &str) -> Result<Bundle> {
    let value: Value = serde_json::from_str(json)?;
    match value.as_object() {
        Some(map) => Ok(convert(map)),
        None => Err(BundleError::NotAnObject(json_type_name(&value))),
    }
}

/// Parse JSON text and convert it, degrading to an empty bundle on failure.
///
/// This is the bridge-facing boundary: an analytics call must never be
/// blocked by bad parameter text, so any parse failure (or non-object top
/// level) yields an empty bundle and the event is still emitted.
pub fn bundle_from_json(json: &str) -> Bundle {
    bundle_from_json_with(json, &NoopDiagnostics)
}

/// Lenient boundary with an observer for the failure note.
pub fn bundle_from_json_with(json: &str, diag: &dyn Diagnostics) -> Bundle {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => convert_with(&map, diag),
        Ok(other) => {
            diag.parse_failure(&BundleError::NotAnObject(json_type_name(&other)));
            Bundle::new()
        }
        Err(err) => {
            diag.parse_failure(&BundleError::JsonParse(err));
            Bundle::new()
        }
    }
}

/// Dispatch a single object entry. Exhaustive over the JSON value set, so an
/// unhandled shape is a compile error rather than a silent fall-through.
fn convert_entry(bundle: &mut Bundle, key: &str, value: &Value, diag: &dyn Diagnostics) {
    match value {
        Value::Object(map) => {
            bundle.put_bundle(key, convert_with(map, diag));
        }
        Value::Array(arr) => {
            convert_array_entry(bundle, key, arr, diag);
        }
        // Scalar precedence: string before number before bool.
        Value::String(s) => bundle.put_string(key, s.clone()),
        Value::Number(n) => bundle.insert(key, convert_number(n)),
        Value::Bool(b) => bundle.put_bool(key, *b),
        Value::Null => diag.skipped(Skip::Null { key }),
    }
}

/// Type an array by its first element and read every element into that form.
///
/// Empty arrays produce no entry. A first element with no typed-array
/// representation (an inner array, or null) drops the whole key. Elements
/// after the first that fail the chosen reader are dropped individually.
fn convert_array_entry(bundle: &mut Bundle, key: &str, arr: &[Value], diag: &dyn Diagnostics) {
    let Some(first) = arr.first() else {
        diag.skipped(Skip::EmptyArray { key });
        return;
    };

    let value = match first {
        Value::Object(_) => BundleValue::BundleArray(read_elements(key, arr, diag, |v| {
            v.as_object().map(|map| convert_with(map, diag))
        })),
        Value::String(_) => {
            BundleValue::StringArray(read_elements(key, arr, diag, read_string))
        }
        Value::Number(n) if n.is_f64() => {
            BundleValue::DoubleArray(read_elements(key, arr, diag, read_double))
        }
        Value::Number(n) if fits_int(n) => {
            BundleValue::IntArray(read_elements(key, arr, diag, read_int))
        }
        Value::Number(_) => BundleValue::LongArray(read_elements(key, arr, diag, read_long)),
        Value::Bool(_) => BundleValue::BoolArray(read_elements(key, arr, diag, read_bool)),
        // Arrays of arrays (and a leading null) have no bundle representation.
        Value::Array(_) | Value::Null => {
            diag.skipped(Skip::UnsupportedArray { key });
            return;
        }
    };
    bundle.insert(key, value);
}

/// Run the per-element reader chosen from the first element over the whole
/// array, noting and skipping elements the reader rejects.
fn read_elements<T>(
    key: &str,
    arr: &[Value],
    diag: &dyn Diagnostics,
    read: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    let mut out = Vec::with_capacity(arr.len());
    for (index, element) in arr.iter().enumerate() {
        match read(element) {
            Some(v) => out.push(v),
            None => diag.skipped(Skip::Element { key, index }),
        }
    }
    out
}

/// Map a JSON number to a typed scalar.
///
/// Width rule: an integer-tagged number is `Int` iff it fits `i32`, `Long`
/// for the rest of the `i64` range. Float-tagged numbers are always `Double`,
/// as are `u64` values above `i64::MAX` (the backend has no unsigned slot).
fn convert_number(n: &serde_json::Number) -> BundleValue {
    if let Some(i) = n.as_i64() {
        match i32::try_from(i) {
            Ok(i) => BundleValue::Int(i),
            Err(_) => BundleValue::Long(i),
        }
    } else {
        // f64-tagged, or u64 beyond i64::MAX.
        BundleValue::Double(n.as_f64().unwrap_or(0.0))
    }
}

/// True if an integer-tagged number fits the native `int` slot.
fn fits_int(n: &serde_json::Number) -> bool {
    n.as_i64().is_some_and(|i| i32::try_from(i).is_ok())
}

/// Read any scalar as a string: strings as-is, numbers and bools rendered.
/// Composite values and nulls do not coerce.
fn read_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a number (or numeric string) as `i32`, truncating fractions.
fn read_int(v: &Value) -> Option<i32> {
    read_long(v).and_then(|l| i32::try_from(l).ok())
}

/// Read a number (or numeric string) as `i64`, truncating fractions.
fn read_long(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64().and_then(f64_to_i64)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(f64_to_i64))
        }
        _ => None,
    }
}

/// Read a number (or numeric string) as `f64`.
fn read_double(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Read a bool, accepting `"true"`/`"false"` strings case-insensitively.
fn read_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// Truncate a finite float to `i64` if it is in range.
fn f64_to_i64(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Name of a JSON value's type, for error messages.
fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
