//! Typed parameter bundle -- the order-preserving container handed to the
//! analytics sink.
//!
//! A [`Bundle`] maps unique string keys to [`BundleValue`]s. Keys keep their
//! insertion order, mirroring the source JSON object order so conversions are
//! deterministic and easy to assert on in tests. Values are drawn from a closed
//! set: five scalars, a nested bundle, and six homogeneous array forms. Nothing
//! reachable from a bundle is ever a raw JSON node.

/// A single typed value stored in a [`Bundle`].
///
/// `Int` holds numbers that fit a native `i32`; `Long` holds the rest of the
/// 64-bit integer range. Array variants are homogeneous by construction --
/// the converter picks one array form per key and every element is read into
/// that form.
#[derive(Debug, Clone, PartialEq)]
pub enum BundleValue {
    String(String),
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
    /// Nested parameter bundle (converted JSON object).
    Bundle(Bundle),
    StringArray(Vec<String>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    BoolArray(Vec<bool>),
    /// Array of nested bundles (converted JSON object array).
    BundleArray(Vec<Bundle>),
}

impl BundleValue {
    /// Short lowercase name of the variant, used in diagnostics and the CLI
    /// rendering (`string`, `int`, `bundle[]`, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            BundleValue::String(_) => "string",
            BundleValue::Int(_) => "int",
            BundleValue::Long(_) => "long",
            BundleValue::Double(_) => "double",
            BundleValue::Bool(_) => "bool",
            BundleValue::Bundle(_) => "bundle",
            BundleValue::StringArray(_) => "string[]",
            BundleValue::IntArray(_) => "int[]",
            BundleValue::LongArray(_) => "long[]",
            BundleValue::DoubleArray(_) => "double[]",
            BundleValue::BoolArray(_) => "bool[]",
            BundleValue::BundleArray(_) => "bundle[]",
        }
    }
}

/// An ordered mapping from unique string keys to typed values.
///
/// Backed by a `Vec` of pairs rather than a hash map so iteration order is
/// exactly insertion order. Lookup is linear, which is fine for the small
/// parameter sets analytics events carry.
///
/// Re-inserting an existing key replaces the value in place, keeping the key's
/// original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bundle {
    entries: Vec<(String, BundleValue)>,
}

impl Bundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under `key`. If the key already exists its value is
    /// replaced and the key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: BundleValue) {
        let key = key.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, BundleValue::String(value.into()));
    }

    pub fn put_int(&mut self, key: impl Into<String>, value: i32) {
        self.insert(key, BundleValue::Int(value));
    }

    pub fn put_long(&mut self, key: impl Into<String>, value: i64) {
        self.insert(key, BundleValue::Long(value));
    }

    pub fn put_double(&mut self, key: impl Into<String>, value: f64) {
        self.insert(key, BundleValue::Double(value));
    }

    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) {
        self.insert(key, BundleValue::Bool(value));
    }

    pub fn put_bundle(&mut self, key: impl Into<String>, value: Bundle) {
        self.insert(key, BundleValue::Bundle(value));
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a string value; `None` if absent or of another type.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(BundleValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key) {
            Some(BundleValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(BundleValue::Long(l)) => Some(*l),
            _ => None,
        }
    }

    pub fn get_double(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(BundleValue::Double(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(BundleValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Look up a nested bundle; `None` if absent or of another type.
    pub fn get_bundle(&self, key: &str) -> Option<&Bundle> {
        match self.get(key) {
            Some(BundleValue::Bundle(b)) => Some(b),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BundleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}
