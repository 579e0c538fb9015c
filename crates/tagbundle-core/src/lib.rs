//! # tagbundle-core
//!
//! Converts arbitrary JSON parameter documents into strongly-typed,
//! order-preserving **parameter bundles** for analytics backends that do not
//! understand JSON themselves.
//!
//! The interesting part is one recursive algorithm: a depth-first walk over a
//! parsed JSON object that infers, per field, one of a small closed set of
//! typed representations -- scalars, nested bundles, and homogeneous typed
//! arrays whose form is chosen from the array's **first element only**.
//! Nulls and empty arrays are dropped, unrepresentable shapes are dropped
//! and noted, and conversion never fails: telemetry is never blocked by bad
//! parameter data.
//!
//! ## Quick start
//!
//! ```rust
//! use tagbundle_core::bundle_from_json;
//!
//! let bundle = bundle_from_json(r#"{"currency":"AUD","value":29.98,"tags":["a","b"]}"#);
//! assert_eq!(bundle.get_string("currency"), Some("AUD"));
//! assert_eq!(bundle.get_double("value"), Some(29.98));
//! ```
//!
//! ## Modules
//!
//! - [`convert`] — JSON document → [`Bundle`] conversion
//! - [`bundle`] — the typed container and its value enum
//! - [`bridge`] — `logEvent` / `setUserProperty` entry points over an
//!   [`AnalyticsSink`]
//! - [`diagnostics`] — injected observer for dropped keys/elements
//! - [`error`] — error types for the strict parse boundary

pub mod bridge;
pub mod bundle;
pub mod convert;
pub mod diagnostics;
pub mod error;

pub use bridge::{AnalyticsBridge, AnalyticsSink};
pub use bundle::{Bundle, BundleValue};
pub use convert::{
    bundle_from_json, bundle_from_json_with, convert, convert_with, try_bundle_from_json,
};
pub use diagnostics::{Diagnostics, LogDiagnostics, NoopDiagnostics, Skip};
pub use error::BundleError;
