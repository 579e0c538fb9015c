//! Error types for the strict conversion boundary.

use thiserror::Error;

/// Errors that can occur when building a bundle from JSON text.
///
/// Only the strict entry point ([`crate::try_bundle_from_json`]) surfaces
/// these; the lenient bridge path recovers by emitting an empty bundle.
#[derive(Error, Debug)]
pub enum BundleError {
    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The top-level JSON value was not an object. Carries the name of the
    /// type actually found (`"array"`, `"string"`, ...).
    #[error("top-level JSON value must be an object, found {0}")]
    NotAnObject(&'static str),
}

/// Convenience alias used throughout tagbundle-core.
pub type Result<T> = std::result::Result<T, BundleError>;
