//! Conversion diagnostics -- an injected observer for dropped parameters.
//!
//! The converter never fails and never blocks an analytics call, so every
//! lossy decision (null key, empty array, unsupported array head, unreadable
//! element) is reported through this trait instead. The default observer is a
//! no-op; [`LogDiagnostics`] routes notes to the `tracing` facade for builds
//! that attach a subscriber.

use crate::error::BundleError;

/// Why a key or array element was left out of the produced bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip<'a> {
    /// The key's value was JSON `null`.
    Null { key: &'a str },
    /// The key's value was an empty array.
    EmptyArray { key: &'a str },
    /// The array's first element had no typed-array representation
    /// (an array of arrays, or a leading null). The whole key is dropped.
    UnsupportedArray { key: &'a str },
    /// A single element could not be read into the array form chosen from
    /// the first element. Only that element is dropped.
    Element { key: &'a str, index: usize },
}

/// Observer for lossy conversion decisions.
///
/// All methods have no-op defaults so implementations only override what they
/// care about. Methods take `&self`; recording observers use interior
/// mutability.
pub trait Diagnostics {
    /// A key or array element was omitted from the output.
    fn skipped(&self, _skip: Skip<'_>) {}

    /// The JSON text handed to the lenient boundary failed to parse; an
    /// empty bundle is being forwarded in its place.
    fn parse_failure(&self, _err: &BundleError) {}
}

/// Borrowed observers work anywhere an owned one does, so a caller can keep
/// hold of a recording observer while the bridge uses it.
impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn skipped(&self, skip: Skip<'_>) {
        (**self).skipped(skip);
    }

    fn parse_failure(&self, err: &BundleError) {
        (**self).parse_failure(err);
    }
}

/// The default observer: discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {}

/// Routes conversion notes to `tracing`: skips at debug level, parse failures
/// at warn. Carries no state and costs nothing unless a subscriber is
/// attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn skipped(&self, skip: Skip<'_>) {
        match skip {
            Skip::Null { key } => tracing::debug!(key, "skipping null value"),
            Skip::EmptyArray { key } => tracing::debug!(key, "skipping empty array"),
            Skip::UnsupportedArray { key } => {
                tracing::debug!(key, "unhandled array type, dropping key")
            }
            Skip::Element { key, index } => {
                tracing::debug!(key, index, "unreadable array element, dropping it")
            }
        }
    }

    fn parse_failure(&self, err: &BundleError) {
        tracing::warn!(error = %err, "error parsing JSON params, forwarding empty bundle");
    }
}
