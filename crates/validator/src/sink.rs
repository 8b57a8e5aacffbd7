//! Warning sinks: where deprecation warnings go.
//!
//! The validator never owns a logger. It is handed a [`WarningSink`] and
//! issues one fire-and-forget `warn` call per deprecated field that holds a
//! value. Filtering, formatting and delivery belong to the sink.

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::annotation::Deprecation;
use crate::path::FieldPath;

/// Tracing target of every emitted warning.
pub const WARNING_TARGET: &str = "depwarn";

/// One deprecated field found holding a value.
#[derive(Debug, Clone, Copy)]
pub struct DeprecationWarning<'a> {
    /// Full path of the field.
    pub path: &'a FieldPath,
    /// Declared field name.
    pub field: &'a str,
    /// The parsed annotation.
    pub deprecation: &'a Deprecation,
}

impl DeprecationWarning<'_> {
    /// The verbatim warning text.
    pub fn message(&self) -> Cow<'static, str> {
        self.deprecation.message()
    }
}

/// Capability for receiving warn-level deprecation messages.
///
/// Implementations must not fail the caller: delivery problems are the
/// sink's own concern.
pub trait WarningSink {
    fn warn(&self, warning: &DeprecationWarning<'_>);
}

impl<S: WarningSink + ?Sized> WarningSink for &S {
    fn warn(&self, warning: &DeprecationWarning<'_>) {
        (**self).warn(warning);
    }
}

impl<S: WarningSink + ?Sized> WarningSink for Box<S> {
    fn warn(&self, warning: &DeprecationWarning<'_>) {
        (**self).warn(warning);
    }
}

impl<S: WarningSink + ?Sized> WarningSink for Arc<S> {
    fn warn(&self, warning: &DeprecationWarning<'_>) {
        (**self).warn(warning);
    }
}

// ============================================================================
// TRACING
// ============================================================================

/// Emits each warning as a `tracing` event on the current dispatcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl WarningSink for TracingSink {
    fn warn(&self, warning: &DeprecationWarning<'_>) {
        tracing::warn!(
            target: WARNING_TARGET,
            path = %warning.path,
            field = warning.field,
            replacement = warning.deprecation.replacement(),
            "{}",
            warning.message()
        );
    }
}

/// Emits into an injected dispatcher instead of the ambient one.
impl WarningSink for tracing::Dispatch {
    fn warn(&self, warning: &DeprecationWarning<'_>) {
        tracing::dispatcher::with_default(self, || TracingSink.warn(warning));
    }
}

// ============================================================================
// CLOSURES
// ============================================================================

/// Adapts a closure into a sink.
///
/// ```rust
/// use depwarn::{FnSink, WarningSink};
///
/// let sink = FnSink(|warning: &depwarn::DeprecationWarning<'_>| {
///     eprintln!("{}: {}", warning.path, warning.message());
/// });
/// # let _ = &sink as &dyn WarningSink;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnSink<F>(pub F);

impl<F> WarningSink for FnSink<F>
where
    F: Fn(&DeprecationWarning<'_>),
{
    fn warn(&self, warning: &DeprecationWarning<'_>) {
        (self.0)(warning);
    }
}

// ============================================================================
// COLLECTING
// ============================================================================

/// An owned copy of a warning, as kept by [`CollectingSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedWarning {
    pub path: String,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    pub message: String,
}

impl From<&DeprecationWarning<'_>> for CollectedWarning {
    fn from(warning: &DeprecationWarning<'_>) -> Self {
        Self {
            path: warning.path.as_str().to_owned(),
            field: warning.field.to_owned(),
            replacement: warning.deprecation.replacement().map(str::to_owned),
            message: warning.message().into_owned(),
        }
    }
}

/// Keeps every warning in memory, in emission order.
///
/// Safe to share between threads; each `warn` call takes the lock once.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Mutex<Vec<CollectedWarning>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected warnings.
    pub fn warnings(&self) -> Vec<CollectedWarning> {
        self.warnings.lock().clone()
    }

    /// Just the message texts, in order.
    pub fn messages(&self) -> Vec<String> {
        self.warnings
            .lock()
            .iter()
            .map(|warning| warning.message.clone())
            .collect()
    }

    /// Drains the collected warnings.
    pub fn take(&self) -> Vec<CollectedWarning> {
        std::mem::take(&mut *self.warnings.lock())
    }

    pub fn len(&self) -> usize {
        self.warnings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.lock().is_empty()
    }
}

impl WarningSink for CollectingSink {
    fn warn(&self, warning: &DeprecationWarning<'_>) {
        self.warnings.lock().push(CollectedWarning::from(warning));
    }
}
