//! The deprecation traversal.
//!
//! A single depth-first pass over a record: every field's annotation is read
//! once, a warning goes to the sink when the field is annotated and set, and
//! nested records are descended into whether or not their parent field is
//! annotated. Nothing is mutated and nothing is kept between calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::annotation::Deprecation;
use crate::error::ValidationError;
use crate::path::FieldPath;
use crate::record::Record;
use crate::schema::RecordSchema;
use crate::sink::{DeprecationWarning, TracingSink, WarningSink};

// ============================================================================
// POLICY & SUMMARY
// ============================================================================

/// What to do with a deprecation marker that cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationPolicy {
    /// Treat it as absent and keep going.
    #[default]
    Lenient,
    /// Abort the traversal with [`ValidationError::Annotation`].
    Strict,
}

/// Counters from one completed traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    /// Field occurrences visited, nested ones included.
    pub fields_inspected: usize,
    /// Warnings handed to the sink.
    pub warnings_emitted: usize,
}

// ============================================================================
// WALKER
// ============================================================================

/// Traversal state for one validation pass.
///
/// Handed to [`FieldValue::walk_children`](crate::FieldValue::walk_children)
/// so container and record types can descend further.
pub struct Walker<'a> {
    sink: &'a dyn WarningSink,
    policy: AnnotationPolicy,
    summary: ValidationSummary,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(sink: &'a dyn WarningSink, policy: AnnotationPolicy) -> Self {
        Self {
            sink,
            policy,
            summary: ValidationSummary::default(),
        }
    }

    pub(crate) fn finish(self) -> ValidationSummary {
        self.summary
    }

    /// Inspects every field of `record` and descends into nested values.
    pub fn walk_record<R: Record + ?Sized>(
        &mut self,
        record: &R,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        for field in record.fields() {
            let field_path = path.child(field.name());
            self.inspect(field.name(), field.annotation(), &field_path, || {
                field.is_default()
            })?;
            field.value().walk_children(&field_path, self)?;
        }
        Ok(())
    }

    /// Checks one field occurrence and emits its warning if due.
    ///
    /// `is_default` is only evaluated for well-formed annotations.
    pub(crate) fn inspect(
        &mut self,
        name: &str,
        annotation: Option<&str>,
        path: &FieldPath,
        is_default: impl FnOnce() -> bool,
    ) -> Result<(), ValidationError> {
        self.summary.fields_inspected += 1;

        let Some(raw) = annotation else {
            return Ok(());
        };
        let Some(deprecation) = self.resolve(raw, path)? else {
            return Ok(());
        };
        if is_default() {
            return Ok(());
        }

        self.sink.warn(&DeprecationWarning {
            path,
            field: name,
            deprecation: &deprecation,
        });
        self.summary.warnings_emitted += 1;
        Ok(())
    }

    fn resolve(
        &self,
        raw: &str,
        path: &FieldPath,
    ) -> Result<Option<Deprecation>, ValidationError> {
        match Deprecation::parse(raw) {
            Ok(deprecation) => Ok(Some(deprecation)),
            Err(source) => match self.policy {
                AnnotationPolicy::Strict => Err(ValidationError::Annotation {
                    path: path.clone(),
                    source,
                }),
                AnnotationPolicy::Lenient => {
                    tracing::debug!(%path, annotation = raw, error = %source, "ignoring malformed deprecation annotation");
                    Ok(None)
                }
            },
        }
    }
}

impl std::fmt::Debug for Walker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("policy", &self.policy)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Stateless deprecation validator bound to a sink and a policy.
///
/// # Examples
///
/// ```rust
/// use depwarn::{CollectingSink, DeprecationValidator, Record};
///
/// #[derive(Record)]
/// struct Config {
///     #[deprecation(replaced = "listen")]
///     port: u16,
///     listen: String,
/// }
///
/// let sink = CollectingSink::new();
/// let validator = DeprecationValidator::new(&sink);
/// let summary = validator
///     .validate(&Config { port: 8080, listen: String::new() }, "config")
///     .unwrap();
///
/// assert_eq!(summary.warnings_emitted, 1);
/// assert_eq!(sink.warnings()[0].path, "config.port");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeprecationValidator<S = TracingSink> {
    sink: S,
    policy: AnnotationPolicy,
}

impl<S: WarningSink> DeprecationValidator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            policy: AnnotationPolicy::default(),
        }
    }

    /// Sets the malformed-annotation policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_policy(mut self, policy: AnnotationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AnnotationPolicy {
        self.policy
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Validates a typed record.
    pub fn validate<R: Record + ?Sized>(
        &self,
        record: &R,
        path: &str,
    ) -> Result<ValidationSummary, ValidationError> {
        let root = FieldPath::from(path);
        let _span = tracing::debug_span!("deprecations", record = record.descriptor().name(), path = %root).entered();

        let mut walker = Walker::new(&self.sink, self.policy);
        walker.walk_record(record, &root)?;
        let summary = walker.finish();

        tracing::debug!(
            fields = summary.fields_inspected,
            warnings = summary.warnings_emitted,
            "deprecation scan complete"
        );
        Ok(summary)
    }

    /// Validates a dynamic document against a schema.
    pub fn validate_document(
        &self,
        schema: &RecordSchema,
        document: &Value,
        path: &str,
    ) -> Result<ValidationSummary, ValidationError> {
        let root = FieldPath::from(path);
        let _span = tracing::debug_span!("deprecations", path = %root).entered();

        let mut walker = Walker::new(&self.sink, self.policy);
        walker.walk_document(schema, document, &root)?;
        let summary = walker.finish();

        tracing::debug!(
            fields = summary.fields_inspected,
            warnings = summary.warnings_emitted,
            "deprecation scan complete"
        );
        Ok(summary)
    }
}

/// Validates `record`, reporting deprecated fields that hold a value to
/// `logger`.
///
/// Malformed annotations are ignored. Succeeds however many warnings were
/// emitted.
pub fn validate<R, S>(record: &R, path: &str, logger: &S) -> Result<(), ValidationError>
where
    R: Record + ?Sized,
    S: WarningSink + ?Sized,
{
    DeprecationValidator::new(logger)
        .validate(record, path)
        .map(|_| ())
}

/// Validates a dynamic document; see [`validate`].
pub fn validate_document<S>(
    schema: &RecordSchema,
    document: &Value,
    path: &str,
    logger: &S,
) -> Result<(), ValidationError>
where
    S: WarningSink + ?Sized,
{
    DeprecationValidator::new(logger)
        .validate_document(schema, document, path)
        .map(|_| ())
}
