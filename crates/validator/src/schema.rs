//! Runtime schemas for dynamic documents.
//!
//! When the record shape is only known at runtime (a YAML or JSON config
//! file), the field table is a [`RecordSchema`], registered in code or loaded
//! from a schema file:
//!
//! ```yaml
//! fields:
//!   port:
//!     deprecated: replaced,listen
//!   listen: {}
//!   tls:
//!     nested:
//!       record:
//!         fields:
//!           ciphers:
//!             deprecated: removed
//!   upstreams:
//!     nested:
//!       sequence:
//!         fields:
//!           weight:
//!             deprecated: removed
//! ```
//!
//! Documents are `serde_json::Value`s. Keys absent from the document count as
//! default; keys absent from the schema are ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::annotation::{AnnotationError, Deprecation};
use crate::error::{SchemaError, ValidationError};
use crate::path::FieldPath;
use crate::validator::Walker;
use crate::value::{json_is_default, json_kind};

// ============================================================================
// SCHEMA TYPES
// ============================================================================

/// Field table of one record shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSchema {
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: IndexMap<String, FieldSchema>,
}

/// Metadata of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSchema {
    /// Raw deprecation marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,

    /// Shape of nested records held by this field.
    ///
    /// Written as a single-key map (`record: {..}`) in both JSON and YAML.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_yaml::with::singleton_map"
    )]
    pub nested: Option<Nested>,
}

/// How a field holds nested records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nested {
    /// A single nested record.
    Record(RecordSchema),
    /// A sequence of records.
    Sequence(RecordSchema),
    /// A string-keyed collection of records.
    Map(RecordSchema),
}

impl Nested {
    fn expected(&self) -> &'static str {
        match self {
            Self::Record(_) => "record",
            Self::Sequence(_) => "sequence",
            Self::Map(_) => "map",
        }
    }

    fn schema(&self) -> &RecordSchema {
        match self {
            Self::Record(schema) | Self::Sequence(schema) | Self::Map(schema) => schema,
        }
    }
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field; later registrations of the same name replace
    /// earlier ones in place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn from_json_str(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Every malformed annotation in this schema and below, with its path.
    pub fn check_annotations(&self) -> Vec<(FieldPath, AnnotationError)> {
        let mut problems = Vec::new();
        self.collect_annotation_errors(&FieldPath::root(), &mut problems);
        problems
    }

    fn collect_annotation_errors(
        &self,
        path: &FieldPath,
        problems: &mut Vec<(FieldPath, AnnotationError)>,
    ) {
        for (name, field) in &self.fields {
            let field_path = path.child(name);
            if let Some(Err(error)) = field.deprecation() {
                problems.push((field_path.clone(), error));
            }
            if let Some(nested) = &field.nested {
                nested
                    .schema()
                    .collect_annotation_errors(&field_path, problems);
            }
        }
    }
}

impl FieldSchema {
    /// An unannotated scalar field.
    pub fn scalar() -> Self {
        Self::default()
    }

    /// A field holding one nested record.
    pub fn record(schema: RecordSchema) -> Self {
        Self::nested(Nested::Record(schema))
    }

    /// A field holding a sequence of records.
    pub fn sequence(schema: RecordSchema) -> Self {
        Self::nested(Nested::Sequence(schema))
    }

    /// A field holding a keyed collection of records.
    pub fn map(schema: RecordSchema) -> Self {
        Self::nested(Nested::Map(schema))
    }

    fn nested(nested: Nested) -> Self {
        Self {
            deprecated: None,
            nested: Some(nested),
        }
    }

    /// Attaches a raw deprecation marker.
    #[must_use]
    pub fn deprecated(mut self, annotation: impl Into<String>) -> Self {
        self.deprecated = Some(annotation.into());
        self
    }

    /// Parses the marker, if any.
    pub fn deprecation(&self) -> Option<Result<Deprecation, AnnotationError>> {
        self.deprecated.as_deref().map(Deprecation::parse)
    }
}

// ============================================================================
// TRAVERSAL
// ============================================================================

impl Walker<'_> {
    /// Walks a document whose root must be a JSON object.
    pub(crate) fn walk_document(
        &mut self,
        schema: &RecordSchema,
        document: &Value,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        let Value::Object(object) = document else {
            return Err(ValidationError::NotARecord {
                path: path.clone(),
                found: json_kind(document),
            });
        };
        self.walk_object(schema, object, path)
    }

    fn walk_object(
        &mut self,
        schema: &RecordSchema,
        object: &Map<String, Value>,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        for (name, field) in &schema.fields {
            let field_path = path.child(name);
            let value = object.get(name);

            self.inspect(name, field.deprecated.as_deref(), &field_path, || {
                value.is_none_or(json_is_default)
            })?;

            if let (Some(nested), Some(value)) = (&field.nested, value) {
                self.descend(nested, value, &field_path)?;
            }
        }
        Ok(())
    }

    fn descend(
        &mut self,
        nested: &Nested,
        value: &Value,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        match (nested, value) {
            (_, Value::Null) => Ok(()),
            (Nested::Record(schema), Value::Object(object)) => {
                self.walk_object(schema, object, path)
            }
            (Nested::Sequence(schema), Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    self.descend_element(schema, item, &path.index(index))?;
                }
                Ok(())
            }
            (Nested::Map(schema), Value::Object(entries)) => {
                for (key, entry) in entries {
                    self.descend_element(schema, entry, &path.key(key))?;
                }
                Ok(())
            }
            (nested, other) => Err(ValidationError::ShapeMismatch {
                path: path.clone(),
                expected: nested.expected(),
                found: json_kind(other),
            }),
        }
    }

    fn descend_element(
        &mut self,
        schema: &RecordSchema,
        element: &Value,
        path: &FieldPath,
    ) -> Result<(), ValidationError> {
        match element {
            Value::Null => Ok(()),
            Value::Object(object) => self.walk_object(schema, object, path),
            other => Err(ValidationError::ShapeMismatch {
                path: path.clone(),
                expected: "record",
                found: json_kind(other),
            }),
        }
    }
}
