//! Error types for traversal and schema loading.
//!
//! Deprecated values are never errors: they are reported through a
//! [`WarningSink`](crate::WarningSink). A [`ValidationError`] means the
//! traversal itself could not proceed.

use crate::annotation::AnnotationError;
use crate::path::FieldPath;

/// A traversal that could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The root value is not record-shaped.
    #[error("value at {path} is not a record (found {found})")]
    NotARecord {
        /// Path supplied for the root.
        path: FieldPath,
        /// Kind of value found instead.
        found: &'static str,
    },

    /// A field declared as nested holds a value of the wrong shape.
    #[error("value at {path} should be a {expected} (found {found})")]
    ShapeMismatch {
        /// Path of the offending value.
        path: FieldPath,
        /// Shape declared by the schema.
        expected: &'static str,
        /// Kind of value found instead.
        found: &'static str,
    },

    /// A deprecation marker could not be parsed and the policy is strict.
    #[error("malformed deprecation annotation on {path}")]
    Annotation {
        /// Path of the annotated field.
        path: FieldPath,
        /// Why the marker was rejected.
        #[source]
        source: AnnotationError,
    },
}

impl ValidationError {
    /// Path of the value the error refers to.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::NotARecord { path, .. }
            | Self::ShapeMismatch { path, .. }
            | Self::Annotation { path, .. } => path,
        }
    }
}

/// A schema document that could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// JSON syntax or structure error.
    #[error("invalid JSON schema")]
    Json(#[from] serde_json::Error),

    /// YAML syntax or structure error.
    #[error("invalid YAML schema")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::schema::RecordSchema;

    #[test]
    fn schema_error_keeps_parser_message_in_source_only() {
        let err = RecordSchema::from_yaml_str("fields: [").unwrap_err();

        let source = err.source().map(ToString::to_string).unwrap();
        assert_eq!(err.to_string(), "invalid YAML schema");
        assert!(!source.is_empty());
        assert!(!err.to_string().contains(&source));
    }

    #[test]
    fn annotation_error_is_reported_once() {
        let err = ValidationError::Annotation {
            path: FieldPath::from("server.port"),
            source: AnnotationError::Empty,
        };

        assert_eq!(
            err.to_string(),
            "malformed deprecation annotation on server.port"
        );
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("deprecation annotation is empty")
        );
    }
}
