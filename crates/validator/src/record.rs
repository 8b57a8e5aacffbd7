//! Static field-descriptor tables for typed records.
//!
//! A [`Record`] exposes a [`RecordDescriptor`] built once per type (usually
//! by `#[derive(Record)]`) and, per instance, the list of [`Field`]s pairing
//! each descriptor with the current value. Traversal is a lookup over these
//! tables; no runtime reflection is involved.
//!
//! # Manual registration
//!
//! ```rust
//! use depwarn::{Field, FieldDescriptor, Record, RecordDescriptor};
//!
//! struct Legacy {
//!     timeout: u64,
//!     name: String,
//! }
//!
//! static LEGACY_FIELDS: [FieldDescriptor; 2] = [
//!     FieldDescriptor::new("timeout").with_annotation("replaced,deadline"),
//!     FieldDescriptor::new("name"),
//! ];
//! static LEGACY: RecordDescriptor = RecordDescriptor::new("Legacy", &LEGACY_FIELDS);
//!
//! impl Record for Legacy {
//!     fn descriptor(&self) -> &'static RecordDescriptor {
//!         &LEGACY
//!     }
//!
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new(&LEGACY_FIELDS[0], &self.timeout),
//!             Field::new(&LEGACY_FIELDS[1], &self.name),
//!         ]
//!     }
//! }
//! ```

use crate::annotation::{AnnotationError, Deprecation};
use crate::value::FieldValue;

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// Static metadata of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: &'static str,
    annotation: Option<&'static str>,
}

impl FieldDescriptor {
    /// Describes an unannotated field.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            annotation: None,
        }
    }

    /// Attaches a raw deprecation marker (`removed` or `replaced,<name>`).
    ///
    /// The marker is stored as written; it is parsed during traversal.
    #[must_use]
    pub const fn with_annotation(mut self, annotation: &'static str) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Name used for path reporting.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The raw deprecation marker, if any.
    pub const fn annotation(&self) -> Option<&'static str> {
        self.annotation
    }

    /// Parses the marker, if any.
    pub fn deprecation(&self) -> Option<Result<Deprecation, AnnotationError>> {
        self.annotation.map(Deprecation::parse)
    }
}

/// Static metadata of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordDescriptor {
    name: &'static str,
    fields: &'static [FieldDescriptor],
}

impl RecordDescriptor {
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, fields }
    }

    /// Type name of the record.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Descriptors in declaration order.
    pub const fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Looks up a descriptor by field name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Descriptors that carry a deprecation marker.
    pub fn deprecated_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|field| field.annotation.is_some())
    }
}

// ============================================================================
// FIELDS
// ============================================================================

/// A descriptor paired with the field's current value.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    descriptor: &'static FieldDescriptor,
    value: &'a dyn FieldValue,
    default_override: Option<bool>,
}

impl<'a> Field<'a> {
    pub fn new(descriptor: &'static FieldDescriptor, value: &'a dyn FieldValue) -> Self {
        Self {
            descriptor,
            value,
            default_override: None,
        }
    }

    /// Replaces the type's default predicate with a precomputed answer.
    ///
    /// Used for fields whose "unset" value is not the type's natural zero.
    #[must_use]
    pub fn with_default_override(mut self, is_default: bool) -> Self {
        self.default_override = Some(is_default);
        self
    }

    pub fn descriptor(&self) -> &'static FieldDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn annotation(&self) -> Option<&'static str> {
        self.descriptor.annotation
    }

    pub fn value(&self) -> &'a dyn FieldValue {
        self.value
    }

    /// Whether the field currently holds its default value.
    pub fn is_default(&self) -> bool {
        self.default_override
            .unwrap_or_else(|| self.value.is_default_value())
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("descriptor", self.descriptor)
            .field("is_default", &self.is_default())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A value with named, described fields.
///
/// Implement with `#[derive(Record)]`, or by hand as shown in the
/// [module docs](self).
pub trait Record {
    /// The type's static descriptor table.
    fn descriptor(&self) -> &'static RecordDescriptor;

    /// Current fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn descriptor(&self) -> &'static RecordDescriptor {
        (**self).descriptor()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn descriptor(&self) -> &'static RecordDescriptor {
        (**self).descriptor()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}
