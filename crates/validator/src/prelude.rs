//! Prelude module for convenient imports.
//!
//! Provides a single `use depwarn::prelude::*;` import that brings in the
//! traits, sinks and validator types needed to scan a record.
//!
//! # Examples
//!
//! ```rust,ignore
//! use depwarn::prelude::*;
//!
//! let validator = DeprecationValidator::new(TracingSink).with_policy(AnnotationPolicy::Strict);
//! validator.validate(&config, "config")?;
//! ```

// ============================================================================
// TRAITS & DESCRIPTORS
// ============================================================================

pub use crate::record::{Field, FieldDescriptor, Record, RecordDescriptor};
pub use crate::value::FieldValue;

// ============================================================================
// VALIDATION
// ============================================================================

pub use crate::annotation::Deprecation;
pub use crate::error::ValidationError;
pub use crate::path::FieldPath;
pub use crate::schema::{FieldSchema, RecordSchema};
pub use crate::validator::{AnnotationPolicy, DeprecationValidator, ValidationSummary};

// ============================================================================
// SINKS
// ============================================================================

pub use crate::sink::{CollectingSink, DeprecationWarning, FnSink, TracingSink, WarningSink};

// ============================================================================
// DERIVE-GATED
// ============================================================================

#[cfg(feature = "derive")]
pub use depwarn_macros::Record;
