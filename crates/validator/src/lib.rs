//! # depwarn
//!
//! Metadata-driven deprecation warnings for configuration records.
//!
//! The validator walks a record's declared fields, reads each field's
//! deprecation annotation and reports fields that are deprecated *and* hold
//! a non-default value. Warnings are informational: they go to a
//! [`WarningSink`] and never fail the traversal.
//!
//! ## Quick Start
//!
//! ```rust
//! use depwarn::prelude::*;
//!
//! #[derive(Record)]
//! struct Upstream {
//!     #[deprecation(removed)]
//!     weight: u32,
//! }
//!
//! #[derive(Record)]
//! struct Config {
//!     #[deprecation(replaced = "listen")]
//!     port: u16,
//!     listen: String,
//!     upstreams: Vec<Upstream>,
//! }
//!
//! let config = Config {
//!     port: 0,
//!     listen: "0.0.0.0:80".into(),
//!     upstreams: vec![Upstream { weight: 3 }],
//! };
//!
//! let sink = CollectingSink::new();
//! depwarn::validate(&config, "config", &sink).unwrap();
//! assert_eq!(sink.warnings()[0].path, "config.upstreams[0].weight");
//! ```
//!
//! ## Annotations
//!
//! - `removed`: `This field will be removed in a future version`
//! - `replaced,<name>`: `This field is deprecated and will be removed in a
//!   future version. Please use '<name>' instead`
//!
//! ## Front-ends
//!
//! - Typed records: [`Record`], usually via `#[derive(Record)]`.
//! - Dynamic documents: [`RecordSchema`] + `serde_json::Value`, see
//!   [`validate_document`].

// Lets `#[derive(Record)]` expansions inside this crate resolve `::depwarn`.
extern crate self as depwarn;

pub mod annotation;
pub mod error;
pub mod path;
pub mod prelude;
pub mod record;
pub mod schema;
pub mod sink;
pub mod validator;
pub mod value;

pub use annotation::{AnnotationError, Deprecation, REMOVED_MESSAGE};
pub use error::{SchemaError, ValidationError};
pub use path::FieldPath;
pub use record::{Field, FieldDescriptor, Record, RecordDescriptor};
pub use schema::{FieldSchema, Nested, RecordSchema};
pub use sink::{
    CollectedWarning, CollectingSink, DeprecationWarning, FnSink, TracingSink, WARNING_TARGET,
    WarningSink,
};
pub use validator::{
    AnnotationPolicy, DeprecationValidator, ValidationSummary, Walker, validate,
    validate_document,
};
pub use value::FieldValue;

#[cfg(feature = "derive")]
pub use depwarn_macros::Record;
