//! # depwarn-macros
//!
//! Proc-macros for `depwarn`.
//!
//! ## Derive Macros
//!
//! | Macro | Description |
//! |-------|-------------|
//! | [`Record`](derive@Record) | Implements `Record` and `FieldValue` with a static descriptor table |
//!
//! ## Examples
//!
//! ```ignore
//! use depwarn::Record;
//!
//! #[derive(Record)]
//! pub struct ServerConfig {
//!     #[deprecation(replaced = "listen")]
//!     port: u16,
//!
//!     listen: String,
//!
//!     #[deprecation(removed)]
//!     workers: Option<u32>,
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod record;
mod support;

/// Derive macro for the `Record` trait.
///
/// Generates a static field-descriptor table in declaration order, a
/// `fields()` accessor pairing each descriptor with the live value, and a
/// `FieldValue` impl so the type can itself be nested in other records,
/// sequences and maps. A derived record is "default" when every field is.
///
/// # Field attributes (`#[deprecation(...)]`)
///
/// - `removed` - Field will be removed with no replacement
/// - `replaced = "newName"` - Field is superseded by `newName`
/// - `tag = "..."` - Raw marker, parsed at validation time
/// - `name = "..."` - Name used in paths (default: the field identifier)
/// - `is_default = "path::to::fn"` - Custom `fn(&T) -> bool` default predicate
/// - `skip` - Field is neither inspected nor descended into
///
/// Generic type parameters are bounded by `FieldValue`.
///
/// # Example
///
/// ```ignore
/// fn is_default_port(port: &u16) -> bool {
///     *port == 8080
/// }
///
/// #[derive(Record)]
/// pub struct Listener {
///     #[deprecation(replaced = "address", is_default = "is_default_port")]
///     port: u16,
///
///     #[deprecation(name = "addr")]
///     address: String,
///
///     #[deprecation(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(deprecation))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}
