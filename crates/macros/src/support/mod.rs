//! Internal support utilities for proc-macros.
//!
//! Attribute parsing, diagnostics and small syn helpers.

pub mod attrs;
pub mod diag;
pub mod utils;
