//! Compile-time tests for depwarn-macros.
//!
//! These tests use trybuild to verify that the derive expands into code
//! that type-checks for the supported field shapes, and that invalid input
//! is rejected with a pointed diagnostic.

#[test]
fn test_record_derive() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/record_pass.rs");
}

#[test]
fn test_record_derive_generics() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/record_generic_pass.rs");
}

#[test]
fn test_record_derive_fail() {
    // Enums, tuple structs and container-level attributes
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/record_fail_shape.rs");
}

#[test]
fn test_record_attrs_fail() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/record_fail_attrs.rs");
}
