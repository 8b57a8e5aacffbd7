//! Tests for the Record derive macro - generic and borrowed fields.

use depwarn::{FieldValue, Record};

#[derive(Record)]
pub struct Wrapper<T> {
    #[deprecation(removed)]
    inner: T,
}

#[derive(Record)]
pub struct Borrowed<'a, T: Clone>
where
    T: Default,
{
    #[deprecation(replaced = "label")]
    name: &'a str,
    label: &'a str,
    values: Vec<T>,
}

fn main() {
    let wrapper = Wrapper { inner: 0_u8 };
    assert!(wrapper.is_default_value());

    let borrowed = Borrowed::<u8> {
        name: "old",
        label: "",
        values: vec![],
    };
    assert_eq!(borrowed.fields().len(), 3);
    assert!(!borrowed.is_default_value());

    let nested = Wrapper { inner: Wrapper { inner: String::from("x") } };
    assert!(!nested.is_default_value());
}
