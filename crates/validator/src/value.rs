//! Default-value predicates and child traversal for field types.
//!
//! Every type that can sit in a record field implements [`FieldValue`]. The
//! trait answers two questions: is the value at its type's default (so a
//! deprecation marker on it stays silent), and which nested records does it
//! contain.
//!
//! `Option<T>` is `None` by default and `Some(_)` is always considered set,
//! even when the inner value is zero: an explicit `Some(0)` was written by
//! someone.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;

use crate::error::ValidationError;
use crate::path::FieldPath;
use crate::validator::Walker;

/// A type that can be held by a record field.
pub trait FieldValue {
    /// Whether this is the type's default/empty value.
    fn is_default_value(&self) -> bool;

    /// Visits nested records below this value.
    ///
    /// Scalars have none. Containers forward to their elements with an
    /// extended path; records hand themselves to
    /// [`Walker::walk_record`].
    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        let _ = (path, walker);
        Ok(())
    }
}

// ============================================================================
// SCALARS
// ============================================================================

macro_rules! impl_zero_scalar {
    ($zero:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl FieldValue for $ty {
                #[inline]
                fn is_default_value(&self) -> bool {
                    *self == $zero
                }
            }
        )+
    };
}

impl_zero_scalar!(0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_zero_scalar!(0.0 => f32, f64);
impl_zero_scalar!(false => bool);
impl_zero_scalar!('\0' => char);

impl FieldValue for () {
    fn is_default_value(&self) -> bool {
        true
    }
}

impl FieldValue for str {
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for String {
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for Cow<'_, str> {
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }
}

impl FieldValue for Path {
    fn is_default_value(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl FieldValue for PathBuf {
    fn is_default_value(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl FieldValue for Duration {
    fn is_default_value(&self) -> bool {
        self.is_zero()
    }
}

impl FieldValue for serde_json::Value {
    fn is_default_value(&self) -> bool {
        json_is_default(self)
    }
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` are the JSON defaults.
pub(crate) fn json_is_default(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "record",
    }
}

// ============================================================================
// WRAPPERS
// ============================================================================

impl<T: FieldValue> FieldValue for Option<T> {
    fn is_default_value(&self) -> bool {
        self.is_none()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        match self {
            Some(inner) => inner.walk_children(path, walker),
            None => Ok(()),
        }
    }
}

macro_rules! impl_transparent {
    ($($wrapper:ident),+) => {
        $(
            impl<T: FieldValue + ?Sized> FieldValue for $wrapper<T> {
                fn is_default_value(&self) -> bool {
                    (**self).is_default_value()
                }

                fn walk_children(
                    &self,
                    path: &FieldPath,
                    walker: &mut Walker<'_>,
                ) -> Result<(), ValidationError> {
                    (**self).walk_children(path, walker)
                }
            }
        )+
    };
}

impl_transparent!(Box, Rc, Arc);

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn is_default_value(&self) -> bool {
        (**self).is_default_value()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        (**self).walk_children(path, walker)
    }
}

// ============================================================================
// SEQUENCES
// ============================================================================

fn walk_indexed<'v, T, I>(
    items: I,
    path: &FieldPath,
    walker: &mut Walker<'_>,
) -> Result<(), ValidationError>
where
    T: FieldValue + 'v,
    I: IntoIterator<Item = &'v T>,
{
    for (index, item) in items.into_iter().enumerate() {
        item.walk_children(&path.index(index), walker)?;
    }
    Ok(())
}

impl<T: FieldValue> FieldValue for [T] {
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        walk_indexed(self, path, walker)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        walk_indexed(self, path, walker)
    }
}

impl<T: FieldValue> FieldValue for VecDeque<T> {
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        walk_indexed(self, path, walker)
    }
}

/// Fixed-size arrays are default only when every element is.
impl<T: FieldValue, const N: usize> FieldValue for [T; N] {
    fn is_default_value(&self) -> bool {
        self.iter().all(FieldValue::is_default_value)
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        walk_indexed(self, path, walker)
    }
}

/// Elements are visited in sorted order and indexed by that position.
impl<T, S> FieldValue for HashSet<T, S>
where
    T: FieldValue + Ord,
{
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        let mut items: Vec<&T> = self.iter().collect();
        items.sort();
        walk_indexed(items, path, walker)
    }
}

impl<T: FieldValue> FieldValue for BTreeSet<T> {
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        walk_indexed(self, path, walker)
    }
}

// ============================================================================
// KEYED COLLECTIONS
// ============================================================================

fn walk_keyed<'v, K, V, I>(
    entries: I,
    path: &FieldPath,
    walker: &mut Walker<'_>,
) -> Result<(), ValidationError>
where
    K: std::fmt::Display + 'v,
    V: FieldValue + 'v,
    I: IntoIterator<Item = (&'v K, &'v V)>,
{
    for (key, value) in entries {
        value.walk_children(&path.key(key), walker)?;
    }
    Ok(())
}

/// Entries are visited in sorted key order so repeated runs log identically.
impl<K, V, S> FieldValue for HashMap<K, V, S>
where
    K: std::fmt::Display,
    V: FieldValue,
{
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        let mut entries: Vec<(String, &V)> = self
            .iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, value) in entries {
            value.walk_children(&path.key(key), walker)?;
        }
        Ok(())
    }
}

impl<K, V> FieldValue for BTreeMap<K, V>
where
    K: std::fmt::Display,
    V: FieldValue,
{
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        walk_keyed(self, path, walker)
    }
}

impl<K, V, S> FieldValue for IndexMap<K, V, S>
where
    K: std::fmt::Display,
    V: FieldValue,
{
    fn is_default_value(&self) -> bool {
        self.is_empty()
    }

    fn walk_children(
        &self,
        path: &FieldPath,
        walker: &mut Walker<'_>,
    ) -> Result<(), ValidationError> {
        walk_keyed(self, path, walker)
    }
}
