//! Property-based tests for depwarn.

use std::collections::BTreeMap;

use depwarn::prelude::*;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

#[derive(Record, Debug, Clone)]
struct Plain {
    name: String,
    count: i64,
    enabled: bool,
    tags: Vec<String>,
}

#[derive(Record, Debug, Clone)]
struct Annotated {
    #[deprecation(removed)]
    name: String,
    #[deprecation(replaced = "total")]
    count: i64,
    #[deprecation(replaced = "active")]
    enabled: bool,
    #[deprecation(removed)]
    tags: Vec<String>,
}

#[derive(Record, Debug, Clone)]
struct Holder {
    inner: Annotated,
    list: Vec<Annotated>,
    keyed: BTreeMap<String, Annotated>,
}

fn annotated() -> impl Strategy<Value = Annotated> {
    (".{0,8}", any::<i64>(), any::<bool>(), prop::collection::vec(".{0,4}", 0..3)).prop_map(
        |(name, count, enabled, tags)| Annotated {
            name,
            count,
            enabled,
            tags,
        },
    )
}

fn holder() -> impl Strategy<Value = Holder> {
    (
        annotated(),
        prop::collection::vec(annotated(), 0..4),
        prop::collection::btree_map("[a-z]{1,3}", annotated(), 0..4),
    )
        .prop_map(|(inner, list, keyed)| Holder { inner, list, keyed })
}

fn expected_for(record: &Annotated) -> usize {
    usize::from(!record.name.is_empty())
        + usize::from(record.count != 0)
        + usize::from(record.enabled)
        + usize::from(!record.tags.is_empty())
}

// ============================================================================
// NO ANNOTATION, NO WARNING
// ============================================================================

proptest! {
    #[test]
    fn unannotated_records_never_warn(
        name in ".*",
        count in any::<i64>(),
        enabled in any::<bool>(),
        tags in prop::collection::vec(".*", 0..4),
    ) {
        let sink = CollectingSink::new();
        depwarn::validate(&Plain { name, count, enabled, tags }, "", &sink).unwrap();
        prop_assert!(sink.is_empty());
    }

    #[test]
    fn unannotated_documents_never_warn(
        entries in prop::collection::btree_map("[a-z]{1,6}", any::<i32>(), 0..8),
    ) {
        let schema = entries
            .keys()
            .fold(RecordSchema::new(), |schema, key| schema.field(key.clone(), FieldSchema::scalar()));
        let document: Map<String, Value> =
            entries.into_iter().map(|(k, v)| (k, json!(v))).collect();

        let sink = CollectingSink::new();
        depwarn::validate_document(&schema, &Value::Object(document), "", &sink).unwrap();
        prop_assert!(sink.is_empty());
    }
}

// ============================================================================
// WARNING COUNT MATCHES SET FIELDS
// ============================================================================

proptest! {
    #[test]
    fn one_warning_per_set_annotated_field(record in annotated()) {
        let sink = CollectingSink::new();
        depwarn::validate(&record, "", &sink).unwrap();
        prop_assert_eq!(sink.len(), expected_for(&record));
    }

    #[test]
    fn nested_counts_add_up(tree in holder()) {
        let expected = expected_for(&tree.inner)
            + tree.list.iter().map(expected_for).sum::<usize>()
            + tree.keyed.values().map(expected_for).sum::<usize>();

        let sink = CollectingSink::new();
        depwarn::validate(&tree, "root", &sink).unwrap();
        prop_assert_eq!(sink.len(), expected);
    }
}

// ============================================================================
// IDEMPOTENCY: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn repeated_validation_is_identical(tree in holder()) {
        let first = CollectingSink::new();
        let second = CollectingSink::new();

        depwarn::validate(&tree, "root", &first).unwrap();
        depwarn::validate(&tree, "root", &second).unwrap();

        prop_assert_eq!(first.warnings(), second.warnings());
    }
}
