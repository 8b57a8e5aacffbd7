//! Integration tests for schema-driven document scanning.

use depwarn::prelude::*;
use depwarn::{Nested, REMOVED_MESSAGE, ValidationError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

const SCHEMA: &str = r"
fields:
  port:
    deprecated: replaced,listen
  listen: {}
  tls:
    deprecated: removed
    nested:
      record:
        fields:
          ciphers:
            deprecated: removed
  upstreams:
    nested:
      sequence:
        fields:
          weight:
            deprecated: removed
  routes:
    nested:
      map:
        fields:
          rewrite:
            deprecated: replaced,transform
";

fn schema() -> RecordSchema {
    RecordSchema::from_yaml_str(SCHEMA).unwrap()
}

fn scan(document: &Value) -> Vec<(String, String)> {
    let sink = CollectingSink::new();
    depwarn::validate_document(&schema(), document, "config", &sink).unwrap();
    sink.warnings()
        .into_iter()
        .map(|w| (w.path, w.message))
        .collect()
}

#[test]
fn warns_on_set_fields_through_every_nesting() {
    let document = json!({
        "port": 8080,
        "listen": "0.0.0.0:80",
        "tls": { "ciphers": ["aes"] },
        "upstreams": [{ "weight": 0 }, { "weight": 5 }],
        "routes": {
            "b": { "rewrite": "/v2" },
            "a": { "rewrite": "" }
        }
    });

    let found = scan(&document);
    let paths: Vec<&str> = found.iter().map(|(path, _)| path.as_str()).collect();

    assert_eq!(
        paths,
        [
            "config.port",
            "config.tls",
            "config.tls.ciphers",
            "config.upstreams[1].weight",
            "config.routes[b].rewrite",
        ]
    );
    assert_eq!(found[2].1, REMOVED_MESSAGE);
    assert_eq!(
        found[4].1,
        "This field is deprecated and will be removed in a future version. Please use 'transform' instead"
    );
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "port": 0, "tls": null, "upstreams": [], "routes": {} }))]
#[case(json!({ "port": null, "upstreams": [null, { "weight": 0 }] }))]
#[case(json!({ "listen": "set", "extra": { "port": 1 } }))]
fn defaults_and_absent_keys_are_silent(#[case] document: Value) {
    assert!(scan(&document).is_empty());
}

#[rstest]
#[case(json!(null), "null")]
#[case(json!([1, 2]), "sequence")]
#[case(json!("config"), "string")]
fn root_must_be_a_record(#[case] document: Value, #[case] found: &str) {
    let sink = CollectingSink::new();

    let err = depwarn::validate_document(&schema(), &document, "config", &sink).unwrap_err();

    match err {
        ValidationError::NotARecord { path, found: kind } => {
            assert_eq!(path.as_str(), "config");
            assert_eq!(kind, found);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
#[case(json!({ "tls": "on" }), "config.tls", "record")]
#[case(json!({ "upstreams": { "weight": 1 } }), "config.upstreams", "sequence")]
#[case(json!({ "upstreams": [3] }), "config.upstreams[0]", "record")]
#[case(json!({ "routes": [] }), "config.routes", "map")]
fn wrong_nested_kind_is_a_shape_mismatch(
    #[case] document: Value,
    #[case] at: &str,
    #[case] expected_kind: &str,
) {
    let sink = CollectingSink::new();

    let err = depwarn::validate_document(&schema(), &document, "config", &sink).unwrap_err();

    match err {
        ValidationError::ShapeMismatch { path, expected, .. } => {
            assert_eq!(path.as_str(), at);
            assert_eq!(expected, expected_kind);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn warnings_before_a_failure_are_kept() {
    let sink = CollectingSink::new();
    let document = json!({ "port": 1, "tls": 5 });

    let result = depwarn::validate_document(&schema(), &document, "", &sink);

    assert!(result.is_err());
    assert_eq!(sink.len(), 2);
}

#[test]
fn registered_schema_matches_loaded_one() {
    let built = RecordSchema::new()
        .field("port", FieldSchema::scalar().deprecated("replaced,listen"))
        .field("listen", FieldSchema::scalar())
        .field(
            "tls",
            FieldSchema::record(
                RecordSchema::new().field("ciphers", FieldSchema::scalar().deprecated("removed")),
            )
            .deprecated("removed"),
        )
        .field(
            "upstreams",
            FieldSchema::sequence(
                RecordSchema::new().field("weight", FieldSchema::scalar().deprecated("removed")),
            ),
        )
        .field(
            "routes",
            FieldSchema::map(
                RecordSchema::new()
                    .field("rewrite", FieldSchema::scalar().deprecated("replaced,transform")),
            ),
        );

    assert_eq!(built, schema());
    assert!(matches!(built.fields["routes"].nested, Some(Nested::Map(_))));
}

#[test]
fn strict_policy_applies_to_documents() {
    let schema = RecordSchema::new().field("mode", FieldSchema::scalar().deprecated("renamed,x"));
    let document = json!({ "mode": "fast" });
    let sink = CollectingSink::new();

    let lenient = DeprecationValidator::new(&sink).validate_document(&schema, &document, "");
    assert_eq!(lenient.unwrap().warnings_emitted, 0);

    let strict = DeprecationValidator::new(&sink)
        .with_policy(AnnotationPolicy::Strict)
        .validate_document(&schema, &document, "");
    assert!(matches!(strict, Err(ValidationError::Annotation { .. })));
}
