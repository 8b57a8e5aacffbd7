//! End-to-end tests for the `depwarn` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCHEMA: &str = "\
fields:
  port:
    deprecated: replaced,listen
  listen: {}
  upstreams:
    nested:
      sequence:
        fields:
          weight:
            deprecated: removed
";

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.display().to_string()
}

fn depwarn(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("depwarn").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("DEPWARN_LOG")
        .env_remove("RUST_LOG")
        .env_remove("DEPWARN_OUTPUT")
        .env_remove("DEPWARN_POLICY")
        .env_remove("DEPWARN_PREFIX")
        .env_remove("DEPWARN_CONFIG");
    cmd
}

#[test]
fn check_reports_set_deprecated_fields() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA);
    let doc = write(
        dir.path(),
        "app.yaml",
        "port: 8080\nlisten: ':80'\nupstreams:\n  - weight: 0\n  - weight: 2\n",
    );

    depwarn(&dir)
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .success()
        .stdout(predicate::eq(
            "port: This field is deprecated and will be removed in a future version. Please use 'listen' instead\n\
             upstreams[1].weight: This field will be removed in a future version\n",
        ))
        .stderr(predicate::str::contains("2 warning(s)"));
}

#[test]
fn check_json_output_and_prefix() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA);
    let doc = write(dir.path(), "app.json", r#"{"port": 1}"#);

    let output = depwarn(&dir)
        .args(["check", "-s", &schema, "--output", "json", "--prefix", "app", &doc])
        .output()
        .unwrap();

    assert!(output.status.success());
    let line: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(line["path"], "app.port");
    assert_eq!(line["replacement"], "listen");
    assert_eq!(line["document"], doc.as_str());
}

#[test]
fn clean_document_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA);
    let doc = write(dir.path(), "app.yaml", "port: 0\nlisten: ':80'\n");

    depwarn(&dir)
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn non_record_document_fails() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA);
    let doc = write(dir.path(), "list.yaml", "- 1\n- 2\n");

    depwarn(&dir)
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a record"));
}

#[test]
fn missing_document_fails() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA);

    depwarn(&dir)
        .args(["check", "--schema", &schema, "absent.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn strict_flag_and_config_file_select_policy() {
    let dir = TempDir::new().unwrap();
    let schema = write(
        dir.path(),
        "schema.yaml",
        "fields:\n  mode:\n    deprecated: renamed\n",
    );
    let doc = write(dir.path(), "app.yaml", "mode: fast\n");

    depwarn(&dir)
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .success();

    depwarn(&dir)
        .args(["check", "--strict", "--schema", &schema, &doc])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("mode"));

    write(dir.path(), "depwarn.toml", "policy = \"strict\"\n");
    depwarn(&dir)
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .code(1);
}

#[test]
fn env_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA);
    let doc = write(dir.path(), "app.yaml", "port: 1\n");
    write(dir.path(), "depwarn.toml", "prefix = \"file\"\n");

    depwarn(&dir)
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .stdout(predicate::str::starts_with("file.port: "));

    depwarn(&dir)
        .env("DEPWARN_PREFIX", "env")
        .args(["check", "--schema", &schema, &doc])
        .assert()
        .stdout(predicate::str::starts_with("env.port: "));

    depwarn(&dir)
        .env("DEPWARN_PREFIX", "env")
        .args(["check", "--prefix", "flag", "--schema", &schema, &doc])
        .assert()
        .stdout(predicate::str::starts_with("flag.port: "));
}

#[test]
fn schema_check_lists_malformed_annotations() {
    let dir = TempDir::new().unwrap();
    let good = write(dir.path(), "good.yaml", SCHEMA);
    let bad = write(
        dir.path(),
        "bad.json",
        r#"{"fields": {"a": {"deprecated": "replaced"}, "b": {"deprecated": "removed"}}}"#,
    );

    depwarn(&dir)
        .args(["schema-check", &good])
        .assert()
        .success()
        .stderr(predicate::str::contains("ok"));

    depwarn(&dir)
        .args(["schema-check", &bad])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("a: "));
}

#[test]
fn schema_parse_error_is_printed_once() {
    let dir = TempDir::new().unwrap();
    let schema = write(
        dir.path(),
        "schema.yaml",
        "fields:\n  port:\n    deprecate: removed\n",
    );

    let output = depwarn(&dir)
        .args(["schema-check", &schema])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invalid YAML schema"));
    assert_eq!(stderr.matches("unknown field `deprecate`").count(), 1);
}

#[test]
fn nested_schema_in_json_and_yaml_agree() {
    let dir = TempDir::new().unwrap();
    let yaml = write(dir.path(), "schema.yaml", SCHEMA);
    let json = write(
        dir.path(),
        "schema.json",
        r#"{"fields": {
            "port": {"deprecated": "replaced,listen"},
            "listen": {},
            "upstreams": {"nested": {"sequence": {"fields": {"weight": {"deprecated": "removed"}}}}}
        }}"#,
    );
    let doc = write(dir.path(), "app.yaml", "upstreams:\n  - weight: 4\n");

    for schema in [&yaml, &json] {
        depwarn(&dir)
            .args(["check", "--schema", schema, &doc])
            .assert()
            .success()
            .stdout(predicate::eq(
                "upstreams[0].weight: This field will be removed in a future version\n",
            ));
    }
}
