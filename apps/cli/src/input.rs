//! Reading schemas and documents from disk.

use std::fs;
use std::path::Path;

use anyhow::Context;
use depwarn::RecordSchema;
use serde_json::Value;

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Loads a schema; `.json` files are JSON, everything else YAML.
pub fn load_schema(path: &Path) -> anyhow::Result<RecordSchema> {
    let source = read(path)?;
    let schema = if is_json(path) {
        RecordSchema::from_json_str(&source)
    } else {
        RecordSchema::from_yaml_str(&source)
    };
    schema.with_context(|| format!("invalid schema {}", path.display()))
}

/// Loads a document as a JSON tree; `.json` files are JSON, everything else YAML.
pub fn load_document(path: &Path) -> anyhow::Result<Value> {
    let source = read(path)?;
    let document = if is_json(path) {
        serde_json::from_str(&source).map_err(anyhow::Error::from)
    } else {
        serde_yaml::from_str(&source).map_err(anyhow::Error::from)
    };
    document.with_context(|| format!("failed to parse {}", path.display()))
}
