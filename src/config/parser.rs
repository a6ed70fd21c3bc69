//! File parsers turning raw bytes into configuration trees.

use super::tree::ConfigTree;
use crate::error::ParseError;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// Parses the bytes of one configuration file.
///
/// Returns `Ok(None)` when the file contributes nothing (empty document,
/// falsy value). Errors are owned by the parser and are not caught by the
/// merge engine.
pub trait ConfigParser {
    fn parse(&self, path: &Path, bytes: &[u8]) -> Result<Option<ConfigTree>, ParseError>;
}

impl<F> ConfigParser for F
where
    F: Fn(&Path, &[u8]) -> Result<Option<ConfigTree>, ParseError>,
{
    fn parse(&self, path: &Path, bytes: &[u8]) -> Result<Option<ConfigTree>, ParseError> {
        self(path, bytes)
    }
}

/// YAML parser backed by `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl ConfigParser for YamlParser {
    fn parse(&self, path: &Path, bytes: &[u8]) -> Result<Option<ConfigTree>, ParseError> {
        let mut document: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
        // Resolve `<<: *anchor` merge keys before leaving YAML
        document.apply_merge()?;
        // YAML `.nan` and `.inf` have no JSON representation and become null
        let value: Value = serde_yaml::from_value(document)?;

        if is_falsy(&value) {
            return Ok(None);
        }

        match value {
            Value::Object(tree) => Ok(Some(tree)),
            other => {
                warn!(
                    path = %path.display(),
                    kind = value_kind(&other),
                    "Config file is not a mapping; skipping"
                );
                Ok(None)
            }
        }
    }
}

/// Values that make a file contribute nothing.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
