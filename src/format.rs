//! Output formatting for merged trees and looked-up values.

use crate::config::ConfigTree;
use anyhow::Result;
use serde_json::Value;

/// Output format for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Render a whole tree.
pub fn render_tree(tree: &ConfigTree, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(tree)?),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(tree)?)),
    }
}

/// Render a single looked-up value.
///
/// Strings are printed raw so they can be used directly in shell scripts.
pub fn render_value(value: &Value, format: OutputFormat) -> Result<String> {
    match (value, format) {
        (Value::String(s), _) => Ok(format!("{}\n", s)),
        (_, OutputFormat::Yaml) => Ok(serde_yaml::to_string(value)?),
        (_, OutputFormat::Json) => Ok(format!("{}\n", serde_json::to_string_pretty(value)?)),
    }
}
