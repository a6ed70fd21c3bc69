//! Error types for configuration merging.

use std::path::PathBuf;
use thiserror::Error;

/// Error reported by a [`ConfigParser`](crate::config::ConfigParser).
///
/// Parsers own their failure modes; the engine only forwards them.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The YAML document is malformed.
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Any other parser-specific failure.
    #[error("{0}")]
    Invalid(String),
}

impl ParseError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ParseError::Invalid(message.into())
    }
}

/// Errors that can occur while building a merged configuration.
#[derive(Debug, Error)]
pub enum MergeError {
    /// A configured directory does not exist.
    #[error("Config directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Listing an existing directory failed.
    #[error("Failed to read config directory {}: {source}", .path.display())]
    ReadDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading a config file failed.
    #[error("Failed to read config file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A merge rule is not a valid regular expression.
    #[error("Invalid merge rule '{pattern}': {source}")]
    InvalidRule {
        pattern: String,
        source: regex_lite::Error,
    },

    /// A delimited merge rule carries a modifier that has no regex equivalent.
    #[error("Invalid merge rule '{pattern}': unknown modifier '{modifier}'")]
    UnknownRuleModifier { pattern: String, modifier: char },

    /// The parser rejected a config file.
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
}

impl MergeError {
    /// Returns true for the missing-directory case.
    pub fn is_directory_not_found(&self) -> bool {
        matches!(self, MergeError::DirectoryNotFound { .. })
    }
}

/// Result type for merge operations.
pub type Result<T> = std::result::Result<T, MergeError>;
