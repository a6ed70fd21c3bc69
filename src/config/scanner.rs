//! Directory scanning for candidate configuration files.

use crate::error::{MergeError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name suffixes recognized as configuration files.
pub const DEFAULT_SUFFIXES: [&str; 2] = [".yml", ".yaml"];

/// A candidate file read from a config directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Bare file name, the string merge rules are tested against
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// Raw file content
    pub bytes: Vec<u8>,
}

/// Lists and reads the configuration files of a single directory.
///
/// Files are returned sorted by name so that merge order does not depend on
/// the platform's directory listing order.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    suffixes: Vec<String>,
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryScanner {
    /// Create a scanner recognizing `.yml` and `.yaml` files.
    pub fn new() -> Self {
        Self {
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the recognized suffixes (e.g. `".json"`).
    pub fn with_suffixes(mut self, suffixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Check whether a file name carries a recognized suffix.
    pub fn is_candidate(&self, file_name: &str) -> bool {
        self.suffixes.iter().any(|suffix| file_name.ends_with(suffix.as_str()))
    }

    /// Read every candidate file in `dir`, sorted by file name.
    pub fn scan(&self, dir: &Path) -> Result<Vec<ScannedFile>> {
        match dir.try_exists() {
            Ok(true) => {}
            Ok(false) => {
                return Err(MergeError::DirectoryNotFound {
                    path: dir.to_path_buf(),
                });
            }
            // Existence could not be checked (e.g. permission denied)
            Err(source) => {
                return Err(MergeError::ReadDirectory {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        }

        let entries = std::fs::read_dir(dir).map_err(|source| MergeError::ReadDirectory {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut candidates: Vec<(String, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| MergeError::ReadDirectory {
                path: dir.to_path_buf(),
                source,
            })?;

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
                continue;
            };

            if !self.is_candidate(&name) {
                continue;
            }

            let path = entry.path();
            if !path.is_file() {
                debug!(path = %path.display(), "Skipping non-file entry");
                continue;
            }

            candidates.push((name, path));
        }

        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        candidates
            .into_iter()
            .map(|(name, path)| {
                let bytes = std::fs::read(&path).map_err(|source| MergeError::ReadFile {
                    path: path.clone(),
                    source,
                })?;
                Ok(ScannedFile { name, path, bytes })
            })
            .collect()
    }
}
