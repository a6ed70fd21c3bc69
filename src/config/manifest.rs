//! Manifest files listing the directories and rules of a merge.
//!
//! ```yaml
//! directories:
//!   - defaults
//!   - /etc/myapp
//! rules:
//!   - '/^base\./'
//!   - '/^override\./'
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directories and rules for one merged configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Config directories, in merge order.
    #[serde(default)]
    pub directories: Vec<PathBuf>,

    /// Merge rule patterns, in merge order.
    #[serde(default)]
    pub rules: Vec<String>,
}

impl Manifest {
    /// Load a manifest from a YAML file.
    ///
    /// Relative directories are resolved against the manifest's own
    /// directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let mut manifest: Manifest = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))?;

        if let Some(base) = path.parent() {
            manifest.resolve_relative_to(base);
        }

        Ok(manifest)
    }

    /// Make relative directories relative to `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        for dir in &mut self.directories {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    /// Append directories and rules after the ones already listed.
    pub fn extend(&mut self, directories: Vec<PathBuf>, rules: Vec<String>) {
        self.directories.extend(directories);
        self.rules.extend(rules);
    }
}
