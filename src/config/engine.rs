//! The merge engine: rule-ordered, directory-ordered configuration merging.
//!
//! Rules form the outer loop and directories the inner loop, so a caller can
//! express override tiers with rules alone: a first pass over `base` files in
//! every directory, then a pass over `override` files in the same
//! directories. Later merges win on conflicting leaves.

use super::merge::deep_merge;
use super::parser::{ConfigParser, YamlParser};
use super::rules::MergeRule;
use super::scanner::DirectoryScanner;
use super::tree::{self, ConfigTree};
use crate::error::{MergeError, Result};
use arc_swap::ArcSwap;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Parsed files of one directory, in scan order.
type DirectoryCache = Vec<(String, ConfigTree)>;

/// Builds a merged configuration tree from directories and merge rules.
///
/// The last successfully generated tree is published atomically; a failed
/// [`generate`](Self::generate) leaves the previous tree visible.
pub struct MergeEngine<P = YamlParser> {
    directories: Vec<PathBuf>,
    rules: Vec<MergeRule>,
    scanner: DirectoryScanner,
    parser: P,
    current: ArcSwap<ConfigTree>,
}

impl MergeEngine<YamlParser> {
    /// Build a YAML engine from directories and rule patterns and generate
    /// the merged tree immediately.
    pub fn create<D, R>(directories: D, rules: R) -> Result<Self>
    where
        D: IntoIterator,
        D::Item: Into<PathBuf>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let engine = MergeEngine::new(YamlParser)
            .with_directories(directories)
            .with_rules(rules)?;
        engine.generate()?;
        Ok(engine)
    }
}

impl Default for MergeEngine<YamlParser> {
    fn default() -> Self {
        Self::new(YamlParser)
    }
}

impl<P: ConfigParser> MergeEngine<P> {
    /// Create an engine with no directories or rules.
    pub fn new(parser: P) -> Self {
        Self {
            directories: Vec::new(),
            rules: Vec::new(),
            scanner: DirectoryScanner::new(),
            parser,
            current: ArcSwap::from_pointee(ConfigTree::new()),
        }
    }

    /// Set the scanner used to list directories.
    pub fn with_scanner(mut self, scanner: DirectoryScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Append directories, in merge order.
    pub fn with_directories<D>(mut self, directories: D) -> Self
    where
        D: IntoIterator,
        D::Item: Into<PathBuf>,
    {
        self.add_directories(directories);
        self
    }

    /// Append rules, in merge order.
    pub fn with_rules<R>(mut self, rules: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: Into<String>,
    {
        self.add_rules(rules)?;
        Ok(self)
    }

    pub fn add_directory(&mut self, directory: impl Into<PathBuf>) -> &mut Self {
        self.directories.push(directory.into());
        self
    }

    pub fn add_directories<D>(&mut self, directories: D) -> &mut Self
    where
        D: IntoIterator,
        D::Item: Into<PathBuf>,
    {
        self.directories.extend(directories.into_iter().map(Into::into));
        self
    }

    /// Compile and append a rule. Invalid patterns are rejected here, not
    /// during generation.
    pub fn add_rule(&mut self, pattern: impl Into<String>) -> Result<&mut Self> {
        self.rules.push(MergeRule::new(pattern)?);
        Ok(self)
    }

    /// Compile and append several rules. Stops at the first invalid pattern;
    /// rules before it stay added.
    pub fn add_rules<R>(&mut self, rules: R) -> Result<&mut Self>
    where
        R: IntoIterator,
        R::Item: Into<String>,
    {
        for pattern in rules {
            self.add_rule(pattern)?;
        }
        Ok(self)
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn rules(&self) -> &[MergeRule] {
        &self.rules
    }

    /// Merge every matching file and publish the result.
    ///
    /// Each directory is scanned and each of its files parsed at most once
    /// per call, the first time any rule reaches it. A missing directory
    /// aborts the whole call and nothing is published.
    pub fn generate(&self) -> Result<Arc<ConfigTree>> {
        let mut cache: HashMap<&Path, DirectoryCache> = HashMap::new();
        let mut merged = ConfigTree::new();
        let mut merged_files = 0usize;

        for rule in &self.rules {
            for directory in &self.directories {
                let files = match cache.entry(directory.as_path()) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => entry.insert(self.load_directory(directory)?),
                };

                for (name, file_tree) in files.iter() {
                    if rule.is_match(name) {
                        debug!(
                            rule = %rule,
                            directory = %directory.display(),
                            file = %name,
                            "Merging config file"
                        );
                        deep_merge(&mut merged, file_tree.clone());
                        merged_files += 1;
                    }
                }
            }
        }

        info!(
            rules = self.rules.len(),
            directories = cache.len(),
            merged_files,
            keys = merged.len(),
            "Generated merged configuration"
        );

        let merged = Arc::new(merged);
        self.current.store(Arc::clone(&merged));
        Ok(merged)
    }

    /// Scan a directory and parse its files, dropping those that contribute
    /// nothing.
    fn load_directory(&self, directory: &Path) -> Result<DirectoryCache> {
        let files = self.scanner.scan(directory)?;
        debug!(
            directory = %directory.display(),
            files = files.len(),
            "Scanned config directory"
        );

        let mut parsed = Vec::with_capacity(files.len());
        for file in files {
            let tree = self
                .parser
                .parse(&file.path, &file.bytes)
                .map_err(|source| MergeError::Parse {
                    path: file.path.clone(),
                    source,
                })?;

            match tree {
                Some(tree) => parsed.push((file.name, tree)),
                None => debug!(path = %file.path.display(), "Config file is empty; skipping"),
            }
        }

        Ok(parsed)
    }

    /// The last published tree (empty if nothing was generated yet).
    pub fn to_tree(&self) -> Arc<ConfigTree> {
        self.current.load_full()
    }

    /// Replace the published tree without merging anything.
    pub fn set_tree(&self, tree: ConfigTree) {
        self.current.store(Arc::new(tree));
    }

    /// Look up a colon-delimited path in the published tree.
    pub fn get_by_path(&self, path: &str) -> Option<Value> {
        let current = self.current.load();
        tree::get_by_path(&current, path).cloned()
    }
}
