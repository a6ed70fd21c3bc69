//! Merged configuration from multiple directories.
//!
//! A [`MergeEngine`] walks its merge rules in order and, for each rule, its
//! directories in order. Every config file whose name matches the current
//! rule is deep-merged into the result, so later rules, later directories and
//! later files (by name) win on conflicting keys.
//!
//! ## Merge Strategy
//! - Nested mappings are merged key by key
//! - Scalars and sequences are replaced entirely
//! - Empty files contribute nothing
//!
//! ## Lookup
//! Values are addressed with colon-delimited paths such as `database:host`.

mod engine;
mod manifest;
mod merge;
mod parser;
mod rules;
mod scanner;
mod tree;

pub use engine::MergeEngine;
pub use manifest::Manifest;
pub use merge::{deep_merge, deep_merge_all};
pub use parser::{ConfigParser, YamlParser};
pub use rules::MergeRule;
pub use scanner::{DEFAULT_SUFFIXES, DirectoryScanner, ScannedFile};
pub use tree::{ConfigTree, PATH_DELIMITER, get_by_path, leaf_paths};
