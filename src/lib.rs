//! yaml-confluence library
//!
//! Merges YAML configuration spread over several directories into a single
//! tree, ordered by merge rules, and resolves colon-delimited key paths
//! against the result.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
