//! CLI command definitions for yaml-confluence
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::format::OutputFormat;

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FormatArg {
    #[default]
    Yaml,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Merge YAML configuration directories and query the result
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Manifest file listing directories and rules
    #[arg(short, long, global = true, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Config directory, in merge order (repeatable, appended after the manifest's)
    #[arg(short, long = "dir", global = true, value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Merge rule regex, in merge order (repeatable, appended after the manifest's)
    #[arg(short, long = "rule", global = true, value_name = "REGEX")]
    pub rules: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Yaml, global = true)]
    pub format: FormatArg,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the whole merged tree (default if no subcommand given)
    Dump,

    /// Print the value at a colon-delimited path
    Get(GetArgs),
}

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Key path, e.g. database:host
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump_defaults() {
        let cli = Cli::parse_from(["yaml-confluence", "-d", "conf", "-r", "base"]);
        assert_eq!(cli.dirs, vec![PathBuf::from("conf")]);
        assert_eq!(cli.rules, vec!["base"]);
        assert_eq!(cli.format, FormatArg::Yaml);
        assert_eq!(cli.log, "2");
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_repeated_options_keep_order() {
        let cli = Cli::parse_from([
            "yaml-confluence",
            "--dir",
            "a",
            "--rule",
            "base",
            "--dir",
            "b",
            "--rule",
            "override",
            "dump",
        ]);
        assert_eq!(cli.dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(cli.rules, vec!["base", "override"]);
        assert!(matches!(cli.command, Some(Command::Dump)));
    }

    #[test]
    fn test_parse_get() {
        let cli = Cli::parse_from([
            "yaml-confluence",
            "get",
            "database:host",
            "--format",
            "json",
        ]);
        match cli.command {
            Some(Command::Get(args)) => assert_eq!(args.path, "database:host"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(OutputFormat::from(cli.format), OutputFormat::Json);
    }
}
