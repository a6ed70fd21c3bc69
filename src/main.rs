//! yaml-confluence
//!
//! Merges the YAML files of several config directories and prints the
//! merged tree or a single value from it.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::debug;
use yaml_confluence::cli::{Cli, Command};
use yaml_confluence::config::{Manifest, MergeEngine};
use yaml_confluence::format::{OutputFormat, render_tree, render_value};
use yaml_confluence::logging::{LogTarget, init_logging};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(&LogTarget::parse(&cli.log), cli.verbose)?;

    // Manifest entries come first, command-line entries are appended
    let mut manifest = match &cli.manifest {
        Some(path) => Manifest::load(path)?,
        None => Manifest::default(),
    };
    manifest.extend(cli.dirs.clone(), cli.rules.clone());

    debug!(
        directories = manifest.directories.len(),
        rules = manifest.rules.len(),
        "Building merged configuration"
    );

    let engine = MergeEngine::create(manifest.directories, manifest.rules)
        .context("Failed to build merged configuration")?;
    let format = OutputFormat::from(cli.format);

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Some(Command::Get(args)) => match engine.get_by_path(&args.path) {
            Some(value) => {
                stdout.write_all(render_value(&value, format)?.as_bytes())?;
            }
            None => {
                eprintln!("No value at path '{}'", args.path);
                return Ok(ExitCode::FAILURE);
            }
        },
        Some(Command::Dump) | None => {
            stdout.write_all(render_tree(&engine.to_tree(), format)?.as_bytes())?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
