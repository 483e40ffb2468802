//! cli
//!
//! Command-line interface layer for refmap.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Gather inputs (config, catalog, spec set) for the core
//! - Delegate to command handlers and format their results
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, loads configuration
//! and a catalog, and hands plain values to [`crate::core`]. Blocking
//! diagnostics become a non-zero exit.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory given with `--cwd`
    pub cwd: Option<PathBuf>,
    pub verbosity: Verbosity,
}

impl Context {
    /// The directory commands run in.
    pub fn cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("failed to read current directory"),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        verbosity: Verbosity::from_flags(cli.quiet, cli.debug),
    };

    // Dispatch to command handler
    commands::dispatch(cli.command, &ctx)
}
