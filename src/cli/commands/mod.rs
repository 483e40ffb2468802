//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Gathers its inputs through [`inputs::Workspace`]
//! 2. Calls into [`crate::core`], which is pure
//! 3. Formats and displays output
//!
//! Handlers never write to the repository. The only file they write is the
//! repo config, through `preset add` and `preset remove`.

mod catalog;
mod check;
mod completion;
mod derive;
mod inputs;
mod preset;
mod propose;
mod resolve;

// Re-export command functions for testing and direct invocation
pub use catalog::catalog;
pub use check::check;
pub use completion::completion;
pub use derive::derive;
pub use preset::{add as preset_add, list as preset_list, remove as preset_remove};
pub use propose::propose;
pub use resolve::resolve;

use crate::cli::args::{Command, PresetAction};
use crate::cli::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Check { set, json } => check::check(ctx, &set, json),
        Command::Resolve { set, json } => resolve::resolve(ctx, &set, json),
        Command::Derive {
            spec,
            source,
            destination,
        } => derive::derive(ctx, &spec, source.as_deref(), destination.as_deref()),
        Command::Propose {
            value,
            side,
            other,
            mode,
            remote,
        } => propose::propose(ctx, &value, side, &other, mode, remote.as_deref()),
        Command::Catalog { catalog, json } => catalog::catalog(ctx, &catalog, json),
        Command::Preset { action } => match action {
            PresetAction::List { mode } => preset::list(ctx, mode),
            PresetAction::Add { spec, mode } => preset::add(ctx, &spec, mode),
            PresetAction::Remove { spec, mode } => preset::remove(ctx, &spec, mode),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}
