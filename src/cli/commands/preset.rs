//! preset command - Manage saved refspecs

use super::inputs::Workspace;
use crate::cli::args::ModeArg;
use crate::cli::Context;
use crate::core::config::Config;
use crate::core::spec::RefSpec;
use crate::core::validate::Mode;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// List saved refspecs, grouped by mode.
pub fn list(ctx: &Context, mode: Option<ModeArg>) -> Result<()> {
    let workspace = Workspace::open(ctx)?;
    let modes = match mode {
        Some(mode) => vec![mode.into()],
        None => vec![Mode::Push, Mode::Fetch],
    };

    for mode in modes {
        output::print(format!("# {mode}"), ctx.verbosity);
        for spec in workspace.config.predefined(mode) {
            println!("{}", spec);
        }
    }

    Ok(())
}

/// Save a refspec in the repository config.
pub fn add(ctx: &Context, spec: &str, mode: Option<ModeArg>) -> Result<()> {
    let spec = RefSpec::parse(spec)?;
    if !spec.is_shape_consistent() {
        output::warn(
            format!("'{spec}' mixes a wildcard with a concrete name"),
            ctx.verbosity,
        );
    }

    edit(ctx, mode, |specs, mode| {
        if specs.contains(&spec) {
            output::print(format!("Already saved for {mode}: {spec}"), ctx.verbosity);
        } else {
            specs.push(spec.clone());
            output::print(format!("Saved for {mode}: {spec}"), ctx.verbosity);
        }
    })
}

/// Remove a saved refspec from the repository config.
pub fn remove(ctx: &Context, spec: &str, mode: Option<ModeArg>) -> Result<()> {
    let spec = RefSpec::parse(spec)?;
    let mut found = false;

    edit(ctx, mode, |specs, mode| {
        let before = specs.len();
        specs.retain(|saved| saved != &spec);
        found = specs.len() != before;
        if found {
            output::print(format!("Removed from {mode}: {spec}"), ctx.verbosity);
        }
    })?;

    if !found {
        bail!("'{}' is not saved", spec);
    }
    Ok(())
}

/// Load the repo config, apply `change` to one mode's list and write it back.
fn edit(
    ctx: &Context,
    mode: Option<ModeArg>,
    change: impl FnOnce(&mut Vec<RefSpec>, Mode),
) -> Result<()> {
    let workspace = Workspace::open(ctx)?;
    let git = workspace.require_git()?;
    let mode = workspace.mode(mode);

    let mut repo = workspace.config.repo.clone().unwrap_or_default();
    change(&mut repo.specs_mut(mode).specs, mode);

    let path = Config::write_repo(git.git_dir(), &repo).context("Failed to write config")?;
    output::debug(format!("wrote {}", path.display()), ctx.verbosity);
    Ok(())
}
