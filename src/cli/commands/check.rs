//! check command - Validate a set of refspecs

use super::inputs::{describe_failure, Workspace};
use crate::cli::args::SetArgs;
use crate::cli::Context;
use crate::core::report::evaluate;
use crate::ui::output;
use anyhow::{bail, Result};

/// Evaluate a spec set and report the first blocking problem.
///
/// Warnings are printed but never fail the command.
pub fn check(ctx: &Context, args: &SetArgs, json: bool) -> Result<()> {
    let workspace = Workspace::open(ctx)?;
    let mode = workspace.mode(args.mode);
    let remote = workspace.remote(args.catalog.remote.as_deref())?;
    let catalog = workspace.catalog(ctx, &args.catalog, &remote)?;
    let set = workspace.build_set(ctx, args, mode, &remote)?;

    let report = evaluate(&set, &catalog, mode);

    if json {
        output::json(&report)?;
    } else {
        for entry in &report.warnings {
            match set.get(entry.spec) {
                Some(spec) => output::warn(format!("{spec}: {}", entry.warning), ctx.verbosity),
                None => output::warn(&entry.warning, ctx.verbosity),
            }
        }
    }

    if let Some(message) = describe_failure(&set, &report) {
        bail!(message);
    }

    if !json {
        if !report.matches_any_reference {
            output::warn("no reference matched", ctx.verbosity);
        }
        output::print(
            format!("ok: {} {} spec(s)", set.len(), report.mode),
            ctx.verbosity,
        );
    }

    Ok(())
}
