//! resolve command - Print the concrete mappings of a valid set

use super::inputs::{describe_failure, Workspace};
use crate::cli::args::SetArgs;
use crate::cli::Context;
use crate::core::report::{evaluate, resolved_mappings};
use crate::ui::output;
use anyhow::{bail, Result};

/// Expand a spec set into concrete `source -> destination` pairs.
pub fn resolve(ctx: &Context, args: &SetArgs, json: bool) -> Result<()> {
    let workspace = Workspace::open(ctx)?;
    let mode = workspace.mode(args.mode);
    let remote = workspace.remote(args.catalog.remote.as_deref())?;
    let catalog = workspace.catalog(ctx, &args.catalog, &remote)?;
    let set = workspace.build_set(ctx, args, mode, &remote)?;

    let Some(mappings) = resolved_mappings(&set, &catalog, mode) else {
        let report = evaluate(&set, &catalog, mode);
        match describe_failure(&set, &report) {
            Some(message) => bail!(message),
            None => bail!("set did not resolve"),
        }
    };

    if json {
        return output::json(&mappings);
    }

    if mappings.is_empty() {
        output::warn("no reference matched", ctx.verbosity);
    }
    for mapping in &mappings {
        println!("{}", mapping);
    }

    Ok(())
}
