//! catalog command - Show the reference catalog

use super::inputs::Workspace;
use crate::cli::args::CatalogArgs;
use crate::cli::Context;
use crate::core::catalog::Partition;
use crate::ui::output;
use anyhow::Result;

/// Print the local and remote reference names the other commands check against.
pub fn catalog(ctx: &Context, args: &CatalogArgs, json: bool) -> Result<()> {
    let workspace = Workspace::open(ctx)?;
    let remote = workspace.remote(args.remote.as_deref())?;
    let catalog = workspace.catalog(ctx, args, &remote)?;

    if json {
        return output::json(&catalog);
    }

    for partition in [Partition::Local, Partition::Remote] {
        output::print(format!("# {partition}"), ctx.verbosity);
        for name in catalog.names(partition) {
            println!("{}", name);
        }
    }

    Ok(())
}
