//! propose command - Auto-complete the other side of a refspec

use super::inputs::Workspace;
use crate::cli::args::{ModeArg, SideArg};
use crate::cli::Context;
use crate::core::propose::{AutoCompleter, NamingConvention};
use crate::ui::output;
use anyhow::Result;

/// Print a proposal for the side opposite `side`, if there is one.
///
/// No proposal is not an error; nothing is printed to stdout.
pub fn propose(
    ctx: &Context,
    value: &str,
    side: SideArg,
    other: &str,
    mode: Option<ModeArg>,
    remote: Option<&str>,
) -> Result<()> {
    let workspace = Workspace::open(ctx)?;
    let mode = workspace.mode(mode);
    let remote = workspace.remote(remote)?;
    let predefined = workspace.predefined(ctx, mode, &remote);

    output::debug(
        format!("{} predefined {} spec(s)", predefined.len(), mode),
        ctx.verbosity,
    );

    let completer = AutoCompleter::new(mode, &predefined, NamingConvention::new(remote));
    match completer.propose(side.into(), value, other) {
        Some(proposal) => println!("{}", proposal),
        None => output::debug("no proposal", ctx.verbosity),
    }

    Ok(())
}
