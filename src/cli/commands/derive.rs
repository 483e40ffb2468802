//! derive command - Replace one side of a refspec

use crate::cli::Context;
use crate::core::spec::RefSpec;
use crate::ui::output;
use anyhow::{bail, Context as _, Result};

/// Replace the source or destination of `spec`, reshaping the other side.
///
/// A side that cannot take the new shape comes out empty; that is reported
/// as a warning and the partial spec is still printed. A result that would
/// read back as a different spec (an emptied source becomes a deletion) is
/// an error.
pub fn derive(
    ctx: &Context,
    spec: &str,
    source: Option<&str>,
    destination: Option<&str>,
) -> Result<()> {
    let spec = RefSpec::parse(spec)?;

    let (derived, reshaped_was_set, reshaped_now) = match (source, destination) {
        (Some(source), _) => {
            let derived = spec.with_source(source);
            let now = derived.destination().is_empty();
            (derived, !spec.destination().is_empty(), now)
        }
        (None, Some(destination)) => {
            let derived = spec.with_destination(destination);
            let now = derived.source().is_some_and(|s| s.is_empty());
            (derived, !spec.source_str().is_empty(), now)
        }
        (None, None) => bail!("Pass --source or --destination"),
    };

    if reshaped_was_set && reshaped_now {
        output::warn(
            format!("could not reshape the other side of '{spec}'"),
            ctx.verbosity,
        );
    }

    let text = derived
        .to_text()
        .context("Failed to write the derived refspec")?;
    println!("{}", text);
    Ok(())
}
