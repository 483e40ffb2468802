//! core::presets
//!
//! Predefined spec templates offered alongside manual entry.
//!
//! - [`all_branches`] - every branch, mirrored on push and tracked on fetch
//! - [`all_tags`] - every tag
//! - [`parse_list`] - the persisted list form, one `[+]source:destination`
//!   string per entry
//!
//! Templates are added to a [`SpecSet`](super::set::SpecSet) with
//! `add_if_absent`, so pressing the same template twice is a no-op.

use super::spec::RefSpec;
use super::types::{RemoteName, TypeError, HEADS_PREFIX, TAGS_PREFIX};
use super::validate::Mode;

/// Spec covering every branch.
///
/// Push mirrors `refs/heads/*`; fetch maps it onto the remote's tracking
/// namespace, forced, as `git clone` configures it.
///
/// # Example
///
/// ```
/// use refmap::core::presets::all_branches;
/// use refmap::core::types::RemoteName;
/// use refmap::core::validate::Mode;
///
/// let origin = RemoteName::default();
/// assert_eq!(all_branches(Mode::Push, &origin).to_string(), "refs/heads/*:refs/heads/*");
/// assert_eq!(
///     all_branches(Mode::Fetch, &origin).to_string(),
///     "+refs/heads/*:refs/remotes/origin/*"
/// );
/// ```
pub fn all_branches(mode: Mode, remote: &RemoteName) -> RefSpec {
    let source = format!("{HEADS_PREFIX}*");
    match mode {
        Mode::Push => RefSpec::new(source.as_str(), source.as_str()),
        Mode::Fetch => RefSpec::new(source, format!("{}*", remote.tracking_prefix())).with_force(true),
    }
}

/// Spec covering every tag, in either direction.
pub fn all_tags() -> RefSpec {
    let tags = format!("{TAGS_PREFIX}*");
    RefSpec::new(tags.as_str(), tags.as_str())
}

/// Parse a persisted list of refspec strings, keeping order.
///
/// # Errors
///
/// Returns the first entry that cannot be parsed.
pub fn parse_list<S: AsRef<str>>(entries: &[S]) -> Result<Vec<RefSpec>, TypeError> {
    entries.iter().map(|entry| RefSpec::parse(entry.as_ref())).collect()
}

/// Serialize specs into the persisted list form.
///
/// # Errors
///
/// Returns the first spec without a textual form (see [`RefSpec::to_text`]).
pub fn to_list<'a>(
    specs: impl IntoIterator<Item = &'a RefSpec>,
) -> Result<Vec<String>, TypeError> {
    specs.into_iter().map(RefSpec::to_text).collect()
}
