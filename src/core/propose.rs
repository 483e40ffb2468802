//! core::propose
//!
//! Auto-completion of the second side of a spec being created.
//!
//! When a user fills in one side of a new spec, the other side is proposed:
//!
//! - If the other side already has content, only its shape is fixed
//!   (wildcard vs. concrete). Typed content is never replaced.
//! - Otherwise, if the filled side is a legal expression, the predefined
//!   specs are searched for one that maps it, and the first hit is expanded.
//! - Failing that, a naming convention applies: push mirrors the name,
//!   fetch projects `refs/heads/<x>` onto `refs/remotes/<remote>/<x>` (and
//!   back when the destination is the filled side).
//! - Nothing applies: no proposal.

use super::pattern::{is_valid_expression, to_concrete, to_wildcard, WILDCARD};
use super::spec::RefSpec;
use super::types::{RemoteName, HEADS_PREFIX};
use super::validate::Mode;

/// Which side of a spec the user filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Destination,
}

/// Mapping between local branches and a remote's tracking branches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingConvention {
    remote: RemoteName,
}

impl NamingConvention {
    pub fn new(remote: RemoteName) -> Self {
        Self { remote }
    }

    pub fn remote(&self) -> &RemoteName {
        &self.remote
    }

    /// `refs/heads/<x>` to `refs/remotes/<remote>/<x>`.
    pub fn to_tracking(&self, name: &str) -> Option<String> {
        let rest = name.strip_prefix(HEADS_PREFIX)?;
        Some(format!("{}{rest}", self.remote.tracking_prefix()))
    }

    /// `refs/remotes/<remote>/<x>` to `refs/heads/<x>`.
    pub fn from_tracking(&self, name: &str) -> Option<String> {
        let rest = name.strip_prefix(&self.remote.tracking_prefix())?;
        Some(format!("{HEADS_PREFIX}{rest}"))
    }
}

/// Proposes the missing side of a new spec.
///
/// # Example
///
/// ```
/// use refmap::core::propose::{AutoCompleter, NamingConvention, Side};
/// use refmap::core::validate::Mode;
///
/// let completer = AutoCompleter::new(Mode::Fetch, &[], NamingConvention::default());
/// assert_eq!(
///     completer.propose(Side::Source, "refs/heads/main", ""),
///     Some("refs/remotes/origin/main".to_string())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct AutoCompleter<'a> {
    mode: Mode,
    predefined: &'a [RefSpec],
    convention: NamingConvention,
}

impl<'a> AutoCompleter<'a> {
    pub fn new(mode: Mode, predefined: &'a [RefSpec], convention: NamingConvention) -> Self {
        Self {
            mode,
            predefined,
            convention,
        }
    }

    /// Propose a value for the side opposite `filled`.
    ///
    /// `other` is the current content of that opposite side (possibly
    /// empty). Returns `None` when there is nothing sensible to propose.
    pub fn propose(&self, filled: Side, value: &str, other: &str) -> Option<String> {
        let value = value.trim();
        let other = other.trim();
        if value.is_empty() {
            return None;
        }

        if !other.is_empty() {
            return reshape(value, other);
        }

        if !is_valid_expression(value) {
            return None;
        }

        self.from_predefined(filled, value)
            .or_else(|| self.from_convention(filled, value))
    }

    fn from_predefined(&self, filled: Side, value: &str) -> Option<String> {
        self.predefined.iter().find_map(|spec| {
            let proposed = match filled {
                Side::Source => spec
                    .expand_from_source(value)?
                    .destination()
                    .to_string(),
                Side::Destination => spec
                    .expand_from_destination(value)?
                    .source()?
                    .to_string(),
            };
            (!proposed.is_empty()).then_some(proposed)
        })
    }

    fn from_convention(&self, filled: Side, value: &str) -> Option<String> {
        match (self.mode, filled) {
            (Mode::Push, _) => Some(value.to_string()),
            (Mode::Fetch, Side::Source) => self.convention.to_tracking(value),
            (Mode::Fetch, Side::Destination) => self.convention.from_tracking(value),
        }
    }
}

/// Fix the shape of `other` to match `value`.
fn reshape(value: &str, other: &str) -> Option<String> {
    if value.contains(WILDCARD) {
        to_wildcard(other)
    } else {
        Some(to_concrete(other, value))
    }
}
