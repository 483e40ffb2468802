//! core::pattern
//!
//! One side of a refspec, and the wildcard algebra that keeps the two sides
//! of a mapping in the same shape.
//!
//! # Wildcard Algebra
//!
//! The free functions in this module are the only place wildcard string
//! manipulation happens:
//!
//! - [`is_valid_literal`] - legal ref name, checked under `refs/heads/`
//! - [`is_valid_expression`] - literal, or exactly one `*` that would be legal
//!   once substituted
//! - [`to_wildcard`] - `refs/heads/topic` becomes `refs/heads/*`
//! - [`to_concrete`] - `refs/heads/*` plus `refs/remotes/origin/topic` becomes
//!   `refs/heads/topic`
//! - [`derive_counterpart`] - picks one of the two above from the shape of an
//!   anchor pattern
//!
//! # Example
//!
//! ```
//! use refmap::core::pattern::{to_concrete, to_wildcard, RefPattern};
//!
//! assert_eq!(to_wildcard("refs/heads/topic").as_deref(), Some("refs/heads/*"));
//! assert_eq!(to_concrete("refs/heads/*", "refs/remotes/origin/topic"), "refs/heads/topic");
//!
//! let pattern = RefPattern::new("refs/heads/*");
//! assert!(pattern.matches("refs/heads/feature/x"));
//! assert_eq!(pattern.matched_part("refs/heads/feature/x"), Some("feature/x"));
//! ```

use serde::{Deserialize, Serialize};

use super::types::{check_ref_format, HEADS_PREFIX};

/// The wildcard character.
pub const WILDCARD: char = '*';

/// Legal stand-in for `*` when checking the syntax of a wildcard pattern.
const PLACEHOLDER: char = 'X';

/// Check whether `name` is a syntactically legal reference name.
///
/// The name is checked as if it lived under the branch namespace, so both
/// short names (`main`) and fully qualified ones (`refs/heads/main`) pass.
/// Catalog membership is a separate concern.
pub fn is_valid_literal(name: &str) -> bool {
    check_ref_format(&format!("{HEADS_PREFIX}{name}")).is_ok()
}

/// Check whether `pattern` is a legal literal or single-wildcard expression.
///
/// More than one `*` is never valid.
pub fn is_valid_expression(pattern: &str) -> bool {
    match pattern.matches(WILDCARD).count() {
        0 => is_valid_literal(pattern),
        1 => is_valid_literal(&pattern.replacen(WILDCARD, &PLACEHOLDER.to_string(), 1)),
        _ => false,
    }
}

/// Turn a concrete name into a wildcard over its last path segment.
///
/// Keeps everything up to and including the final `/` and appends `*`.
/// A name that already contains `*` is returned unchanged. Returns `None`
/// when there is no `/` to anchor the wildcard on (including the empty
/// string): such a name cannot be wildcarded.
pub fn to_wildcard(name: &str) -> Option<String> {
    if name.contains(WILDCARD) {
        return Some(name.to_string());
    }
    let slash = name.rfind('/')?;
    Some(format!("{}{WILDCARD}", &name[..=slash]))
}

/// Turn a wildcard into a concrete name using the last segment of `other`.
///
/// The `*` is replaced by whatever follows the final `/` of `other` (all of
/// `other` when it has no `/`). A pattern without `*` is returned unchanged,
/// and an empty `other` yields an empty string.
pub fn to_concrete(wildcard: &str, other: &str) -> String {
    if !wildcard.contains(WILDCARD) {
        return wildcard.to_string();
    }
    if other.is_empty() {
        return String::new();
    }
    let segment = match other.rfind('/') {
        Some(slash) => &other[slash + 1..],
        None => other,
    };
    wildcard.replacen(WILDCARD, segment, 1)
}

/// Re-shape `other` to match the shape of `anchor`.
///
/// A wildcard anchor wildcards `other` ([`to_wildcard`]); a concrete anchor
/// makes `other` concrete by borrowing the anchor's last segment
/// ([`to_concrete`]). Only the shape changes, never content the caller
/// already typed beyond the substituted segment.
pub fn derive_counterpart(anchor: &str, other: &str) -> Option<String> {
    if anchor.contains(WILDCARD) {
        to_wildcard(other)
    } else {
        Some(to_concrete(other, anchor))
    }
}

/// One side of a refspec: empty, a literal name, or a wildcard pattern.
///
/// Patterns are immutable and hold whatever the user typed (trimmed), valid
/// or not. Validity is a question asked of the pattern, never a
/// precondition for building one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefPattern(String);

impl RefPattern {
    /// Create a pattern from user input, trimming surrounding whitespace.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.len() == text.len() {
            Self(text)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The empty pattern.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Get the pattern text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the pattern contains a `*`.
    pub fn is_wildcard(&self) -> bool {
        self.0.contains(WILDCARD)
    }

    /// Whether the pattern is a legal literal or single-wildcard expression.
    pub fn is_valid(&self) -> bool {
        is_valid_expression(&self.0)
    }

    /// The fixed text before and after the `*`, if this is a wildcard.
    pub fn wildcard_parts(&self) -> Option<(&str, &str)> {
        let star = self.0.find(WILDCARD)?;
        Some((&self.0[..star], &self.0[star + 1..]))
    }

    /// The fixed text before the `*` (the whole text for a literal).
    pub fn fixed_prefix(&self) -> &str {
        self.wildcard_parts()
            .map(|(prefix, _)| prefix)
            .unwrap_or(self.0.as_str())
    }

    /// The part of `name` matched by the `*`.
    ///
    /// Returns `None` for literals and for names that do not match. The
    /// matched part is never empty.
    pub fn matched_part<'n>(&self, name: &'n str) -> Option<&'n str> {
        let (prefix, suffix) = self.wildcard_parts()?;
        let rest = name.strip_prefix(prefix)?;
        let middle = rest.strip_suffix(suffix)?;
        if middle.is_empty() {
            None
        } else {
            Some(middle)
        }
    }

    /// Whether `name` is matched by this pattern.
    ///
    /// Literals match by equality; wildcards by fixed prefix and suffix.
    pub fn matches(&self, name: &str) -> bool {
        if self.is_wildcard() {
            self.matched_part(name).is_some()
        } else {
            !self.is_empty() && self.0 == name
        }
    }

    /// Substitute `part` for the `*`. Literals are returned unchanged.
    pub fn expand(&self, part: &str) -> String {
        match self.wildcard_parts() {
            Some((prefix, suffix)) => format!("{prefix}{part}{suffix}"),
            None => self.0.clone(),
        }
    }

    /// See [`to_wildcard`]. An un-wildcardable pattern becomes empty.
    pub fn to_wildcard(&self) -> Self {
        to_wildcard(&self.0).map(Self).unwrap_or_default()
    }

    /// See [`to_concrete`].
    pub fn to_concrete(&self, other: &RefPattern) -> Self {
        Self(to_concrete(&self.0, &other.0))
    }

    /// Re-shape this pattern to the shape of `anchor`.
    pub fn reshaped_like(&self, anchor: &RefPattern) -> Self {
        if anchor.is_wildcard() {
            self.to_wildcard()
        } else {
            self.to_concrete(anchor)
        }
    }
}

impl From<&str> for RefPattern {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for RefPattern {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for RefPattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
