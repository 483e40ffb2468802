//! core::spec
//!
//! A refspec: a `source → destination` mapping with a force flag.
//!
//! # Textual Form
//!
//! Refspecs round-trip through configuration in git's `[+]source:destination`
//! form:
//!
//! | Text                               | Meaning                         |
//! |------------------------------------|---------------------------------|
//! | `refs/heads/a:refs/heads/b`        | update `b` from `a`             |
//! | `+refs/heads/*:refs/remotes/o/*`   | forced wildcard mapping         |
//! | `:refs/heads/gone`                 | delete `gone` (no source)       |
//! | `refs/heads/a`                     | source only, destination empty  |
//!
//! Not every spec has a textual form. An empty source in front of a
//! destination reads back as a deletion, a pattern containing `:` splits
//! differently, and an unforced source starting with `+` reads back as
//! forced. [`RefSpec::to_text`] refuses those; serialization goes through it.
//!
//! # Shape Derivation
//!
//! [`RefSpec::with_source`] and [`RefSpec::with_destination`] replace one
//! side and re-shape the other (wildcard vs. concrete) so the two stay
//! consistent. Validation in [`crate::core::validate`] does not depend on
//! whether derivation ran.
//!
//! # Example
//!
//! ```
//! use refmap::core::spec::RefSpec;
//!
//! let spec: RefSpec = "refs/heads/*:refs/remotes/origin/*".parse().unwrap();
//! let concrete = spec.with_source("refs/heads/topic");
//! assert_eq!(concrete.to_string(), "refs/heads/topic:refs/remotes/origin/topic");
//!
//! let deletion: RefSpec = ":refs/heads/gone".parse().unwrap();
//! assert!(deletion.is_deletion());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use super::pattern::RefPattern;
use super::types::TypeError;

/// Prefix marking a forced (non-fast-forward) update.
const FORCE_MARKER: char = '+';

/// Separator between source and destination.
const SEPARATOR: char = ':';

/// An immutable refspec.
///
/// A spec without a source is a *deletion* spec. Specs are replaced, never
/// mutated: every edit produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct RefSpec {
    source: Option<RefPattern>,
    destination: RefPattern,
    force: bool,
}

impl RefSpec {
    /// Create a non-forced update spec.
    pub fn new(source: impl Into<RefPattern>, destination: impl Into<RefPattern>) -> Self {
        Self {
            source: Some(source.into()),
            destination: destination.into(),
            force: false,
        }
    }

    /// Create a spec that deletes `destination` on the other side.
    pub fn deletion(destination: impl Into<RefPattern>) -> Self {
        Self {
            source: None,
            destination: destination.into(),
            force: false,
        }
    }

    /// Parse the `[+]source:destination` form.
    ///
    /// Malformed *patterns* are accepted and left to the validator; only
    /// text that cannot be split into a spec at all is rejected.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRefSpec` for empty input or more than one `:`.
    pub fn parse(text: &str) -> Result<Self, TypeError> {
        let invalid = |reason: &str| TypeError::InvalidRefSpec {
            spec: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(invalid("refspec cannot be empty"));
        }

        let (force, body) = match trimmed.strip_prefix(FORCE_MARKER) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut parts = body.split(SEPARATOR);
        let left = parts.next().unwrap_or_default();
        let right = parts.next();
        if parts.next().is_some() {
            return Err(invalid("refspec cannot contain more than one ':'"));
        }

        let spec = match right {
            None => Self::new(left, RefPattern::empty()),
            Some(right) if left.trim().is_empty() => Self::deletion(right),
            Some(right) => Self::new(left, right),
        };
        Ok(spec.with_force(force))
    }

    /// The source pattern; `None` for deletion specs.
    pub fn source(&self) -> Option<&RefPattern> {
        self.source.as_ref()
    }

    /// The source text, empty for deletion specs.
    pub fn source_str(&self) -> &str {
        self.source.as_ref().map(RefPattern::as_str).unwrap_or("")
    }

    pub fn destination(&self) -> &RefPattern {
        &self.destination
    }

    pub fn is_force(&self) -> bool {
        self.force
    }

    /// Whether this spec deletes its destination.
    pub fn is_deletion(&self) -> bool {
        self.source.is_none()
    }

    /// Whether either side is a wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.destination.is_wildcard() || self.source.as_ref().is_some_and(RefPattern::is_wildcard)
    }

    /// Whether both sides, when both are filled in, have the same shape.
    pub fn is_shape_consistent(&self) -> bool {
        match &self.source {
            Some(source) if !source.is_empty() && !self.destination.is_empty() => {
                source.is_wildcard() == self.destination.is_wildcard()
            }
            _ => true,
        }
    }

    /// Return a copy with the force flag set to `force`.
    pub fn with_force(&self, force: bool) -> Self {
        Self {
            force,
            ..self.clone()
        }
    }

    /// Replace the source and re-shape the destination to match.
    ///
    /// A wildcard source wildcards the destination; a concrete source makes
    /// a wildcard destination concrete using the source's last segment.
    pub fn with_source(&self, source: impl Into<RefPattern>) -> Self {
        let source = source.into();
        let destination = self.destination.reshaped_like(&source);
        Self {
            source: Some(source),
            destination,
            force: self.force,
        }
    }

    /// Replace the destination and re-shape the source to match.
    ///
    /// Deletion specs stay deletion specs.
    pub fn with_destination(&self, destination: impl Into<RefPattern>) -> Self {
        let destination = destination.into();
        let source = self
            .source
            .as_ref()
            .map(|source| source.reshaped_like(&destination));
        Self {
            source,
            destination,
            force: self.force,
        }
    }

    /// The `[+]source:destination` text that parses back to this spec.
    ///
    /// [`Display`](std::fmt::Display) always renders something; this is the
    /// form to persist.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRefSpec` when no text parses back to this
    /// spec.
    pub fn to_text(&self) -> Result<String, TypeError> {
        let text = self.to_string();
        match self.unwritable_reason() {
            Some(reason) => Err(TypeError::InvalidRefSpec {
                spec: text,
                reason: reason.to_string(),
            }),
            None => Ok(text),
        }
    }

    fn unwritable_reason(&self) -> Option<&'static str> {
        let source = self.source_str();
        if source.contains(SEPARATOR) || self.destination.as_str().contains(SEPARATOR) {
            return Some("a pattern cannot contain ':'");
        }
        if self.is_deletion() {
            return None;
        }
        if source.is_empty() && !self.destination.is_empty() {
            Some("an empty source would read back as a deletion")
        } else if source.is_empty() && !self.force {
            Some("refspec cannot be empty")
        } else if source.starts_with(FORCE_MARKER) && !self.force {
            Some("a source starting with '+' would read back as forced")
        } else {
            None
        }
    }

    /// The concrete spec this spec produces for source `name`.
    ///
    /// The whole part matched by the source `*` is carried over to the
    /// destination. Returns `None` if `name` does not match the source.
    pub fn expand_from_source(&self, name: &str) -> Option<Self> {
        let source = self.source.as_ref()?;
        if !source.is_wildcard() {
            return source.matches(name).then(|| self.clone());
        }
        let part = source.matched_part(name)?;
        Some(Self {
            source: Some(RefPattern::new(name)),
            destination: RefPattern::new(self.destination.expand(part)),
            force: self.force,
        })
    }

    /// The concrete spec this spec produces for destination `name`.
    ///
    /// Returns `None` if `name` does not match the destination.
    pub fn expand_from_destination(&self, name: &str) -> Option<Self> {
        if !self.destination.is_wildcard() {
            return self.destination.matches(name).then(|| self.clone());
        }
        let part = self.destination.matched_part(name)?;
        Some(Self {
            source: self
                .source
                .as_ref()
                .map(|source| RefPattern::new(source.expand(part))),
            destination: RefPattern::new(name),
            force: self.force,
        })
    }
}

impl FromStr for RefSpec {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RefSpec {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl Serialize for RefSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = self.to_text().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl std::fmt::Display for RefSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.force {
            write!(f, "{FORCE_MARKER}")?;
        }
        match &self.source {
            None => write!(f, "{SEPARATOR}{}", self.destination),
            Some(source) if self.destination.is_empty() => write!(f, "{source}"),
            Some(source) => write!(f, "{source}{SEPARATOR}{}", self.destination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse {
        use super::*;

        #[test]
        fn plain_mapping() {
            let spec = RefSpec::parse("refs/heads/a:refs/heads/b").unwrap();
            assert_eq!(spec.source_str(), "refs/heads/a");
            assert_eq!(spec.destination().as_str(), "refs/heads/b");
            assert!(!spec.is_force());
            assert!(!spec.is_deletion());
        }

        #[test]
        fn forced_mapping() {
            let spec = RefSpec::parse("+refs/heads/*:refs/remotes/origin/*").unwrap();
            assert!(spec.is_force());
            assert!(spec.is_wildcard());
        }

        #[test]
        fn deletion() {
            let spec = RefSpec::parse(":refs/heads/topic").unwrap();
            assert!(spec.is_deletion());
            assert_eq!(spec.source(), None);
            assert_eq!(spec.destination().as_str(), "refs/heads/topic");
        }

        #[test]
        fn source_only() {
            let spec = RefSpec::parse("refs/heads/a").unwrap();
            assert_eq!(spec.source_str(), "refs/heads/a");
            assert!(spec.destination().is_empty());
        }

        #[test]
        fn trailing_separator_means_empty_destination() {
            let spec = RefSpec::parse("refs/heads/a:").unwrap();
            assert!(spec.destination().is_empty());
            assert_eq!(spec.to_string(), "refs/heads/a");
        }

        #[test]
        fn surrounding_whitespace_trimmed() {
            let spec = RefSpec::parse("  refs/heads/a : refs/heads/b ").unwrap();
            assert_eq!(spec.to_string(), "refs/heads/a:refs/heads/b");
        }

        #[test]
        fn malformed_patterns_are_kept() {
            let spec = RefSpec::parse("refs/*/*:refs/heads/x").unwrap();
            assert_eq!(spec.source_str(), "refs/*/*");
        }

        #[test]
        fn empty_rejected() {
            assert!(RefSpec::parse("").is_err());
            assert!(RefSpec::parse("   ").is_err());
        }

        #[test]
        fn extra_separator_rejected() {
            let err = RefSpec::parse("a:b:c").unwrap_err();
            assert!(err.to_string().contains("more than one ':'"));
        }
    }

    mod serialize {
        use super::*;

        #[test]
        fn round_trips() {
            for text in [
                "refs/heads/a:refs/heads/b",
                "+refs/heads/a:refs/heads/b",
                ":refs/heads/topic",
                "+:refs/heads/topic",
                "refs/heads/*:refs/remotes/origin/*",
                "refs/heads/a",
                ":",
            ] {
                let spec = RefSpec::parse(text).unwrap();
                assert_eq!(spec.to_text().unwrap(), text);
                assert_eq!(RefSpec::parse(&spec.to_string()).unwrap(), spec);
            }
        }

        #[test]
        fn cleared_source_has_no_text() {
            let spec = RefSpec::new("refs/heads/a", "refs/heads/a").with_source("");
            assert!(!spec.is_deletion());
            assert_eq!(spec.to_string(), ":refs/heads/a");

            let err = spec.to_text().unwrap_err();
            assert!(err.to_string().contains("read back as a deletion"));
            assert!(serde_json::to_string(&spec).is_err());
        }

        #[test]
        fn unforced_plus_source_has_no_text() {
            let spec = RefSpec::new("+x", "refs/heads/y");
            assert!(RefSpec::parse(&spec.to_string()).unwrap().is_force());
            assert!(spec.to_text().is_err());

            let forced = spec.with_force(true);
            assert_eq!(forced.to_text().unwrap(), "++x:refs/heads/y");
            assert_eq!(RefSpec::parse("++x:refs/heads/y").unwrap(), forced);
        }

        #[test]
        fn separator_in_pattern_has_no_text() {
            assert!(RefSpec::new("a:b", "refs/heads/c").to_text().is_err());
            assert!(RefSpec::deletion("a:b").to_text().is_err());
        }

        #[test]
        fn empty_spec_text() {
            assert!(RefSpec::new("", "").to_text().is_err());
            let forced = RefSpec::new("", "").with_force(true);
            assert_eq!(forced.to_text().unwrap(), "+");
            assert_eq!(RefSpec::parse("+").unwrap(), forced);
        }

        #[test]
        fn serde_as_string() {
            let spec = RefSpec::parse("+refs/heads/*:refs/heads/*").unwrap();
            let json = serde_json::to_string(&spec).unwrap();
            assert_eq!(json, "\"+refs/heads/*:refs/heads/*\"");
            let parsed: RefSpec = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, spec);
        }
    }

    mod derivation {
        use super::*;

        #[test]
        fn wildcard_source_wildcards_destination() {
            let spec = RefSpec::new("refs/heads/a", "refs/remotes/origin/a");
            let derived = spec.with_source("refs/heads/*");
            assert_eq!(derived.destination().as_str(), "refs/remotes/origin/*");
        }

        #[test]
        fn concrete_source_concretes_destination() {
            let spec = RefSpec::new("refs/heads/*", "refs/remotes/origin/*");
            let derived = spec.with_source("refs/heads/topic");
            assert_eq!(
                derived.destination().as_str(),
                "refs/remotes/origin/topic"
            );
        }

        #[test]
        fn concrete_source_keeps_concrete_destination() {
            let spec = RefSpec::new("refs/heads/a", "refs/heads/custom");
            let derived = spec.with_source("refs/heads/b");
            assert_eq!(derived.destination().as_str(), "refs/heads/custom");
        }

        #[test]
        fn destination_edit_reshapes_source() {
            let spec = RefSpec::new("refs/heads/topic", "refs/heads/topic");
            let derived = spec.with_destination("refs/heads/*");
            assert_eq!(derived.source_str(), "refs/heads/*");

            let back = derived.with_destination("refs/heads/other");
            assert_eq!(back.source_str(), "refs/heads/other");
        }

        #[test]
        fn deletion_stays_deletion() {
            let spec = RefSpec::deletion("refs/heads/a");
            let derived = spec.with_destination("refs/heads/b");
            assert!(derived.is_deletion());
        }

        #[test]
        fn unwildcardable_counterpart_is_cleared() {
            let spec = RefSpec::new("main", "main");
            let derived = spec.with_source("refs/heads/*");
            assert!(derived.destination().is_empty());
        }

        #[test]
        fn force_preserved() {
            let spec = RefSpec::new("refs/heads/a", "refs/heads/a").with_force(true);
            assert!(spec.with_source("refs/heads/b").is_force());
            assert!(spec.with_destination("refs/heads/b").is_force());
        }

        #[test]
        fn reapplying_source_is_identity() {
            let spec = RefSpec::new("refs/heads/*", "refs/remotes/origin/*");
            assert_eq!(spec.with_source(spec.source_str()), spec);
            let spec = RefSpec::new("refs/heads/a", "refs/heads/b");
            assert_eq!(spec.with_source(spec.source_str()), spec);
        }

        #[test]
        fn shape_consistency() {
            assert!(RefSpec::new("refs/heads/*", "refs/heads/*").is_shape_consistent());
            assert!(!RefSpec::new("refs/heads/*", "refs/heads/topic").is_shape_consistent());
            assert!(RefSpec::new("refs/heads/*", "").is_shape_consistent());
            assert!(RefSpec::deletion("refs/heads/x").is_shape_consistent());
        }
    }

    mod expansion {
        use super::*;

        #[test]
        fn from_source_carries_full_match() {
            let spec = RefSpec::new("refs/heads/*", "refs/remotes/origin/*").with_force(true);
            let expanded = spec.expand_from_source("refs/heads/a/b").unwrap();
            assert_eq!(expanded.to_string(), "+refs/heads/a/b:refs/remotes/origin/a/b");
        }

        #[test]
        fn from_source_non_matching() {
            let spec = RefSpec::new("refs/heads/*", "refs/remotes/origin/*");
            assert_eq!(spec.expand_from_source("refs/tags/v1"), None);
            assert_eq!(RefSpec::deletion("refs/heads/a").expand_from_source("x"), None);
        }

        #[test]
        fn from_source_literal() {
            let spec = RefSpec::new("refs/heads/a", "refs/heads/b");
            assert_eq!(spec.expand_from_source("refs/heads/a"), Some(spec.clone()));
            assert_eq!(spec.expand_from_source("refs/heads/b"), None);
        }

        #[test]
        fn from_destination() {
            let spec = RefSpec::new("refs/heads/*", "refs/remotes/origin/*");
            let expanded = spec
                .expand_from_destination("refs/remotes/origin/topic")
                .unwrap();
            assert_eq!(expanded.source_str(), "refs/heads/topic");
        }
    }
}
