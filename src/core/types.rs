//! core::types
//!
//! Strong types for reference names.
//!
//! # Types
//!
//! - [`RefName`] - Validated, fully qualified Git reference name
//! - [`RemoteName`] - Validated remote name (e.g. `origin`)
//!
//! # Namespaces
//!
//! The well-known namespace prefixes live here so that the wildcard algebra,
//! the catalog supplier and the auto-completer agree on them.
//!
//! # Examples
//!
//! ```
//! use refmap::core::types::{RefName, RemoteName};
//!
//! let refname = RefName::new("refs/heads/main").unwrap();
//! assert_eq!(refname.as_str(), "refs/heads/main");
//!
//! let remote = RemoteName::new("origin").unwrap();
//! assert_eq!(remote.tracking_prefix(), "refs/remotes/origin/");
//!
//! assert!(RefName::new("refs/heads/bad..name").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace of local branches.
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Namespace of tags.
pub const TAGS_PREFIX: &str = "refs/tags/";

/// Namespace of remote-tracking branches.
pub const REMOTES_PREFIX: &str = "refs/remotes/";

/// Errors from type validation and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid ref name: {0}")]
    InvalidRefName(String),

    #[error("invalid remote name: {0}")]
    InvalidRemoteName(String),

    #[error("invalid refspec '{spec}': {reason}")]
    InvalidRefSpec { spec: String, reason: String },
}

/// Check a ref name against Git's refname rules (see `git check-ref-format`).
///
/// Returns a short reason on failure. Shared by [`RefName`] and the
/// pattern validator so both reject exactly the same names.
pub(crate) fn check_ref_format(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("ref name cannot be empty".into());
    }

    if name.starts_with('/') {
        return Err("ref name cannot start with '/'".into());
    }

    if name.ends_with('/') {
        return Err("ref name cannot end with '/'".into());
    }
    if name.ends_with('.') {
        return Err("ref name cannot end with '.'".into());
    }
    if name.ends_with(".lock") {
        return Err("ref name cannot end with '.lock'".into());
    }

    if name == "@" {
        return Err("ref name cannot be '@'".into());
    }

    for sequence in ["..", "@{", "//"] {
        if name.contains(sequence) {
            return Err(format!("ref name cannot contain '{sequence}'"));
        }
    }

    const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
    for c in INVALID_CHARS {
        if name.contains(c) {
            return Err(format!("ref name cannot contain '{c}'"));
        }
    }

    if name.chars().any(|c| c.is_ascii_control()) {
        return Err("ref name cannot contain control characters".into());
    }

    for component in name.split('/') {
        if component.starts_with('.') {
            return Err("path component cannot start with '.'".into());
        }
        if component.ends_with(".lock") {
            return Err("path component cannot end with '.lock'".into());
        }
    }

    Ok(())
}

/// A validated Git reference name.
///
/// # Example
///
/// ```
/// use refmap::core::types::RefName;
///
/// let refname = RefName::new("refs/heads/feature/foo").unwrap();
/// assert_eq!(refname.as_str(), "refs/heads/feature/foo");
/// assert!(RefName::new("refs/heads/a..b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RefName(String);

impl RefName {
    /// Create a new validated ref name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRefName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        check_ref_format(&name).map_err(TypeError::InvalidRefName)?;
        Ok(Self(name))
    }

    /// Get the ref name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RefName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RefName> for String {
    fn from(name: RefName) -> Self {
        name.0
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated remote name.
///
/// A remote name must be a single, legal ref path component so that
/// `refs/remotes/<name>/` is a well-formed namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteName(String);

impl RemoteName {
    /// Create a new validated remote name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRemoteName` for empty names, names with a
    /// `/`, or names that are not legal ref components.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidRemoteName(
                "remote name cannot be empty".into(),
            ));
        }
        if name.contains('/') {
            return Err(TypeError::InvalidRemoteName(format!(
                "'{name}' cannot contain '/'"
            )));
        }
        check_ref_format(&format!("{REMOTES_PREFIX}{name}"))
            .map_err(|reason| TypeError::InvalidRemoteName(format!("'{name}': {reason}")))?;
        Ok(Self(name))
    }

    /// The remote-tracking namespace of this remote, e.g. `refs/remotes/origin/`.
    pub fn tracking_prefix(&self) -> String {
        format!("{REMOTES_PREFIX}{}/", self.0)
    }

    /// Get the remote name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RemoteName {
    fn default() -> Self {
        Self("origin".to_string())
    }
}

impl TryFrom<String> for RemoteName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RemoteName> for String {
    fn from(name: RemoteName) -> Self {
        name.0
    }
}

impl std::fmt::Display for RemoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
