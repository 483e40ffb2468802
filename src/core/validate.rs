//! core::validate
//!
//! Validation of a single refspec against a [`ReferenceCatalog`].
//!
//! # Rules
//!
//! Rules are checked in order and the first one that applies wins:
//!
//! 1. Non-deletion spec with an empty source: [`Diagnostic::MissingSource`]
//! 2. Push with a literal source not in the local partition:
//!    [`Diagnostic::UnknownLocalRef`]
//! 3. Fetch with a literal source not in the remote partition:
//!    [`Diagnostic::UnknownRemoteRef`]
//! 4. Wildcard source that is not a legal expression:
//!    [`Diagnostic::InvalidExpression`]
//! 5. Empty destination: [`Diagnostic::MissingDeletionTarget`] for deletions,
//!    [`Diagnostic::MissingDestination`] otherwise
//! 6. Destination that is not a legal expression:
//!    [`Diagnostic::InvalidExpression`]
//! 7. Source and destination of different shapes:
//!    [`Diagnostic::WildcardInconsistency`]
//! 8. Deletion of a wildcard: [`Diagnostic::WildcardDeletionForbidden`]
//! 9. Deletion of a name not in the remote partition:
//!    [`Diagnostic::UnknownRemoteRef`]
//!
//! A spec that passes may still carry a non-blocking [`Warning`] when its
//! wildcard source currently matches nothing.
//!
//! Diagnostics are values. Malformed input is a diagnosed condition, never
//! a panic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{Partition, ReferenceCatalog};
use super::spec::RefSpec;

/// Direction of the synchronization the specs describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Local sources are written to remote destinations.
    Push,
    /// Remote sources are written to local destinations.
    Fetch,
}

impl Mode {
    /// The partition that sources are resolved against.
    pub fn source_partition(self) -> Partition {
        match self {
            Mode::Push => Partition::Local,
            Mode::Fetch => Partition::Remote,
        }
    }

    /// The partition that destinations live in.
    pub fn destination_partition(self) -> Partition {
        match self {
            Mode::Push => Partition::Remote,
            Mode::Fetch => Partition::Local,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Push => write!(f, "push"),
            Mode::Fetch => write!(f, "fetch"),
        }
    }
}

/// A blocking problem with a spec or a set of specs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("source reference is required")]
    MissingSource,

    #[error("destination reference is required")]
    MissingDestination,

    #[error("reference to delete is required")]
    MissingDeletionTarget,

    #[error("'{name}' is not a known local reference")]
    UnknownLocalRef { name: String },

    #[error("'{name}' is not a known remote reference")]
    UnknownRemoteRef { name: String },

    #[error("'{expression}' is not a valid reference expression")]
    InvalidExpression { expression: String },

    #[error("cannot delete wildcard '{destination}'")]
    WildcardDeletionForbidden { destination: String },

    #[error("'{from}' and '{to}' must both be wildcards or both be concrete")]
    WildcardInconsistency { from: String, to: String },

    #[error("'{original}' and '{conflicting}' both write to '{destination}'")]
    DuplicateDestination {
        original: RefSpec,
        conflicting: RefSpec,
        destination: String,
    },
}

/// A non-blocking observation about a valid spec.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    #[error("'{pattern}' does not match any {partition} reference")]
    NonMatchingWildcard {
        pattern: String,
        partition: Partition,
    },
}

/// Validate one spec. Returns the first applicable diagnostic, if any.
///
/// # Example
///
/// ```
/// use refmap::core::catalog::ReferenceCatalog;
/// use refmap::core::spec::RefSpec;
/// use refmap::core::validate::{validate, Diagnostic, Mode};
///
/// let catalog = ReferenceCatalog::new(["refs/heads/main"], ["refs/heads/main"]);
/// let spec: RefSpec = "refs/heads/main:refs/heads/main".parse().unwrap();
/// assert_eq!(validate(&spec, &catalog, Mode::Push), None);
///
/// let spec: RefSpec = "refs/heads/nope:refs/heads/main".parse().unwrap();
/// assert!(matches!(
///     validate(&spec, &catalog, Mode::Push),
///     Some(Diagnostic::UnknownLocalRef { .. })
/// ));
/// ```
pub fn validate(spec: &RefSpec, catalog: &ReferenceCatalog, mode: Mode) -> Option<Diagnostic> {
    if let Some(source) = spec.source() {
        if source.is_empty() {
            return Some(Diagnostic::MissingSource);
        }

        if source.is_wildcard() {
            if !source.is_valid() {
                return Some(Diagnostic::InvalidExpression {
                    expression: source.to_string(),
                });
            }
        } else if !catalog.contains(mode.source_partition(), source.as_str()) {
            let name = source.to_string();
            return Some(match mode {
                Mode::Push => Diagnostic::UnknownLocalRef { name },
                Mode::Fetch => Diagnostic::UnknownRemoteRef { name },
            });
        }
    }

    let destination = spec.destination();
    if destination.is_empty() {
        return Some(if spec.is_deletion() {
            Diagnostic::MissingDeletionTarget
        } else {
            Diagnostic::MissingDestination
        });
    }

    if !destination.is_valid() {
        return Some(Diagnostic::InvalidExpression {
            expression: destination.to_string(),
        });
    }

    if !spec.is_shape_consistent() {
        return Some(Diagnostic::WildcardInconsistency {
            from: spec.source_str().to_string(),
            to: destination.to_string(),
        });
    }

    if spec.is_deletion() {
        if destination.is_wildcard() {
            return Some(Diagnostic::WildcardDeletionForbidden {
                destination: destination.to_string(),
            });
        }
        if !catalog.contains(Partition::Remote, destination.as_str()) {
            return Some(Diagnostic::UnknownRemoteRef {
                name: destination.to_string(),
            });
        }
    }

    None
}

/// Informational warning for a spec, independent of [`validate`].
///
/// A legal wildcard source that matches no name in the source partition is
/// allowed but worth surfacing.
pub fn warning(spec: &RefSpec, catalog: &ReferenceCatalog, mode: Mode) -> Option<Warning> {
    let source = spec.source()?;
    if !source.is_wildcard() || !source.is_valid() {
        return None;
    }
    let partition = mode.source_partition();
    if catalog.any_match(partition, source) {
        return None;
    }
    Some(Warning::NonMatchingWildcard {
        pattern: source.to_string(),
        partition,
    })
}
