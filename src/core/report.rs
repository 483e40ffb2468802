//! core::report
//!
//! Whole-set evaluation: the single current diagnostic for a spec set.
//!
//! # Lifecycle
//!
//! 1. Validate every spec in set order; the first diagnostic wins and the
//!    offending spec is remembered.
//! 2. Only when every spec is individually valid, run collision detection;
//!    a conflict becomes a [`Diagnostic::DuplicateDestination`] blamed on the
//!    original owner.
//! 3. Warnings are collected for every individually valid spec, regardless
//!    of the outcome of the steps above. They never block.
//!
//! The report is recomputed from scratch on every call; nothing is cached
//! between calls.

use serde::Serialize;

use super::catalog::ReferenceCatalog;
use super::collision::{check_set, resolve, Mapping};
use super::set::{SpecId, SpecSet};
use super::validate::{validate, warning, Diagnostic, Mode, Warning};

/// A warning attached to the spec it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecWarning {
    pub spec: SpecId,
    pub warning: Warning,
}

/// Outcome of evaluating a whole set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetReport {
    pub mode: Mode,
    /// The current blocking diagnostic, if any.
    pub diagnostic: Option<Diagnostic>,
    /// The spec the diagnostic is about.
    pub offending: Option<SpecId>,
    pub warnings: Vec<SpecWarning>,
    /// Whether the set resolves to at least one concrete mapping.
    pub matches_any_reference: bool,
}

impl SetReport {
    /// Whether the set can be submitted.
    pub fn is_ok(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// Evaluate a set against a catalog.
///
/// # Example
///
/// ```
/// use refmap::core::catalog::ReferenceCatalog;
/// use refmap::core::report::evaluate;
/// use refmap::core::set::SpecSet;
/// use refmap::core::validate::Mode;
///
/// let catalog = ReferenceCatalog::new(["refs/heads/main"], Vec::<String>::new());
/// let mut set = SpecSet::new();
/// set.add("refs/heads/main:refs/heads/main".parse().unwrap());
///
/// let report = evaluate(&set, &catalog, Mode::Push);
/// assert!(report.is_ok());
/// assert!(report.matches_any_reference);
/// ```
pub fn evaluate(set: &SpecSet, catalog: &ReferenceCatalog, mode: Mode) -> SetReport {
    let mut diagnostic = None;
    let mut offending = None;
    let mut warnings = Vec::new();

    for (id, spec) in set.iter() {
        match validate(spec, catalog, mode) {
            Some(found) => {
                if diagnostic.is_none() {
                    diagnostic = Some(found);
                    offending = Some(id);
                }
            }
            None => {
                if let Some(warning) = warning(spec, catalog, mode) {
                    warnings.push(SpecWarning { spec: id, warning });
                }
            }
        }
    }

    let collisions = check_set(set, catalog, mode);
    if diagnostic.is_none() {
        if let Some(conflict) = collisions.conflict {
            if let (Some(original), Some(conflicting)) =
                (set.get(conflict.original), set.get(conflict.conflicting))
            {
                diagnostic = Some(Diagnostic::DuplicateDestination {
                    original: original.clone(),
                    conflicting: conflicting.clone(),
                    destination: conflict.destination,
                });
                offending = Some(conflict.original);
            }
        }
    }

    SetReport {
        mode,
        diagnostic,
        offending,
        warnings,
        matches_any_reference: collisions.matches_any_reference,
    }
}

/// The concrete mappings of a set that evaluated cleanly.
///
/// Returns `None` when the set has a blocking diagnostic.
pub fn resolved_mappings(
    set: &SpecSet,
    catalog: &ReferenceCatalog,
    mode: Mode,
) -> Option<Vec<Mapping>> {
    evaluate(set, catalog, mode)
        .is_ok()
        .then(|| resolve(set, catalog, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::spec::RefSpec;

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::new(
            ["refs/heads/a", "refs/heads/b"],
            ["refs/heads/a", "refs/heads/old"],
        )
    }

    fn set(texts: &[&str]) -> (SpecSet, Vec<SpecId>) {
        let mut set = SpecSet::new();
        let ids = texts
            .iter()
            .map(|text| set.add(RefSpec::parse(text).unwrap()))
            .collect();
        (set, ids)
    }

    #[test]
    fn clean_set() {
        let (set, _) = set(&["refs/heads/a:refs/heads/a", ":refs/heads/old"]);
        let report = evaluate(&set, &catalog(), Mode::Push);
        assert!(report.is_ok());
        assert_eq!(report.offending, None);
        assert!(report.matches_any_reference);
    }

    #[test]
    fn first_invalid_spec_wins() {
        let (set, ids) = set(&[
            "refs/heads/a:refs/heads/a",
            "refs/heads/missing:refs/heads/x",
            "refs/heads/b",
        ]);
        let report = evaluate(&set, &catalog(), Mode::Push);
        assert_eq!(report.offending, Some(ids[1]));
        assert!(matches!(
            report.diagnostic,
            Some(Diagnostic::UnknownLocalRef { .. })
        ));
    }

    #[test]
    fn collision_reported_after_validation() {
        let (set, ids) = set(&["refs/heads/a:refs/heads/x", "refs/heads/b:refs/heads/x"]);
        let report = evaluate(&set, &catalog(), Mode::Push);
        assert_eq!(report.offending, Some(ids[0]));
        match report.diagnostic {
            Some(Diagnostic::DuplicateDestination {
                original,
                conflicting,
                destination,
            }) => {
                assert_eq!(original.to_string(), "refs/heads/a:refs/heads/x");
                assert_eq!(conflicting.to_string(), "refs/heads/b:refs/heads/x");
                assert_eq!(destination, "refs/heads/x");
            }
            other => panic!("expected duplicate destination, got {other:?}"),
        }
    }

    #[test]
    fn validation_error_masks_collision() {
        let (set, ids) = set(&[
            "refs/heads/a:refs/heads/x",
            "refs/heads/b:refs/heads/x",
            "refs/heads/nope:refs/heads/y",
        ]);
        let report = evaluate(&set, &catalog(), Mode::Push);
        assert_eq!(report.offending, Some(ids[2]));
    }

    #[test]
    fn warnings_do_not_block() {
        let (set, ids) = set(&["refs/tags/*:refs/tags/*"]);
        let report = evaluate(&set, &catalog(), Mode::Push);
        assert!(report.is_ok());
        assert!(!report.matches_any_reference);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].spec, ids[0]);
    }

    #[test]
    fn mappings_only_for_clean_sets() {
        let (clean, _) = set(&["refs/heads/*:refs/remotes/origin/*"]);
        let mappings = resolved_mappings(&clean, &catalog(), Mode::Push).unwrap();
        assert_eq!(mappings.len(), 2);

        let (broken, _) = set(&["refs/heads/*:refs/heads/x"]);
        assert!(resolved_mappings(&broken, &catalog(), Mode::Push).is_none());
    }

    #[test]
    fn report_serializes() {
        let (set, _) = set(&["refs/heads/b"]);
        let json = serde_json::to_value(evaluate(&set, &catalog(), Mode::Push)).unwrap();
        assert_eq!(json["mode"], "push");
        assert_eq!(json["diagnostic"]["kind"], "missing_destination");
        assert_eq!(json["offending"], 0);
    }
}
