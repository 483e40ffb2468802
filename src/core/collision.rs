//! core::collision
//!
//! Destination collision detection across a whole [`SpecSet`].
//!
//! # Algorithm
//!
//! Specs are visited in set order. A spec with a concrete destination claims
//! that destination directly. A spec with a wildcard destination is expanded
//! against the source partition of the catalog (local names for push, remote
//! names for fetch) and claims every expanded destination. The first spec to
//! claim a destination owns it; the first later spec claiming the same
//! destination is reported together with the owner and the scan stops.
//!
//! Ownership is tracked by [`SpecId`], so two equal specs at different
//! positions still collide with each other.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;

use super::catalog::ReferenceCatalog;
use super::set::{SpecId, SpecSet};
use super::spec::RefSpec;
use super::validate::Mode;

/// One concrete `source → destination` pair produced by a spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mapping {
    /// The spec this mapping came from.
    pub spec: SpecId,
    /// Concrete source; `None` for deletions.
    pub source: Option<String>,
    pub destination: String,
    pub force: bool,
}

impl std::fmt::Display for Mapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.force { "+" } else { "" };
        match &self.source {
            Some(source) => write!(f, "{marker}{source} -> {}", self.destination),
            None => write!(f, "{marker}(delete) -> {}", self.destination),
        }
    }
}

/// Two specs that write to the same destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// The spec that claimed the destination first.
    pub original: SpecId,
    /// The later spec that claimed it again.
    pub conflicting: SpecId,
    pub destination: String,
}

/// Outcome of [`check_set`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollisionReport {
    /// Whether at least one destination was claimed.
    pub matches_any_reference: bool,
    pub conflict: Option<Conflict>,
}

/// The concrete mappings a single spec produces.
///
/// Concrete destinations produce at most one mapping (none when the
/// destination is empty). Wildcard destinations produce one mapping per
/// catalog name matched by a wildcard source, in catalog order.
pub fn expand(id: SpecId, spec: &RefSpec, catalog: &ReferenceCatalog, mode: Mode) -> Vec<Mapping> {
    let destination = spec.destination();
    if destination.is_empty() {
        return Vec::new();
    }

    if !destination.is_wildcard() {
        return vec![Mapping {
            spec: id,
            source: spec.source().map(ToString::to_string),
            destination: destination.to_string(),
            force: spec.is_force(),
        }];
    }

    let Some(source) = spec.source().filter(|source| source.is_wildcard()) else {
        return Vec::new();
    };

    // The whole matched part is substituted, as git does; `to_concrete` keeps
    // only the last segment and is for reshaping typed text.
    catalog
        .matching(mode.source_partition(), source)
        .filter_map(|name| {
            let part = source.matched_part(name)?;
            Some(Mapping {
                spec: id,
                source: Some(name.to_string()),
                destination: destination.expand(part),
                force: spec.is_force(),
            })
        })
        .collect()
}

/// Every concrete mapping the set produces, in set order then catalog order.
pub fn resolve(set: &SpecSet, catalog: &ReferenceCatalog, mode: Mode) -> Vec<Mapping> {
    set.iter()
        .flat_map(|(id, spec)| expand(id, spec, catalog, mode))
        .collect()
}

/// Find the first pair of specs whose resolved destinations collide.
///
/// # Example
///
/// ```
/// use refmap::core::catalog::ReferenceCatalog;
/// use refmap::core::collision::check_set;
/// use refmap::core::set::SpecSet;
/// use refmap::core::spec::RefSpec;
/// use refmap::core::validate::Mode;
///
/// let catalog = ReferenceCatalog::new(["refs/heads/a", "refs/heads/b"], Vec::<String>::new());
/// let mut set = SpecSet::new();
/// let first = set.add("refs/heads/a:refs/heads/a".parse().unwrap());
/// let second = set.add("refs/heads/b:refs/heads/a".parse().unwrap());
///
/// let report = check_set(&set, &catalog, Mode::Push);
/// let conflict = report.conflict.unwrap();
/// assert_eq!(conflict.original, first);
/// assert_eq!(conflict.conflicting, second);
/// assert_eq!(conflict.destination, "refs/heads/a");
/// ```
pub fn check_set(set: &SpecSet, catalog: &ReferenceCatalog, mode: Mode) -> CollisionReport {
    let mut owners: HashMap<String, SpecId> = HashMap::new();

    for (id, spec) in set.iter() {
        for mapping in expand(id, spec, catalog, mode) {
            match owners.entry(mapping.destination) {
                Entry::Occupied(entry) if *entry.get() != id => {
                    let original = *entry.get();
                    let destination = entry.key().clone();
                    return CollisionReport {
                        matches_any_reference: true,
                        conflict: Some(Conflict {
                            original,
                            conflicting: id,
                            destination,
                        }),
                    };
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(id);
                }
            }
        }
    }

    CollisionReport {
        matches_any_reference: !owners.is_empty(),
        conflict: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(texts: &[&str]) -> (SpecSet, Vec<SpecId>) {
        let mut set = SpecSet::new();
        let ids = texts
            .iter()
            .map(|text| set.add(RefSpec::parse(text).unwrap()))
            .collect();
        (set, ids)
    }

    fn catalog() -> ReferenceCatalog {
        ReferenceCatalog::new(
            ["refs/heads/a", "refs/heads/b", "refs/heads/c/d"],
            ["refs/heads/main", "refs/heads/topic"],
        )
    }

    mod expansion {
        use super::*;

        #[test]
        fn literal_destination() {
            let (set, ids) = set(&["+refs/heads/a:refs/heads/x"]);
            let mappings = resolve(&set, &catalog(), Mode::Push);
            assert_eq!(
                mappings,
                vec![Mapping {
                    spec: ids[0],
                    source: Some("refs/heads/a".into()),
                    destination: "refs/heads/x".into(),
                    force: true,
                }]
            );
        }

        #[test]
        fn deletion_has_no_source() {
            let (set, _) = set(&[":refs/heads/gone"]);
            let mappings = resolve(&set, &catalog(), Mode::Push);
            assert_eq!(mappings[0].source, None);
            assert_eq!(mappings[0].to_string(), "(delete) -> refs/heads/gone");
        }

        #[test]
        fn wildcard_uses_source_partition() {
            let (set, _) = set(&["refs/heads/*:refs/remotes/origin/*"]);
            let push: Vec<_> = resolve(&set, &catalog(), Mode::Push)
                .into_iter()
                .map(|m| m.destination)
                .collect();
            assert_eq!(
                push,
                vec![
                    "refs/remotes/origin/a",
                    "refs/remotes/origin/b",
                    "refs/remotes/origin/c/d"
                ]
            );

            let fetch: Vec<_> = resolve(&set, &catalog(), Mode::Fetch)
                .into_iter()
                .map(|m| m.destination)
                .collect();
            assert_eq!(
                fetch,
                vec!["refs/remotes/origin/main", "refs/remotes/origin/topic"]
            );
        }

        #[test]
        fn empty_destination_produces_nothing() {
            let (set, _) = set(&["refs/heads/a"]);
            assert!(resolve(&set, &catalog(), Mode::Push).is_empty());
        }

        #[test]
        fn wildcard_destination_with_literal_source_produces_nothing() {
            let (set, _) = set(&["refs/heads/a:refs/heads/*"]);
            assert!(resolve(&set, &catalog(), Mode::Push).is_empty());
        }
    }

    mod conflicts {
        use super::*;

        #[test]
        fn literal_collision_reports_first_owner() {
            let (set, ids) = set(&["refs/heads/a:refs/heads/a", "refs/heads/b:refs/heads/a"]);
            let report = check_set(&set, &catalog(), Mode::Push);
            assert_eq!(
                report.conflict,
                Some(Conflict {
                    original: ids[0],
                    conflicting: ids[1],
                    destination: "refs/heads/a".into(),
                })
            );
            assert!(report.matches_any_reference);
        }

        #[test]
        fn equal_specs_collide() {
            let (set, ids) = set(&["refs/heads/a:refs/heads/a", "refs/heads/a:refs/heads/a"]);
            let conflict = check_set(&set, &catalog(), Mode::Push).conflict.unwrap();
            assert_eq!((conflict.original, conflict.conflicting), (ids[0], ids[1]));
        }

        #[test]
        fn collision_visible_only_after_expansion() {
            let (set, ids) = set(&["refs/heads/*:refs/heads/*", "refs/heads/x:refs/heads/b"]);
            let conflict = check_set(&set, &catalog(), Mode::Push).conflict.unwrap();
            assert_eq!(conflict.original, ids[0]);
            assert_eq!(conflict.conflicting, ids[1]);
            assert_eq!(conflict.destination, "refs/heads/b");
        }

        #[test]
        fn two_wildcards_collide_on_first_shared_name() {
            let (set, ids) = set(&[
                "refs/heads/*:refs/remotes/origin/*",
                "refs/heads/*:refs/remotes/origin/*",
            ]);
            let conflict = check_set(&set, &catalog(), Mode::Push).conflict.unwrap();
            assert_eq!(conflict.original, ids[0]);
            assert_eq!(conflict.conflicting, ids[1]);
            assert_eq!(conflict.destination, "refs/remotes/origin/a");
        }

        #[test]
        fn deletion_collides_with_update() {
            let (set, ids) = set(&["refs/heads/a:refs/heads/a", ":refs/heads/a"]);
            let conflict = check_set(&set, &catalog(), Mode::Push).conflict.unwrap();
            assert_eq!(conflict.conflicting, ids[1]);
        }

        #[test]
        fn disjoint_destinations() {
            let (set, _) = set(&["refs/heads/a:refs/heads/a", "refs/heads/b:refs/heads/b"]);
            let report = check_set(&set, &catalog(), Mode::Push);
            assert_eq!(report.conflict, None);
            assert!(report.matches_any_reference);
        }

        #[test]
        fn unmatched_wildcard_matches_nothing() {
            let (set, _) = set(&["refs/tags/*:refs/tags/*"]);
            let report = check_set(&set, &catalog(), Mode::Push);
            assert_eq!(report, CollisionReport::default());
        }

        #[test]
        fn empty_set() {
            let report = check_set(&SpecSet::new(), &catalog(), Mode::Fetch);
            assert!(!report.matches_any_reference);
            assert!(report.conflict.is_none());
        }
    }
}
