//! core::catalog
//!
//! A read-only snapshot of known reference names.
//!
//! The catalog is split into two partitions: names that exist on the local
//! side and names that exist on the remote side. It is produced by an
//! external supplier (see [`CatalogSource`]) and replaced wholesale when the
//! target remote changes; nothing in the core patches it incrementally.
//!
//! Names are kept in sorted sets so every scan over a partition visits names
//! in the same order, which keeps collision reports reproducible.

use std::collections::BTreeSet;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use super::pattern::RefPattern;

/// One half of a [`ReferenceCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    /// References in the local repository.
    Local,
    /// References advertised by the remote.
    Remote,
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Partition::Local => write!(f, "local"),
            Partition::Remote => write!(f, "remote"),
        }
    }
}

/// Snapshot of local and remote reference names.
///
/// # Example
///
/// ```
/// use refmap::core::catalog::{Partition, ReferenceCatalog};
///
/// let catalog = ReferenceCatalog::new(["refs/heads/main"], ["refs/heads/main", "refs/heads/topic"]);
/// assert!(catalog.contains(Partition::Local, "refs/heads/main"));
/// assert!(!catalog.contains(Partition::Local, "refs/heads/topic"));
/// assert_eq!(catalog.names(Partition::Remote).count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceCatalog {
    local: BTreeSet<String>,
    remote: BTreeSet<String>,
}

impl ReferenceCatalog {
    /// Build a catalog from local and remote name lists.
    pub fn new<L, R>(local: L, remote: R) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            local: local.into_iter().map(Into::into).collect(),
            remote: remote.into_iter().map(Into::into).collect(),
        }
    }

    /// The set backing `partition`.
    fn set(&self, partition: Partition) -> &BTreeSet<String> {
        match partition {
            Partition::Local => &self.local,
            Partition::Remote => &self.remote,
        }
    }

    /// Names in `partition`, in sorted order.
    pub fn names(&self, partition: Partition) -> impl Iterator<Item = &str> {
        self.set(partition).iter().map(String::as_str)
    }

    /// Whether `name` is known in `partition`.
    pub fn contains(&self, partition: Partition, name: &str) -> bool {
        self.set(partition).contains(name)
    }

    /// Names in `partition` matched by `pattern`, in sorted order.
    ///
    /// Only the range of names sharing the pattern's fixed prefix is scanned.
    pub fn matching<'a>(
        &'a self,
        partition: Partition,
        pattern: &'a RefPattern,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = pattern.fixed_prefix();
        self.set(partition)
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(String::as_str)
            .take_while(move |name| name.starts_with(prefix))
            .filter(move |name| pattern.matches(name))
    }

    /// Whether any name in `partition` is matched by `pattern`.
    pub fn any_match(&self, partition: Partition, pattern: &RefPattern) -> bool {
        self.matching(partition, pattern).next().is_some()
    }

    pub fn len(&self, partition: Partition) -> usize {
        self.set(partition).len()
    }

    /// Whether both partitions are empty.
    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.remote.is_empty()
    }
}

/// Supplier of [`ReferenceCatalog`] snapshots.
///
/// Implementations list references from wherever they live (a repository on
/// disk, a remote endpoint, a file). The core only ever consumes the result.
pub trait CatalogSource {
    /// Error produced while listing references.
    type Error;

    /// Produce a fresh catalog snapshot.
    fn catalog(&self) -> Result<ReferenceCatalog, Self::Error>;
}

impl CatalogSource for ReferenceCatalog {
    type Error = std::convert::Infallible;

    fn catalog(&self) -> Result<ReferenceCatalog, Self::Error> {
        Ok(self.clone())
    }
}
