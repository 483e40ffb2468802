//! core::set
//!
//! The ordered set of specs being edited.
//!
//! Every spec that enters the set gets a [`SpecId`] that stays stable for as
//! long as the entry lives, across edits (`replace`) and removals of other
//! entries. Diagnostics and collision reports refer to entries by id, so two
//! structurally equal specs in the set remain distinguishable.
//!
//! Order is insertion order; it decides which spec is reported as the
//! original owner of a destination and which one as the conflicting one.

use serde::Serialize;

use super::spec::RefSpec;

/// Stable identifier of an entry in a [`SpecSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SpecId(u64);

impl std::fmt::Display for SpecId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered arena of refspecs.
///
/// # Example
///
/// ```
/// use refmap::core::set::SpecSet;
/// use refmap::core::spec::RefSpec;
///
/// let mut set = SpecSet::new();
/// let id = set.add(RefSpec::new("refs/heads/a", "refs/heads/a"));
/// set.replace(id, RefSpec::new("refs/heads/b", "refs/heads/b"));
/// assert_eq!(set.get(id).unwrap().source_str(), "refs/heads/b");
///
/// // Predefined templates are only added once.
/// let template = RefSpec::new("refs/tags/*", "refs/tags/*");
/// assert!(set.add_if_absent(template.clone()).is_some());
/// assert!(set.add_if_absent(template).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SpecSet {
    entries: Vec<(SpecId, RefSpec)>,
    next_id: u64,
}

impl SpecSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a spec and return its id. Equal specs may coexist.
    pub fn add(&mut self, spec: RefSpec) -> SpecId {
        let id = SpecId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, spec));
        id
    }

    /// Append a spec unless a structurally equal one is already present.
    pub fn add_if_absent(&mut self, spec: RefSpec) -> Option<SpecId> {
        if self.contains(&spec) {
            None
        } else {
            Some(self.add(spec))
        }
    }

    /// Append every spec, returning the ids in order.
    pub fn extend(&mut self, specs: impl IntoIterator<Item = RefSpec>) -> Vec<SpecId> {
        specs.into_iter().map(|spec| self.add(spec)).collect()
    }

    /// Whether a structurally equal spec is present.
    pub fn contains(&self, spec: &RefSpec) -> bool {
        self.entries.iter().any(|(_, existing)| existing == spec)
    }

    /// Replace the spec stored under `id`, keeping its position.
    ///
    /// Returns the previous spec, or `None` if `id` is not in the set.
    pub fn replace(&mut self, id: SpecId, spec: RefSpec) -> Option<RefSpec> {
        let slot = self.entries.iter_mut().find(|(entry, _)| *entry == id)?;
        Some(std::mem::replace(&mut slot.1, spec))
    }

    /// Remove the spec stored under `id`.
    pub fn remove(&mut self, id: SpecId) -> Option<RefSpec> {
        let index = self.entries.iter().position(|(entry, _)| *entry == id)?;
        Some(self.entries.remove(index).1)
    }

    /// Remove every spec. Ids are never reused.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: SpecId) -> Option<&RefSpec> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, spec)| spec)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SpecId, &RefSpec)> {
        self.entries.iter().map(|(id, spec)| (*id, spec))
    }

    /// Specs in insertion order.
    pub fn specs(&self) -> impl Iterator<Item = &RefSpec> {
        self.entries.iter().map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set the force flag on every spec.
    pub fn set_force_all(&mut self, force: bool) {
        for (_, spec) in &mut self.entries {
            *spec = spec.with_force(force);
        }
    }

    /// Whether the set is non-empty and every spec is forced.
    pub fn is_force_all(&self) -> bool {
        !self.is_empty() && self.specs().all(RefSpec::is_force)
    }
}

impl FromIterator<RefSpec> for SpecSet {
    fn from_iter<I: IntoIterator<Item = RefSpec>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
