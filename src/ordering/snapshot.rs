//! Copies of whole parents taken before a reorder.

use super::Positioned;
use std::collections::{BTreeMap, BTreeSet};

/// The children of a set of parents, in display order, as they were when
/// captured.
///
/// Produced by [`PositionedCollection::capture`] and consumed by
/// [`PositionedCollection::restore`].
///
/// [`PositionedCollection::capture`]: super::PositionedCollection::capture
/// [`PositionedCollection::restore`]: super::PositionedCollection::restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSnapshot<T: Positioned> {
    parents: BTreeMap<T::ParentKey, Vec<T>>,
}

impl<T: Positioned> Default for ParentSnapshot<T> {
    fn default() -> Self {
        Self {
            parents: BTreeMap::new(),
        }
    }
}

impl<T: Positioned> ParentSnapshot<T> {
    pub(super) const fn new(parents: BTreeMap<T::ParentKey, Vec<T>>) -> Self {
        Self { parents }
    }

    pub(super) fn into_parents(self) -> BTreeMap<T::ParentKey, Vec<T>> {
        self.parents
    }

    /// Returns the number of captured items across all parents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.values().map(Vec::len).sum()
    }

    /// Returns `true` when no item was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.values().all(Vec::is_empty)
    }

    /// Returns the captured parent keys, including parents that were empty.
    #[must_use]
    pub fn parents(&self) -> BTreeSet<T::ParentKey> {
        self.parents.keys().copied().collect()
    }

    /// Returns the ids of every captured item.
    #[must_use]
    pub fn ids(&self) -> BTreeSet<T::Id> {
        self.items().map(Positioned::id).collect()
    }

    /// Iterates over the captured items, parent by parent, in display order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.parents.values().flatten()
    }

    /// Returns the captured children of `parent`, if it was captured.
    #[must_use]
    pub fn children(&self, parent: T::ParentKey) -> Option<&[T]> {
        self.parents.get(&parent).map(Vec::as_slice)
    }
}
