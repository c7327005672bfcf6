//! Parent-scoped ordered collection with contiguous positions.

use super::{
    OrderingError, OrderingResult, ParentSnapshot, Placement, Position, Positioned,
    sequence_placements,
};
use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

/// Items grouped by parent key, ranked `0..n-1` within each parent.
///
/// Every mutating operation leaves the positions of every parent contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedCollection<T: Positioned> {
    items: BTreeMap<T::Id, T>,
}

impl<T: Positioned> Default for PositionedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Positioned> PositionedCollection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Builds a collection from items reported by a backend.
    ///
    /// Children of each parent are ranked by their reported position (ties
    /// broken by id) and renumbered from zero.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut grouped: BTreeMap<T::ParentKey, Vec<T>> = BTreeMap::new();
        for item in items {
            grouped.entry(item.parent_key()).or_default().push(item);
        }
        let mut collection = Self::new();
        for (parent, children) in grouped {
            collection.set_children(parent, children);
        }
        collection
    }

    /// Returns the number of items across all parents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the collection holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item with the given id.
    #[must_use]
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.get(&id)
    }

    /// Returns `true` when an item with the given id is stored.
    #[must_use]
    pub fn contains(&self, id: T::Id) -> bool {
        self.items.contains_key(&id)
    }

    /// Iterates over every item, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    /// Returns the number of children under `parent`.
    #[must_use]
    pub fn count(&self, parent: T::ParentKey) -> usize {
        self.items
            .values()
            .filter(|item| item.parent_key() == parent)
            .count()
    }

    /// Returns the children of `parent` sorted by position.
    #[must_use]
    pub fn children(&self, parent: T::ParentKey) -> Vec<&T> {
        let mut children: Vec<&T> = self
            .items
            .values()
            .filter(|item| item.parent_key() == parent)
            .collect();
        children.sort_by_key(|item| (item.position(), item.id()));
        children
    }

    /// Returns the ids of the children of `parent` in display order.
    #[must_use]
    pub fn ordered_ids(&self, parent: T::ParentKey) -> Vec<T::Id> {
        self.children(parent)
            .into_iter()
            .map(Positioned::id)
            .collect()
    }

    /// Returns every parent key that currently has children.
    #[must_use]
    pub fn parents(&self) -> BTreeSet<T::ParentKey> {
        self.items.values().map(Positioned::parent_key).collect()
    }

    /// Appends `item` as the last child of `parent`.
    ///
    /// An item already stored under the same id is removed first, so the
    /// previous parent stays contiguous.
    pub fn append(&mut self, parent: T::ParentKey, mut item: T) -> &T {
        let id = item.id();
        if self.items.contains_key(&id) {
            self.detach(id);
        }
        item.place(parent, Position::new(self.count(parent)));
        match self.items.entry(id) {
            Entry::Vacant(slot) => slot.insert(item),
            Entry::Occupied(slot) => {
                let stored = slot.into_mut();
                *stored = item;
                stored
            }
        }
    }

    /// Removes an item and closes the gap it leaves among its siblings.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::NotFound`] when no item has the given id.
    pub fn remove_item(&mut self, id: T::Id) -> OrderingResult<T> {
        self.detach(id).ok_or_else(|| OrderingError::not_found(id))
    }

    /// Assigns positions `0..n-1` to the children of `parent` in the order
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::InvalidArgument`] when `ordered` is not a
    /// permutation of the current children of `parent`.
    pub fn reassign(&mut self, ordered: &[T::Id], parent: T::ParentKey) -> OrderingResult<()> {
        let current: BTreeSet<T::Id> = self.ordered_ids(parent).into_iter().collect();
        let requested: BTreeSet<T::Id> = ordered.iter().copied().collect();
        if requested.len() != ordered.len() || requested != current {
            return Err(OrderingError::InvalidArgument(format!(
                "reassign for parent {parent} expected {current:?}, got {ordered:?}"
            )));
        }
        for placement in sequence_placements(ordered, parent) {
            self.write(&placement);
        }
        Ok(())
    }

    /// Replaces every child of `parent` with `items`.
    ///
    /// Incoming items are ranked by their own position (ties broken by id)
    /// and renumbered from zero. Items that currently live under another
    /// parent are detached from it first.
    pub fn set_children(&mut self, parent: T::ParentKey, items: impl IntoIterator<Item = T>) {
        let mut incoming: Vec<T> = items.into_iter().collect();
        for item in &incoming {
            let moved_elsewhere = self
                .items
                .get(&item.id())
                .is_some_and(|stored| stored.parent_key() != parent);
            if moved_elsewhere {
                self.detach(item.id());
            }
        }
        self.remove_parent(parent);
        incoming.sort_by_key(|item| (item.position(), item.id()));
        for (index, mut item) in incoming.into_iter().enumerate() {
            item.place(parent, Position::new(index));
            self.items.insert(item.id(), item);
        }
    }

    /// Removes every child of `parent`, returning them in display order.
    pub fn remove_parent(&mut self, parent: T::ParentKey) -> Vec<T> {
        self.ordered_ids(parent)
            .into_iter()
            .filter_map(|id| self.items.remove(&id))
            .collect()
    }

    /// Writes every placement into the collection.
    ///
    /// All ids are checked before anything is written, so a failed call
    /// leaves the collection unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::NotFound`] for the first unknown id.
    pub fn apply_placements(
        &mut self,
        placements: &[Placement<T::Id, T::ParentKey>],
    ) -> OrderingResult<()> {
        if let Some(missing) = placements
            .iter()
            .find(|placement| !self.items.contains_key(&placement.id))
        {
            return Err(OrderingError::not_found(missing.id));
        }
        for placement in placements {
            self.write(placement);
        }
        Ok(())
    }

    /// Copies the children of every parent in `parents`, in display order.
    ///
    /// Parents without children are captured as empty.
    #[must_use]
    pub fn capture(&self, parents: impl IntoIterator<Item = T::ParentKey>) -> ParentSnapshot<T> {
        ParentSnapshot::new(
            parents
                .into_iter()
                .map(|parent| (parent, self.children(parent).into_iter().cloned().collect()))
                .collect(),
        )
    }

    /// Puts captured parents back the way they were.
    ///
    /// Captured items are written back verbatim under their captured parent
    /// and order. Items that joined a captured parent after the capture stay
    /// there at their current index. Parents that captured items are pulled
    /// out of are renumbered. Every parent touched ends up contiguous.
    pub fn restore(&mut self, snapshot: ParentSnapshot<T>) {
        let restored = snapshot.ids();
        let mut vacated: BTreeSet<T::ParentKey> = restored
            .iter()
            .filter_map(|id| self.items.get(id))
            .map(Positioned::parent_key)
            .collect();

        for (parent, captured) in snapshot.into_parents() {
            let newcomers: Vec<(T::Id, Position)> = self
                .children(parent)
                .into_iter()
                .filter(|item| !restored.contains(&item.id()))
                .map(|item| (item.id(), item.position()))
                .collect();
            let mut order: Vec<T::Id> = captured.iter().map(Positioned::id).collect();
            for (id, position) in newcomers {
                let at = position.index().min(order.len());
                order.insert(at, id);
            }
            for item in captured {
                self.items.insert(item.id(), item);
            }
            for placement in sequence_placements(&order, parent) {
                self.write(&placement);
            }
            vacated.remove(&parent);
        }

        for parent in vacated {
            let order = self.ordered_ids(parent);
            for placement in sequence_placements(&order, parent) {
                self.write(&placement);
            }
        }
    }

    /// Edits an item in place without letting the edit move it.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::NotFound`] when no item has the given id.
    pub fn modify(&mut self, id: T::Id, edit: impl FnOnce(&mut T)) -> OrderingResult<&T> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or_else(|| OrderingError::not_found(id))?;
        let (parent, position) = (item.parent_key(), item.position());
        edit(item);
        item.place(parent, position);
        Ok(&*item)
    }

    /// Returns `true` when the children of `parent` hold exactly the
    /// positions `0..n-1`.
    #[must_use]
    pub fn is_contiguous(&self, parent: T::ParentKey) -> bool {
        self.children(parent)
            .iter()
            .enumerate()
            .all(|(index, item)| item.position().index() == index)
    }

    /// Returns `true` when every parent is contiguous.
    #[must_use]
    pub fn all_contiguous(&self) -> bool {
        self.parents()
            .into_iter()
            .all(|parent| self.is_contiguous(parent))
    }

    fn write(&mut self, placement: &Placement<T::Id, T::ParentKey>) {
        if let Some(item) = self.items.get_mut(&placement.id) {
            item.place(placement.parent, placement.position);
        }
    }

    fn detach(&mut self, id: T::Id) -> Option<T> {
        let removed = self.items.remove(&id)?;
        let parent = removed.parent_key();
        let vacated = removed.position();
        for sibling in self
            .items
            .values_mut()
            .filter(|item| item.parent_key() == parent && item.position() > vacated)
        {
            let shifted = sibling.position().predecessor();
            sibling.place(parent, shifted);
        }
        Some(removed)
    }
}
