//! Drag descriptions and the reorder plans computed from them.

use super::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One end of a drag: the parent collection and the index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation<P> {
    /// Parent collection key.
    pub parent: P,
    /// Zero-based index within the parent's ordered children.
    pub index: usize,
}

impl<P> DragLocation<P> {
    /// Creates a drag location.
    #[must_use]
    pub const fn new(parent: P, index: usize) -> Self {
        Self { parent, index }
    }
}

/// Input-device independent description of a completed drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragDescription<I, P> {
    /// Identifier of the dragged item.
    pub item_id: I,
    /// Where the item was picked up.
    pub source: DragLocation<P>,
    /// Where the item was dropped.
    pub destination: DragLocation<P>,
}

impl<I, P> DragDescription<I, P> {
    /// Creates a drag description.
    #[must_use]
    pub const fn new(item_id: I, source: DragLocation<P>, destination: DragLocation<P>) -> Self {
        Self {
            item_id,
            source,
            destination,
        }
    }
}

impl<I, P: PartialEq> DragDescription<I, P> {
    /// Returns `true` when the item was dropped where it was picked up.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.source.parent == self.destination.parent && self.source.index == self.destination.index
    }

    /// Returns `true` when the drag moves the item to another parent.
    #[must_use]
    pub fn crosses_parents(&self) -> bool {
        self.source.parent != self.destination.parent
    }
}

/// Target parent and position for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement<I, P> {
    /// Item identifier.
    pub id: I,
    /// Parent the item belongs to after the move.
    pub parent: P,
    /// Position of the item within `parent` after the move.
    pub position: Position,
}

impl<I, P> Placement<I, P> {
    /// Creates a placement.
    #[must_use]
    pub const fn new(id: I, parent: P, position: Position) -> Self {
        Self {
            id,
            parent,
            position,
        }
    }
}

/// Assigns positions `0..n-1` to `ordered` under `parent`, in order.
///
/// This is the single renumbering routine behind both
/// [`PositionedCollection::reassign`](super::PositionedCollection::reassign)
/// and the reorder planner.
#[must_use]
pub fn sequence_placements<I: Copy, P: Copy>(ordered: &[I], parent: P) -> Vec<Placement<I, P>> {
    ordered
        .iter()
        .enumerate()
        .map(|(index, id)| Placement::new(*id, parent, Position::new(index)))
        .collect()
}

/// Complete re-description of every parent affected by one drag.
///
/// A plan is not a diff: every child of every affected parent appears in it,
/// including children whose position did not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderPlan<I, P> {
    placements: Vec<Placement<I, P>>,
}

impl<I, P> Default for ReorderPlan<I, P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<I, P> ReorderPlan<I, P> {
    /// Creates a plan that changes nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            placements: Vec::new(),
        }
    }

    /// Creates a plan from explicit placements.
    #[must_use]
    pub const fn from_placements(placements: Vec<Placement<I, P>>) -> Self {
        Self { placements }
    }

    /// Returns `true` when applying the plan would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Returns the number of placements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns the placements in emission order.
    #[must_use]
    pub fn placements(&self) -> &[Placement<I, P>] {
        &self.placements
    }

    /// Consumes the plan, returning its placements.
    #[must_use]
    pub fn into_placements(self) -> Vec<Placement<I, P>> {
        self.placements
    }

    /// Iterates over the placements.
    pub fn iter(&self) -> std::slice::Iter<'_, Placement<I, P>> {
        self.placements.iter()
    }
}

impl<I: Copy + PartialEq, P: Copy + Ord> ReorderPlan<I, P> {
    /// Returns the ids touched by the plan.
    #[must_use]
    pub fn ids(&self) -> Vec<I> {
        self.placements.iter().map(|placement| placement.id).collect()
    }

    /// Returns the distinct parents the plan writes to.
    #[must_use]
    pub fn parents(&self) -> BTreeSet<P> {
        self.placements
            .iter()
            .map(|placement| placement.parent)
            .collect()
    }

    /// Returns the placement for `id`, if the plan touches it.
    #[must_use]
    pub fn placement_of(&self, id: I) -> Option<&Placement<I, P>> {
        self.placements.iter().find(|placement| placement.id == id)
    }
}

impl<'a, I, P> IntoIterator for &'a ReorderPlan<I, P> {
    type Item = &'a Placement<I, P>;
    type IntoIter = std::slice::Iter<'a, Placement<I, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}
