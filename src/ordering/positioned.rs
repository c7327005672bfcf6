//! The positioned-item abstraction shared by lists and cards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based rank of an item among the siblings sharing its parent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(usize);

impl Position {
    /// The first position under any parent.
    pub const FIRST: Self = Self(0);

    /// Creates a position from a zero-based index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the zero-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns the position one rank earlier, stopping at the first position.
    #[must_use]
    pub const fn predecessor(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item ranked among siblings that share a parent key.
///
/// Implementors expose their identity and current placement, and accept new
/// placements from the collection. Only [`PositionedCollection`] should call
/// [`Positioned::place`]; everything else treats placement as read-only.
///
/// [`PositionedCollection`]: super::PositionedCollection
pub trait Positioned: Clone {
    /// Stable identifier of the item.
    type Id: Copy + Ord + fmt::Debug + fmt::Display;

    /// Identifier of the owning collection.
    type ParentKey: Copy + Ord + fmt::Debug + fmt::Display;

    /// Returns the item identifier.
    fn id(&self) -> Self::Id;

    /// Returns the key of the parent the item currently belongs to.
    fn parent_key(&self) -> Self::ParentKey;

    /// Returns the item's rank within its parent.
    fn position(&self) -> Position;

    /// Moves the item to `parent` at `position`.
    fn place(&mut self, parent: Self::ParentKey, position: Position);
}
