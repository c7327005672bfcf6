//! Unit tests for the ordering engine.


use crate::ordering::{Position, Positioned, PositionedCollection};

/// Minimal positioned item: a sticky note on a numbered shelf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Note {
    pub id: u32,
    pub shelf: u32,
    pub position: Position,
    pub text: String,
}

impl Note {
    pub fn new(id: u32, text: &str) -> Self {
        Self {
            id,
            shelf: 0,
            position: Position::FIRST,
            text: text.to_owned(),
        }
    }
}

impl Positioned for Note {
    type Id = u32;
    type ParentKey = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn parent_key(&self) -> u32 {
        self.shelf
    }

    fn position(&self) -> Position {
        self.position
    }

    fn place(&mut self, parent: u32, position: Position) {
        self.shelf = parent;
        self.position = position;
    }
}

/// Builds a collection by appending `ids` to each shelf in order.
pub(super) fn shelves(layout: &[(u32, &[u32])]) -> PositionedCollection<Note> {
    let mut collection = PositionedCollection::new();
    for (shelf, ids) in layout {
        for id in *ids {
            collection.append(*shelf, Note::new(*id, "note"));
        }
    }
    collection
}

/// Returns `(id, position)` pairs of a shelf in display order.
pub(super) fn arrangement(collection: &PositionedCollection<Note>, shelf: u32) -> Vec<(u32, usize)> {
    collection
        .children(shelf)
        .into_iter()
        .map(|note| (note.id, note.position.index()))
        .collect()
}
