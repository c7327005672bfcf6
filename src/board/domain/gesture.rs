//! Translation of raw drag-and-drop results into drag descriptions.
//!
//! UI toolkits report a finished drag as string identifiers for the dragged
//! element and the drop zones (`card-7`, `list-3`), a kind, and indices. This
//! module turns such a report into the typed [`DragDescription`] that the
//! reorder planner consumes, so the planner never sees toolkit details.

use super::{BoardDomainError, BoardDomainResult, BoardId, CardId, ListId};
use crate::ordering::{DragDescription, DragLocation};
use serde::{Deserialize, Serialize};

const LIST_PREFIX: &str = "list-";
const CARD_PREFIX: &str = "card-";

/// Drag of a list within a board.
pub type ListDrag = DragDescription<ListId, BoardId>;

/// Drag of a card within or between lists.
pub type CardDrag = DragDescription<CardId, ListId>;

/// Kind of element being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    /// A whole list, dragged horizontally across the board.
    #[serde(alias = "LIST")]
    List,
    /// A single card.
    #[serde(alias = "CARD")]
    Card,
}

/// One end of a raw drop report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropSlot {
    /// Identifier of the drop zone.
    pub droppable_id: String,
    /// Index within the drop zone.
    pub index: usize,
}

impl DropSlot {
    /// Creates a drop slot.
    #[must_use]
    pub fn new(droppable_id: impl Into<String>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// Raw result of a drag gesture as reported by a UI toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropEvent {
    /// Identifier of the dragged element.
    pub draggable_id: String,
    /// Kind of the dragged element.
    #[serde(rename = "type")]
    pub kind: DragKind,
    /// Where the drag started.
    pub source: DropSlot,
    /// Where the drag ended; `None` when dropped outside every drop zone.
    pub destination: Option<DropSlot>,
}

/// A typed drag on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardDrag {
    /// A list moved within its board.
    List(ListDrag),
    /// A card moved within or between lists.
    Card(CardDrag),
}

impl BoardDrag {
    /// Translates a raw drop report on `board_id`.
    ///
    /// Returns `Ok(None)` when the element was dropped outside every drop
    /// zone. List drop zones are not interpreted: both ends of a list drag
    /// are the current board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidArgument`] when an identifier does
    /// not have the `list-<n>` or `card-<n>` form its kind requires.
    pub fn from_drop_event(board_id: BoardId, event: &DropEvent) -> BoardDomainResult<Option<Self>> {
        let Some(destination) = &event.destination else {
            return Ok(None);
        };

        let drag = match event.kind {
            DragKind::List => Self::List(DragDescription::new(
                ListId::new(parse_prefixed(&event.draggable_id, LIST_PREFIX)?),
                DragLocation::new(board_id, event.source.index),
                DragLocation::new(board_id, destination.index),
            )),
            DragKind::Card => Self::Card(DragDescription::new(
                CardId::new(parse_prefixed(&event.draggable_id, CARD_PREFIX)?),
                list_location(&event.source)?,
                list_location(destination)?,
            )),
        };
        Ok(Some(drag))
    }

    /// Returns `true` when the drag ends where it started.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        match self {
            Self::List(drag) => drag.is_noop(),
            Self::Card(drag) => drag.is_noop(),
        }
    }
}

fn list_location(slot: &DropSlot) -> BoardDomainResult<DragLocation<ListId>> {
    let list_id = ListId::new(parse_prefixed(&slot.droppable_id, LIST_PREFIX)?);
    Ok(DragLocation::new(list_id, slot.index))
}

fn parse_prefixed(raw: &str, prefix: &str) -> BoardDomainResult<u64> {
    raw.strip_prefix(prefix)
        .and_then(|digits| digits.parse::<u64>().ok())
        .ok_or_else(|| {
            BoardDomainError::InvalidArgument(format!("expected '{prefix}<id>', got '{raw}'"))
        })
}
