//! Domain model for Kanban boards.
//!
//! Boards own ordered lists, lists own ordered cards, and cards reference
//! global labels. Lists and cards implement
//! [`Positioned`](crate::ordering::Positioned) so the ordering engine can
//! rank them within their parent.

mod board;
mod card;
mod error;
mod gesture;
mod ids;
mod label;
mod list;
mod plan;

pub use board::{Board, BoardUpdate, NewBoard, PersistedBoardData};
pub use card::{Card, CardLabel, CardUpdate, LabelAction, NewCard, PersistedCardData};
pub use error::{BoardDomainError, BoardDomainResult};
pub use gesture::{BoardDrag, CardDrag, DragKind, DropEvent, DropSlot, ListDrag};
pub use ids::{BoardId, CardId, ItemRef, LabelId, ListId, UserId};
pub use label::{Label, LabelUpdate, NewLabel};
pub use list::{List, ListUpdate, NewList, PersistedListData};
pub use plan::BoardPlan;

use crate::ordering::{Placement, ReorderPlan};

/// Target placement of a list within a board.
pub type ListPlacement = Placement<ListId, BoardId>;

/// Target placement of a card within a list.
pub type CardPlacement = Placement<CardId, ListId>;

/// Reorder plan for the lists of a board.
pub type ListPlan = ReorderPlan<ListId, BoardId>;

/// Reorder plan for cards within and between lists.
pub type CardPlan = ReorderPlan<CardId, ListId>;
