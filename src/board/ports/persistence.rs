//! Persistence port standing between visible board state and the backend.

use crate::board::domain::{
    Board, BoardId, BoardUpdate, Card, CardId, CardPlacement, CardUpdate, ItemRef, Label,
    LabelAction, LabelId, LabelUpdate, List, ListId, ListPlacement, ListUpdate, NewBoard, NewCard,
    NewLabel, NewList, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for persistence operations.
pub type BoardPersistenceResult<T> = Result<T, BoardPersistenceError>;

/// Backend contract for boards, lists, cards and labels.
///
/// Implementations own identifier assignment and keep positions contiguous
/// on their side: creation appends, deletion closes the gap, and deleting a
/// parent cascades to its children and their label associations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardPersistence: Send + Sync {
    /// Returns every board owned by `owner`.
    async fn boards_of(&self, owner: UserId) -> BoardPersistenceResult<Vec<Board>>;

    /// Returns a single board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardPersistenceError::NotFound`] when the board does not
    /// exist.
    async fn board(&self, board_id: BoardId) -> BoardPersistenceResult<Board>;

    /// Creates a board for `owner`.
    async fn create_board(&self, owner: UserId, fields: &NewBoard)
    -> BoardPersistenceResult<Board>;

    /// Updates a board's editable fields.
    async fn update_board(
        &self,
        board_id: BoardId,
        update: &BoardUpdate,
    ) -> BoardPersistenceResult<Board>;

    /// Deletes a board with its lists, cards and card labels.
    async fn delete_board(&self, board_id: BoardId) -> BoardPersistenceResult<()>;

    /// Returns the lists of a board in position order.
    async fn lists_of(&self, board_id: BoardId) -> BoardPersistenceResult<Vec<List>>;

    /// Appends a new list to a board.
    async fn create_list(&self, board_id: BoardId, fields: &NewList)
    -> BoardPersistenceResult<List>;

    /// Updates a list's editable fields.
    async fn update_list(&self, list_id: ListId, update: &ListUpdate)
    -> BoardPersistenceResult<List>;

    /// Deletes a list with its cards, closing the gap among its siblings.
    async fn delete_list(&self, list_id: ListId) -> BoardPersistenceResult<()>;

    /// Writes new positions for the lists of a board.
    ///
    /// Returns the board's lists in their new order.
    async fn reorder_lists(
        &self,
        board_id: BoardId,
        placements: &[ListPlacement],
    ) -> BoardPersistenceResult<Vec<List>>;

    /// Returns the cards of a list in position order, with their labels.
    async fn cards_of(&self, list_id: ListId) -> BoardPersistenceResult<Vec<Card>>;

    /// Appends a new card to a list.
    async fn create_card(&self, list_id: ListId, fields: &NewCard)
    -> BoardPersistenceResult<Card>;

    /// Updates a card's editable fields.
    async fn update_card(&self, card_id: CardId, update: &CardUpdate)
    -> BoardPersistenceResult<Card>;

    /// Deletes a card with its label associations, closing the gap among its
    /// siblings.
    async fn delete_card(&self, card_id: CardId) -> BoardPersistenceResult<()>;

    /// Writes new lists and positions for cards, possibly across lists.
    ///
    /// Returns the placed cards in placement order.
    async fn reorder_cards(
        &self,
        placements: &[CardPlacement],
    ) -> BoardPersistenceResult<Vec<Card>>;

    /// Returns every label.
    async fn labels(&self) -> BoardPersistenceResult<Vec<Label>>;

    /// Creates a label.
    async fn create_label(&self, fields: &NewLabel) -> BoardPersistenceResult<Label>;

    /// Updates a label's editable fields.
    async fn update_label(
        &self,
        label_id: LabelId,
        update: &LabelUpdate,
    ) -> BoardPersistenceResult<Label>;

    /// Deletes a label and every association to it.
    async fn delete_label(&self, label_id: LabelId) -> BoardPersistenceResult<()>;

    /// Attaches or detaches a label.
    ///
    /// Attaching an attached label and detaching a detached one are no-ops.
    /// Returns the labels attached to the card afterwards.
    async fn toggle_label(
        &self,
        card_id: CardId,
        label_id: LabelId,
        action: LabelAction,
    ) -> BoardPersistenceResult<Vec<Label>>;
}

/// Errors returned by persistence implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardPersistenceError {
    /// The referenced item does not exist in the backend.
    #[error("{0} not found")]
    NotFound(ItemRef),

    /// The backend refused the request as inconsistent.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Any other persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardPersistenceError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Builds a [`BoardPersistenceError::NotFound`] for any board item id.
    pub fn not_found(item: impl Into<ItemRef>) -> Self {
        Self::NotFound(item.into())
    }
}
