//! Non-optimistic board operations: load, create, update and delete.

use super::{BoardResult, BoardStore};
use crate::board::{
    domain::{
        Board, BoardId, BoardUpdate, Card, CardId, CardUpdate, Label, LabelId, LabelUpdate, List,
        ListId, ListUpdate, NewBoard, NewCard, NewLabel, NewList, UserId,
    },
    ports::BoardPersistence,
};
use std::sync::Arc;

/// Board service that awaits the backend before touching visible state.
///
/// Backend errors propagate to the caller and leave the store unchanged.
pub struct BoardService<P>
where
    P: BoardPersistence,
{
    store: BoardStore,
    persistence: Arc<P>,
}

impl<P> Clone for BoardService<P>
where
    P: BoardPersistence,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            persistence: Arc::clone(&self.persistence),
        }
    }
}

impl<P> BoardService<P>
where
    P: BoardPersistence,
{
    /// Creates a board service writing into `store`.
    #[must_use]
    pub const fn new(store: BoardStore, persistence: Arc<P>) -> Self {
        Self { store, persistence }
    }

    /// Returns the store this service writes into.
    #[must_use]
    pub const fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Returns the backend this service calls.
    #[must_use]
    pub const fn persistence(&self) -> &Arc<P> {
        &self.persistence
    }

    /// Fetches a board with its lists, their cards and every label, and
    /// opens it in the store.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when any fetch fails; the
    /// store is only written once everything has been fetched.
    pub async fn load_board(&self, board_id: BoardId) -> BoardResult<Board> {
        let board = self.persistence.board(board_id).await?;
        let lists = self.persistence.lists_of(board_id).await?;
        let mut cards = Vec::with_capacity(lists.len());
        for list in &lists {
            cards.push((list.id(), self.persistence.cards_of(list.id()).await?));
        }
        let labels = self.persistence.labels().await?;

        let list_count = lists.len();
        self.store.set_board(board.clone());
        self.store.set_lists(lists);
        for (list_id, list_cards) in cards {
            self.store.set_cards(list_id, list_cards);
        }
        self.store.set_labels(labels);
        tracing::info!(%board_id, lists = list_count, "board loaded");
        Ok(board)
    }

    /// Returns the boards owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the fetch fails.
    pub async fn boards_of(&self, owner: UserId) -> BoardResult<Vec<Board>> {
        Ok(self.persistence.boards_of(owner).await?)
    }

    /// Creates a board. The new board is not opened.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn create_board(&self, owner: UserId, fields: &NewBoard) -> BoardResult<Board> {
        let board = self.persistence.create_board(owner, fields).await?;
        tracing::info!(board_id = %board.id(), %owner, "board created");
        Ok(board)
    }

    /// Updates a board, refreshing it in the store when it is open.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn update_board(&self, board_id: BoardId, update: &BoardUpdate) -> BoardResult<Board> {
        let board = self.persistence.update_board(board_id, update).await?;
        if self.is_open(board_id) {
            self.store.set_board(board.clone());
        }
        tracing::info!(%board_id, "board updated");
        Ok(board)
    }

    /// Deletes a board, closing it when it is open.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn delete_board(&self, board_id: BoardId) -> BoardResult<()> {
        self.persistence.delete_board(board_id).await?;
        if self.is_open(board_id) {
            self.store.clear_board();
        }
        tracing::info!(%board_id, "board deleted");
        Ok(())
    }

    /// Creates a list at the end of a board.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn create_list(&self, board_id: BoardId, fields: &NewList) -> BoardResult<List> {
        let created = self.persistence.create_list(board_id, fields).await?;
        let list = self.store.append_list(created);
        tracing::info!(%board_id, list_id = %list.id(), position = %list.position(), "list created");
        Ok(list)
    }

    /// Renames a list.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn rename_list(&self, list_id: ListId, title: impl Into<String>) -> BoardResult<List> {
        let update = ListUpdate::default().with_title(title);
        let updated = self.persistence.update_list(list_id, &update).await?;
        tracing::info!(%list_id, "list renamed");
        Ok(self.store.replace_list(updated.clone()).unwrap_or(updated))
    }

    /// Deletes a list and its cards.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn delete_list(&self, list_id: ListId) -> BoardResult<()> {
        self.persistence.delete_list(list_id).await?;
        if let Err(err) = self.store.remove_list(list_id) {
            tracing::debug!(%list_id, error = %err, "deleted list was not visible");
        }
        tracing::info!(%list_id, "list deleted");
        Ok(())
    }

    /// Creates a card at the end of a list.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn create_card(&self, list_id: ListId, fields: &NewCard) -> BoardResult<Card> {
        let created = self.persistence.create_card(list_id, fields).await?;
        let card = self.store.append_card(created);
        tracing::info!(%list_id, card_id = %card.id(), position = %card.position(), "card created");
        Ok(card)
    }

    /// Updates a card's title or description.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn update_card(&self, card_id: CardId, update: &CardUpdate) -> BoardResult<Card> {
        let updated = self.persistence.update_card(card_id, update).await?;
        tracing::info!(%card_id, "card updated");
        Ok(self.store.replace_card(updated.clone()).unwrap_or(updated))
    }

    /// Deletes a card.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn delete_card(&self, card_id: CardId) -> BoardResult<()> {
        self.persistence.delete_card(card_id).await?;
        if let Err(err) = self.store.remove_card(card_id) {
            tracing::debug!(%card_id, error = %err, "deleted card was not visible");
        }
        tracing::info!(%card_id, "card deleted");
        Ok(())
    }

    /// Creates a label.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn create_label(&self, fields: &NewLabel) -> BoardResult<Label> {
        let label = self.persistence.create_label(fields).await?;
        self.store.upsert_label(label.clone());
        tracing::info!(label_id = %label.id(), "label created");
        Ok(label)
    }

    /// Updates a label's name or colour.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn update_label(&self, label_id: LabelId, update: &LabelUpdate) -> BoardResult<Label> {
        let label = self.persistence.update_label(label_id, update).await?;
        self.store.upsert_label(label.clone());
        tracing::info!(%label_id, "label updated");
        Ok(label)
    }

    /// Deletes a label and detaches it from every visible card.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Persistence`] when the backend refuses.
    pub async fn delete_label(&self, label_id: LabelId) -> BoardResult<()> {
        self.persistence.delete_label(label_id).await?;
        if self.store.remove_label(label_id).is_none() {
            tracing::debug!(%label_id, "deleted label was not visible");
        }
        tracing::info!(%label_id, "label deleted");
        Ok(())
    }

    fn is_open(&self, board_id: BoardId) -> bool {
        self.store
            .board()
            .is_some_and(|board| board.id() == board_id)
    }
}
