//! In-memory backend for board tests and local tooling.

use super::PersistenceLatency;
use crate::board::{
    domain::{
        Board, BoardId, BoardUpdate, Card, CardId, CardLabel, CardPlacement, CardUpdate, Label,
        LabelAction, LabelId, LabelUpdate, List, ListId, ListPlacement, ListUpdate, NewBoard,
        NewCard, NewLabel, NewList, PersistedBoardData, PersistedCardData, PersistedListData,
        UserId,
    },
    ports::{BoardPersistence, BoardPersistenceError, BoardPersistenceResult},
};
use crate::ordering::{OrderingError, Position, PositionedCollection};
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Thread-safe in-memory board backend.
///
/// Positions are maintained with the same [`PositionedCollection`] the
/// client uses, so the backend enforces contiguity on its side as well:
/// reorder requests that would leave gaps are rejected as a whole.
///
/// The backend can be taken offline or told to fail upcoming writes, which
/// is how tests exercise rollback paths.
pub struct InMemoryBoardPersistence<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryBoardState>>,
    clock: Arc<C>,
    latency: PersistenceLatency,
}

#[derive(Debug, Default)]
struct IdCounters {
    board: u64,
    list: u64,
    card: u64,
    label: u64,
}

const fn allocate(counter: &mut u64) -> u64 {
    *counter = counter.saturating_add(1);
    *counter
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    ids: IdCounters,
    boards: BTreeMap<BoardId, Board>,
    lists: PositionedCollection<List>,
    cards: PositionedCollection<Card>,
    labels: BTreeMap<LabelId, Label>,
    card_labels: BTreeSet<CardLabel>,
    offline: bool,
    pending_failures: usize,
}

impl InMemoryBoardState {
    fn check_read(&self) -> BoardPersistenceResult<()> {
        if self.offline {
            return Err(BoardPersistenceError::Unavailable(
                "backend offline".to_owned(),
            ));
        }
        Ok(())
    }

    fn check_write(&mut self) -> BoardPersistenceResult<()> {
        self.check_read()?;
        if self.pending_failures > 0 {
            self.pending_failures -= 1;
            return Err(BoardPersistenceError::Unavailable(
                "injected write failure".to_owned(),
            ));
        }
        Ok(())
    }

    fn label_ids_of(&self, card_id: CardId) -> BTreeSet<LabelId> {
        self.card_labels
            .iter()
            .filter(|association| association.card_id == card_id)
            .map(|association| association.label_id)
            .collect()
    }

    fn labels_of(&self, card_id: CardId) -> Vec<Label> {
        self.label_ids_of(card_id)
            .into_iter()
            .filter_map(|label_id| self.labels.get(&label_id).cloned())
            .collect()
    }

    fn hydrate(&self, card: &Card) -> Card {
        let mut hydrated = card.clone();
        hydrated.set_labels(self.label_ids_of(card.id()));
        hydrated
    }

    fn remove_list_contents(&mut self, list_id: ListId) {
        let removed = self.cards.remove_parent(list_id);
        let removed_ids: BTreeSet<CardId> = removed.iter().map(Card::id).collect();
        self.card_labels
            .retain(|association| !removed_ids.contains(&association.card_id));
    }
}

fn rejected(err: &OrderingError) -> BoardPersistenceError {
    BoardPersistenceError::Rejected(err.to_string())
}

impl<C> Clone for InMemoryBoardPersistence<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
            latency: self.latency,
        }
    }
}

impl Default for InMemoryBoardPersistence<DefaultClock> {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl<C> InMemoryBoardPersistence<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty backend that answers immediately.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::default(),
            clock,
            latency: PersistenceLatency::instant(),
        }
    }

    /// Sets the simulated latency.
    #[must_use]
    pub const fn with_latency(mut self, latency: PersistenceLatency) -> Self {
        self.latency = latency;
        self
    }

    /// Makes every subsequent call fail with
    /// [`BoardPersistenceError::Unavailable`] until brought back online.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn set_offline(&self, offline: bool) -> BoardPersistenceResult<()> {
        self.write_state()?.offline = offline;
        Ok(())
    }

    /// Makes the next `count` writes fail with
    /// [`BoardPersistenceError::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn fail_next_writes(&self, count: usize) -> BoardPersistenceResult<()> {
        self.write_state()?.pending_failures = count;
        Ok(())
    }

    /// Returns every stored card-label association.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn associations(&self) -> BoardPersistenceResult<BTreeSet<CardLabel>> {
        Ok(self.read_state()?.card_labels.clone())
    }

    fn read_state(&self) -> BoardPersistenceResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| {
            BoardPersistenceError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> BoardPersistenceResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| {
            BoardPersistenceError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    async fn pause(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    async fn readable(&self) -> BoardPersistenceResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        Self::pause(self.latency.read).await;
        let state = self.read_state()?;
        state.check_read()?;
        Ok(state)
    }

    async fn writable(
        &self,
        delay: Duration,
    ) -> BoardPersistenceResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        Self::pause(delay).await;
        let mut state = self.write_state()?;
        state.check_write()?;
        Ok(state)
    }
}

#[async_trait]
impl<C> BoardPersistence for InMemoryBoardPersistence<C>
where
    C: Clock + Send + Sync,
{
    async fn boards_of(&self, owner: UserId) -> BoardPersistenceResult<Vec<Board>> {
        let state = self.readable().await?;
        Ok(state
            .boards
            .values()
            .filter(|board| board.owner_id() == owner)
            .cloned()
            .collect())
    }

    async fn board(&self, board_id: BoardId) -> BoardPersistenceResult<Board> {
        let state = self.readable().await?;
        state
            .boards
            .get(&board_id)
            .cloned()
            .ok_or_else(|| BoardPersistenceError::not_found(board_id))
    }

    async fn create_board(
        &self,
        owner: UserId,
        fields: &NewBoard,
    ) -> BoardPersistenceResult<Board> {
        let mut state = self.writable(self.latency.write).await?;
        let now = self.clock.utc();
        let board = Board::from_persisted(PersistedBoardData {
            id: BoardId::new(allocate(&mut state.ids.board)),
            owner_id: owner,
            title: fields.title.clone(),
            description: fields.description.clone(),
            created_at: now,
            updated_at: now,
        });
        state.boards.insert(board.id(), board.clone());
        Ok(board)
    }

    async fn update_board(
        &self,
        board_id: BoardId,
        update: &BoardUpdate,
    ) -> BoardPersistenceResult<Board> {
        let mut state = self.writable(self.latency.write).await?;
        let board = state
            .boards
            .get_mut(&board_id)
            .ok_or_else(|| BoardPersistenceError::not_found(board_id))?;
        board.apply_update(update, &*self.clock);
        Ok(board.clone())
    }

    async fn delete_board(&self, board_id: BoardId) -> BoardPersistenceResult<()> {
        let mut state = self.writable(self.latency.write).await?;
        if state.boards.remove(&board_id).is_none() {
            return Err(BoardPersistenceError::not_found(board_id));
        }
        let lists = state.lists.remove_parent(board_id);
        for list in lists {
            state.remove_list_contents(list.id());
        }
        Ok(())
    }

    async fn lists_of(&self, board_id: BoardId) -> BoardPersistenceResult<Vec<List>> {
        let state = self.readable().await?;
        if !state.boards.contains_key(&board_id) {
            return Err(BoardPersistenceError::not_found(board_id));
        }
        Ok(state
            .lists
            .children(board_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn create_list(
        &self,
        board_id: BoardId,
        fields: &NewList,
    ) -> BoardPersistenceResult<List> {
        let mut state = self.writable(self.latency.write).await?;
        if !state.boards.contains_key(&board_id) {
            return Err(BoardPersistenceError::not_found(board_id));
        }
        let now = self.clock.utc();
        let list = List::from_persisted(PersistedListData {
            id: ListId::new(allocate(&mut state.ids.list)),
            board_id,
            title: fields.title.clone(),
            position: Position::FIRST,
            created_at: now,
            updated_at: now,
        });
        Ok(state.lists.append(board_id, list).clone())
    }

    async fn update_list(
        &self,
        list_id: ListId,
        update: &ListUpdate,
    ) -> BoardPersistenceResult<List> {
        let mut state = self.writable(self.latency.write).await?;
        state
            .lists
            .modify(list_id, |list| list.apply_update(update, &*self.clock))
            .cloned()
            .map_err(|_| BoardPersistenceError::not_found(list_id))
    }

    async fn delete_list(&self, list_id: ListId) -> BoardPersistenceResult<()> {
        let mut state = self.writable(self.latency.write).await?;
        state
            .lists
            .remove_item(list_id)
            .map_err(|_| BoardPersistenceError::not_found(list_id))?;
        state.remove_list_contents(list_id);
        Ok(())
    }

    async fn reorder_lists(
        &self,
        board_id: BoardId,
        placements: &[ListPlacement],
    ) -> BoardPersistenceResult<Vec<List>> {
        let mut state = self.writable(self.latency.reorder).await?;
        if !state.boards.contains_key(&board_id) {
            return Err(BoardPersistenceError::not_found(board_id));
        }
        for placement in placements {
            let stored = state
                .lists
                .get(placement.id)
                .ok_or_else(|| BoardPersistenceError::not_found(placement.id))?;
            if placement.parent != board_id || stored.board_id() != board_id {
                return Err(BoardPersistenceError::Rejected(format!(
                    "list {} does not belong to board {board_id}",
                    placement.id
                )));
            }
        }

        let mut staged = state.lists.clone();
        staged.apply_placements(placements).map_err(|err| rejected(&err))?;
        if !staged.is_contiguous(board_id) {
            return Err(BoardPersistenceError::Rejected(format!(
                "placements leave gaps in board {board_id}"
            )));
        }
        for placement in placements {
            staged
                .modify(placement.id, |list| list.touch(&*self.clock))
                .map_err(|err| rejected(&err))?;
        }
        state.lists = staged;

        Ok(state
            .lists
            .children(board_id)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn cards_of(&self, list_id: ListId) -> BoardPersistenceResult<Vec<Card>> {
        let state = self.readable().await?;
        if !state.lists.contains(list_id) {
            return Err(BoardPersistenceError::not_found(list_id));
        }
        Ok(state
            .cards
            .children(list_id)
            .into_iter()
            .map(|card| state.hydrate(card))
            .collect())
    }

    async fn create_card(
        &self,
        list_id: ListId,
        fields: &NewCard,
    ) -> BoardPersistenceResult<Card> {
        let mut state = self.writable(self.latency.write).await?;
        if !state.lists.contains(list_id) {
            return Err(BoardPersistenceError::not_found(list_id));
        }
        let now = self.clock.utc();
        let card = Card::from_persisted(PersistedCardData {
            id: CardId::new(allocate(&mut state.ids.card)),
            list_id,
            title: fields.title.clone(),
            description: fields.description.clone(),
            position: Position::FIRST,
            labels: BTreeSet::new(),
            created_at: now,
            updated_at: now,
        });
        Ok(state.cards.append(list_id, card).clone())
    }

    async fn update_card(
        &self,
        card_id: CardId,
        update: &CardUpdate,
    ) -> BoardPersistenceResult<Card> {
        let mut state = self.writable(self.latency.write).await?;
        let updated = state
            .cards
            .modify(card_id, |card| card.apply_update(update, &*self.clock))
            .cloned()
            .map_err(|_| BoardPersistenceError::not_found(card_id))?;
        Ok(state.hydrate(&updated))
    }

    async fn delete_card(&self, card_id: CardId) -> BoardPersistenceResult<()> {
        let mut state = self.writable(self.latency.write).await?;
        state
            .cards
            .remove_item(card_id)
            .map_err(|_| BoardPersistenceError::not_found(card_id))?;
        state
            .card_labels
            .retain(|association| association.card_id != card_id);
        Ok(())
    }

    async fn reorder_cards(
        &self,
        placements: &[CardPlacement],
    ) -> BoardPersistenceResult<Vec<Card>> {
        let mut state = self.writable(self.latency.reorder).await?;
        let mut affected = BTreeSet::new();
        for placement in placements {
            if !state.lists.contains(placement.parent) {
                return Err(BoardPersistenceError::not_found(placement.parent));
            }
            let stored = state
                .cards
                .get(placement.id)
                .ok_or_else(|| BoardPersistenceError::not_found(placement.id))?;
            affected.insert(stored.list_id());
            affected.insert(placement.parent);
        }

        let mut staged = state.cards.clone();
        staged.apply_placements(placements).map_err(|err| rejected(&err))?;
        if let Some(list_id) = affected.iter().find(|list_id| !staged.is_contiguous(**list_id)) {
            return Err(BoardPersistenceError::Rejected(format!(
                "placements leave gaps in list {list_id}"
            )));
        }
        for placement in placements {
            staged
                .modify(placement.id, |card| card.touch(&*self.clock))
                .map_err(|err| rejected(&err))?;
        }
        state.cards = staged;

        Ok(placements
            .iter()
            .filter_map(|placement| state.cards.get(placement.id))
            .map(|card| state.hydrate(card))
            .collect())
    }

    async fn labels(&self) -> BoardPersistenceResult<Vec<Label>> {
        let state = self.readable().await?;
        Ok(state.labels.values().cloned().collect())
    }

    async fn create_label(&self, fields: &NewLabel) -> BoardPersistenceResult<Label> {
        let mut state = self.writable(self.latency.write).await?;
        let label = Label::new(
            LabelId::new(allocate(&mut state.ids.label)),
            fields.name.clone(),
            fields.color.clone(),
            self.clock.utc(),
        );
        state.labels.insert(label.id(), label.clone());
        Ok(label)
    }

    async fn update_label(
        &self,
        label_id: LabelId,
        update: &LabelUpdate,
    ) -> BoardPersistenceResult<Label> {
        let mut state = self.writable(self.latency.write).await?;
        let label = state
            .labels
            .get_mut(&label_id)
            .ok_or_else(|| BoardPersistenceError::not_found(label_id))?;
        label.apply_update(update);
        Ok(label.clone())
    }

    async fn delete_label(&self, label_id: LabelId) -> BoardPersistenceResult<()> {
        let mut state = self.writable(self.latency.write).await?;
        if state.labels.remove(&label_id).is_none() {
            return Err(BoardPersistenceError::not_found(label_id));
        }
        state
            .card_labels
            .retain(|association| association.label_id != label_id);
        Ok(())
    }

    async fn toggle_label(
        &self,
        card_id: CardId,
        label_id: LabelId,
        action: LabelAction,
    ) -> BoardPersistenceResult<Vec<Label>> {
        let mut state = self.writable(self.latency.write).await?;
        if !state.cards.contains(card_id) {
            return Err(BoardPersistenceError::not_found(card_id));
        }
        if !state.labels.contains_key(&label_id) {
            return Err(BoardPersistenceError::not_found(label_id));
        }
        let association = CardLabel::new(card_id, label_id);
        match action {
            LabelAction::Attach => state.card_labels.insert(association),
            LabelAction::Detach => state.card_labels.remove(&association),
        };
        Ok(state.labels_of(card_id))
    }
}
