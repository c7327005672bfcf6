//! Visible board state shared between the services and a presentation layer.

use crate::board::domain::{
    Board, BoardDomainError, BoardDomainResult, BoardPlan, Card, CardId, ItemRef, Label, LabelId,
    List, ListId,
};
use crate::ordering::{ParentSnapshot, Placement, Positioned, PositionedCollection};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct BoardState {
    board: Option<Board>,
    lists: PositionedCollection<List>,
    cards: PositionedCollection<Card>,
    labels: BTreeMap<LabelId, Label>,
}

/// Pre-plan copies of every parent a plan touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardSnapshot {
    /// Lists of the board as they were before a list plan.
    Lists(ParentSnapshot<List>),
    /// Cards of every source and destination list as they were before a card
    /// plan.
    Cards(ParentSnapshot<Card>),
}

impl BoardSnapshot {
    /// Returns the number of captured items.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Lists(lists) => lists.len(),
            Self::Cards(cards) => cards.len(),
        }
    }

    /// Returns `true` when nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parents a plan reads from or writes to: the current parent of each placed
/// item and the parent each placement names.
fn touched_parents<T: Positioned>(
    collection: &PositionedCollection<T>,
    placements: &[Placement<T::Id, T::ParentKey>],
) -> BTreeSet<T::ParentKey> {
    placements
        .iter()
        .flat_map(|placement| {
            let current = collection.get(placement.id).map(Positioned::parent_key);
            current.into_iter().chain([placement.parent])
        })
        .collect()
}

/// Handle to the visible state of the open board.
///
/// Clones share the same state. Every command runs under a single lock
/// acquisition and never suspends, so commands issued from one task take
/// effect in call order.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    state: Arc<RwLock<BoardState>>,
}

impl BoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens `board`, discarding lists and cards of any other board.
    pub fn set_board(&self, board: Board) {
        let mut state = self.write();
        let switched = state
            .board
            .as_ref()
            .is_none_or(|current| current.id() != board.id());
        if switched {
            state.lists = PositionedCollection::new();
            state.cards = PositionedCollection::new();
        }
        state.board = Some(board);
    }

    /// Closes the open board and forgets its lists and cards.
    pub fn clear_board(&self) {
        let mut state = self.write();
        state.board = None;
        state.lists = PositionedCollection::new();
        state.cards = PositionedCollection::new();
    }

    /// Replaces every list, dropping cards whose list disappeared.
    pub fn set_lists(&self, lists: impl IntoIterator<Item = List>) {
        let mut state = self.write();
        state.lists = PositionedCollection::from_items(lists);
        let orphaned: Vec<ListId> = state
            .cards
            .parents()
            .into_iter()
            .filter(|list_id| !state.lists.contains(*list_id))
            .collect();
        for list_id in orphaned {
            state.cards.remove_parent(list_id);
        }
    }

    /// Replaces the cards of one list.
    pub fn set_cards(&self, list_id: ListId, cards: impl IntoIterator<Item = Card>) {
        self.write().cards.set_children(list_id, cards);
    }

    /// Replaces every label.
    pub fn set_labels(&self, labels: impl IntoIterator<Item = Label>) {
        self.write().labels = labels.into_iter().map(|label| (label.id(), label)).collect();
    }

    /// Writes a plan into visible state and returns copies of every parent
    /// it touched, taken just before the write.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::Ordering`] when the plan names an item the
    /// store does not hold; nothing is written in that case.
    pub fn apply_plan(&self, board_plan: &BoardPlan) -> BoardDomainResult<BoardSnapshot> {
        let mut state = self.write();
        match board_plan {
            BoardPlan::Lists { plan, .. } => {
                let parents = touched_parents(&state.lists, plan.placements());
                let snapshot = state.lists.capture(parents);
                state.lists.apply_placements(plan.placements())?;
                Ok(BoardSnapshot::Lists(snapshot))
            }
            BoardPlan::Cards { plan } => {
                let parents = touched_parents(&state.cards, plan.placements());
                let snapshot = state.cards.capture(parents);
                state.cards.apply_placements(plan.placements())?;
                Ok(BoardSnapshot::Cards(snapshot))
            }
        }
    }

    /// Puts every captured parent back in its captured order.
    ///
    /// Items that moved into a captured parent after the capture keep their
    /// place, so every parent stays contiguous when plans overlap.
    pub fn rollback(&self, snapshot: BoardSnapshot) {
        let mut state = self.write();
        match snapshot {
            BoardSnapshot::Lists(lists) => state.lists.restore(lists),
            BoardSnapshot::Cards(cards) => state.cards.restore(cards),
        }
    }

    /// Appends a list created by the backend to the end of its board.
    #[must_use]
    pub fn append_list(&self, list: List) -> List {
        let board_id = list.board_id();
        self.write().lists.append(board_id, list).clone()
    }

    /// Appends a card created by the backend to the end of its list.
    #[must_use]
    pub fn append_card(&self, card: Card) -> Card {
        let list_id = card.list_id();
        self.write().cards.append(list_id, card).clone()
    }

    /// Removes a list together with its cards.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotFound`] when the list is not visible.
    pub fn remove_list(&self, list_id: ListId) -> BoardDomainResult<List> {
        let mut state = self.write();
        let removed = state
            .lists
            .remove_item(list_id)
            .map_err(|_| BoardDomainError::NotFound(ItemRef::from(list_id)))?;
        state.cards.remove_parent(list_id);
        Ok(removed)
    }

    /// Removes a card and closes the gap in its list.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotFound`] when the card is not visible.
    pub fn remove_card(&self, card_id: CardId) -> BoardDomainResult<Card> {
        self.write()
            .cards
            .remove_item(card_id)
            .map_err(|_| BoardDomainError::NotFound(ItemRef::from(card_id)))
    }

    /// Replaces a list's fields, keeping its visible placement.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotFound`] when the list is not visible.
    pub fn replace_list(&self, list: List) -> BoardDomainResult<List> {
        let list_id = list.id();
        self.write()
            .lists
            .modify(list_id, |current| *current = list)
            .cloned()
            .map_err(|_| BoardDomainError::NotFound(ItemRef::from(list_id)))
    }

    /// Replaces a card's fields, keeping its visible placement.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotFound`] when the card is not visible.
    pub fn replace_card(&self, card: Card) -> BoardDomainResult<Card> {
        let card_id = card.id();
        self.write()
            .cards
            .modify(card_id, |current| *current = card)
            .cloned()
            .map_err(|_| BoardDomainError::NotFound(ItemRef::from(card_id)))
    }

    /// Inserts or replaces a label.
    pub fn upsert_label(&self, label: Label) {
        self.write().labels.insert(label.id(), label);
    }

    /// Removes a label and detaches it from every visible card.
    #[must_use]
    pub fn remove_label(&self, label_id: LabelId) -> Option<Label> {
        let mut state = self.write();
        let removed = state.labels.remove(&label_id);
        let carriers: Vec<CardId> = state
            .cards
            .iter()
            .filter(|card| card.has_label(label_id))
            .map(Card::id)
            .collect();
        for card_id in carriers {
            if let Err(err) = state.cards.modify(card_id, |card| {
                card.detach_label(label_id);
            }) {
                tracing::debug!(%card_id, error = %err, "card vanished while detaching label");
            }
        }
        removed
    }

    /// Replaces the label set of a card, returning the previous set.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotFound`] when the card is not visible.
    pub fn set_card_labels(
        &self,
        card_id: CardId,
        labels: BTreeSet<LabelId>,
    ) -> BoardDomainResult<BTreeSet<LabelId>> {
        let mut state = self.write();
        let mut previous = BTreeSet::new();
        state
            .cards
            .modify(card_id, |card| {
                previous = card.labels().clone();
                card.set_labels(labels);
            })
            .map_err(|_| BoardDomainError::NotFound(ItemRef::from(card_id)))?;
        Ok(previous)
    }

    /// Returns the open board.
    #[must_use]
    pub fn board(&self) -> Option<Board> {
        self.read().board.clone()
    }

    /// Returns the lists of the open board in display order.
    #[must_use]
    pub fn lists(&self) -> Vec<List> {
        let state = self.read();
        state.board.as_ref().map_or_else(Vec::new, |board| {
            state
                .lists
                .children(board.id())
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Returns a visible list.
    #[must_use]
    pub fn list(&self, list_id: ListId) -> Option<List> {
        self.read().lists.get(list_id).cloned()
    }

    /// Returns the cards of a list in display order.
    #[must_use]
    pub fn cards_of(&self, list_id: ListId) -> Vec<Card> {
        self.read()
            .cards
            .children(list_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns a visible card.
    #[must_use]
    pub fn card(&self, card_id: CardId) -> Option<Card> {
        self.read().cards.get(card_id).cloned()
    }

    /// Returns every label, in id order.
    #[must_use]
    pub fn labels(&self) -> Vec<Label> {
        self.read().labels.values().cloned().collect()
    }

    /// Returns the labels attached to a card, in id order.
    ///
    /// Label ids the store has no record for are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotFound`] when the card is not visible.
    pub fn card_labels(&self, card_id: CardId) -> BoardDomainResult<Vec<Label>> {
        let state = self.read();
        let card = state
            .cards
            .get(card_id)
            .ok_or(BoardDomainError::NotFound(ItemRef::Card(card_id)))?;
        Ok(card
            .labels()
            .iter()
            .filter_map(|label_id| state.labels.get(label_id).cloned())
            .collect())
    }

    /// Returns a copy of every visible list, grouped by board.
    #[must_use]
    pub fn list_snapshot(&self) -> PositionedCollection<List> {
        self.read().lists.clone()
    }

    /// Returns a copy of every visible card, grouped by list.
    #[must_use]
    pub fn card_snapshot(&self) -> PositionedCollection<Card> {
        self.read().cards.clone()
    }
}
