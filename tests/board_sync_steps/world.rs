//! Shared world state for board synchronisation BDD scenarios.

use std::collections::BTreeMap;
use std::sync::Arc;

use corkboard::board::{
    adapters::{ChannelErrorSink, memory::InMemoryBoardPersistence},
    domain::{BoardId, CardId, LabelId, ListId},
    ports::SyncFailure,
    services::{
        AssociationToggle, BoardService, BoardStore, OptimisticSyncCoordinator, SyncOutcome,
        ToggleOutcome,
    },
};
use rstest::fixture;
use tokio::sync::mpsc::UnboundedReceiver;

/// Scenario world holding one open board and the names given to its items.
pub struct BoardSyncWorld {
    pub backend: Arc<InMemoryBoardPersistence>,
    pub service: BoardService<InMemoryBoardPersistence>,
    pub sync: OptimisticSyncCoordinator<InMemoryBoardPersistence, ChannelErrorSink>,
    pub toggle: AssociationToggle<InMemoryBoardPersistence, ChannelErrorSink>,
    pub failures: UnboundedReceiver<SyncFailure>,
    pub reported: Vec<SyncFailure>,
    pub board: Option<BoardId>,
    pub lists: BTreeMap<String, ListId>,
    pub cards: BTreeMap<String, CardId>,
    pub labels: BTreeMap<String, LabelId>,
    pub last_sync: Option<SyncOutcome>,
    pub last_toggle: Option<ToggleOutcome>,
}

impl BoardSyncWorld {
    /// Creates a world over a fresh backend that answers immediately.
    #[must_use]
    pub fn new() -> Self {
        let backend = Arc::new(InMemoryBoardPersistence::default());
        let store = BoardStore::new();
        let (channel_sink, failures) = ChannelErrorSink::channel();
        let sink = Arc::new(channel_sink);

        Self {
            service: BoardService::new(store.clone(), Arc::clone(&backend)),
            sync: OptimisticSyncCoordinator::new(
                store.clone(),
                Arc::clone(&backend),
                Arc::clone(&sink),
            ),
            toggle: AssociationToggle::new(store, Arc::clone(&backend), sink),
            backend,
            failures,
            reported: Vec::new(),
            board: None,
            lists: BTreeMap::new(),
            cards: BTreeMap::new(),
            labels: BTreeMap::new(),
            last_sync: None,
            last_toggle: None,
        }
    }

    /// Returns the open board.
    pub fn board(&self) -> Result<BoardId, eyre::Report> {
        self.board
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Returns the list created under `name`.
    pub fn list(&self, name: &str) -> Result<ListId, eyre::Report> {
        self.lists
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no list named {name} in scenario world"))
    }

    /// Returns the card created under `name`.
    pub fn card(&self, name: &str) -> Result<CardId, eyre::Report> {
        self.cards
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no card named {name} in scenario world"))
    }

    /// Returns the label created under `name`.
    pub fn label(&self, name: &str) -> Result<LabelId, eyre::Report> {
        self.labels
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no label named {name} in scenario world"))
    }

    /// Moves every failure reported so far into `reported`.
    pub fn collect_failures(&mut self) {
        while let Ok(failure) = self.failures.try_recv() {
            self.reported.push(failure);
        }
    }
}

impl Default for BoardSyncWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardSyncWorld {
    BoardSyncWorld::default()
}

/// Splits a comma-separated step argument into names.
pub fn names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
