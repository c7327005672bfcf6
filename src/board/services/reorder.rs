//! Optimistic reordering of lists and cards.

use super::{BoardResult, BoardSnapshot, BoardStore};
use crate::board::{
    domain::{BoardDomainError, BoardDrag, BoardPlan, CardDrag, ListDrag},
    ports::{BoardPersistence, BoardPersistenceResult, ErrorSink, SyncFailure, SyncOperation},
};
use crate::ordering::plan_reorder;
use std::future::Future;
use std::sync::Arc;

/// How an optimistic reorder settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The plan was empty; nothing was written and the backend was not
    /// called.
    Unchanged,
    /// The backend accepted the plan; visible state stays as written.
    Confirmed,
    /// The backend rejected the plan; visible state was restored and the
    /// failure reported.
    RolledBack,
}

/// Applies reorder plans to visible state at once and reconciles with the
/// backend afterwards.
///
/// Each entry point performs its visible write before returning. The
/// returned future owns everything it needs, so it can be awaited in place or
/// handed to `tokio::spawn`. It only awaits the backend and, on failure,
/// restores the parents it captured. A rollback that lands after a newer
/// reorder keeps the items that reorder moved into those parents, so every
/// list stays contiguous.
pub struct OptimisticSyncCoordinator<P, S>
where
    P: BoardPersistence,
    S: ErrorSink,
{
    store: BoardStore,
    persistence: Arc<P>,
    sink: Arc<S>,
}

impl<P, S> Clone for OptimisticSyncCoordinator<P, S>
where
    P: BoardPersistence,
    S: ErrorSink,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            persistence: Arc::clone(&self.persistence),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<P, S> OptimisticSyncCoordinator<P, S>
where
    P: BoardPersistence + 'static,
    S: ErrorSink + 'static,
{
    /// Creates a coordinator writing into `store`.
    #[must_use]
    pub const fn new(store: BoardStore, persistence: Arc<P>, sink: Arc<S>) -> Self {
        Self {
            store,
            persistence,
            sink,
        }
    }

    /// Returns the store this coordinator writes into.
    #[must_use]
    pub const fn store(&self) -> &BoardStore {
        &self.store
    }

    /// Plans a drag against visible state and applies the result.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Domain`] when the dragged item is not visible
    /// or does not sit under the reported source parent.
    pub fn submit_drag(
        &self,
        drag: BoardDrag,
    ) -> BoardResult<impl Future<Output = SyncOutcome> + Send + 'static + use<P, S>> {
        let plan = match drag {
            BoardDrag::List(list_drag) => self.plan_lists(list_drag)?,
            BoardDrag::Card(card_drag) => self.plan_cards(card_drag)?,
        };
        self.apply(plan)
    }

    /// Plans and applies a list drag.
    ///
    /// # Errors
    ///
    /// See [`OptimisticSyncCoordinator::submit_drag`].
    pub fn submit_list_drag(
        &self,
        drag: ListDrag,
    ) -> BoardResult<impl Future<Output = SyncOutcome> + Send + 'static + use<P, S>> {
        self.apply(self.plan_lists(drag)?)
    }

    /// Plans and applies a card drag.
    ///
    /// # Errors
    ///
    /// See [`OptimisticSyncCoordinator::submit_drag`].
    pub fn submit_card_drag(
        &self,
        drag: CardDrag,
    ) -> BoardResult<impl Future<Output = SyncOutcome> + Send + 'static + use<P, S>> {
        self.apply(self.plan_cards(drag)?)
    }

    /// Writes `plan` into visible state and returns the future that
    /// persists it.
    ///
    /// An empty plan writes nothing and resolves to
    /// [`SyncOutcome::Unchanged`] without calling the backend.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardError::Domain`] when the plan names an item that is
    /// not visible. Visible state is untouched in that case.
    pub fn apply(
        &self,
        plan: BoardPlan,
    ) -> BoardResult<impl Future<Output = SyncOutcome> + Send + 'static + use<P, S>> {
        let pending = if plan.is_empty() {
            None
        } else {
            let snapshot = self.store.apply_plan(&plan)?;
            tracing::debug!(placements = plan.len(), "reorder applied to visible state");
            Some(Reconciliation {
                store: self.store.clone(),
                persistence: Arc::clone(&self.persistence),
                sink: Arc::clone(&self.sink),
                plan,
                snapshot,
            })
        };

        Ok(async move {
            let Some(reconciliation) = pending else {
                return SyncOutcome::Unchanged;
            };
            reconciliation.run().await
        })
    }

    fn plan_lists(&self, drag: ListDrag) -> BoardResult<BoardPlan> {
        let lists = self.store.list_snapshot();
        let plan = plan_reorder(&lists, &drag).map_err(BoardDomainError::from)?;
        Ok(BoardPlan::lists(drag.source.parent, plan))
    }

    fn plan_cards(&self, drag: CardDrag) -> BoardResult<BoardPlan> {
        let cards = self.store.card_snapshot();
        let plan = plan_reorder(&cards, &drag).map_err(BoardDomainError::from)?;
        Ok(BoardPlan::cards(plan))
    }
}

/// An applied plan waiting for the backend's answer.
struct Reconciliation<P, S> {
    store: BoardStore,
    persistence: Arc<P>,
    sink: Arc<S>,
    plan: BoardPlan,
    snapshot: BoardSnapshot,
}

impl<P, S> Reconciliation<P, S>
where
    P: BoardPersistence,
    S: ErrorSink,
{
    async fn run(self) -> SyncOutcome {
        let operation = operation_of(&self.plan);
        match self.persist().await {
            Ok(()) => {
                tracing::debug!(%operation, "reorder confirmed");
                SyncOutcome::Confirmed
            }
            Err(error) => {
                let restored = self.snapshot.len();
                self.store.rollback(self.snapshot);
                tracing::warn!(%operation, %error, restored, "reorder rolled back");
                self.sink.report(&SyncFailure::new(operation, error));
                SyncOutcome::RolledBack
            }
        }
    }

    async fn persist(&self) -> BoardPersistenceResult<()> {
        match &self.plan {
            BoardPlan::Lists { board_id, plan } => {
                let lists = self
                    .persistence
                    .reorder_lists(*board_id, plan.placements())
                    .await?;
                tracing::trace!(%board_id, returned = lists.len(), "lists persisted");
            }
            BoardPlan::Cards { plan } => {
                let cards = self.persistence.reorder_cards(plan.placements()).await?;
                tracing::trace!(returned = cards.len(), "cards persisted");
            }
        }
        Ok(())
    }
}

const fn operation_of(board_plan: &BoardPlan) -> SyncOperation {
    match board_plan {
        BoardPlan::Lists { board_id, .. } => SyncOperation::ReorderLists(*board_id),
        BoardPlan::Cards { .. } => SyncOperation::ReorderCards,
    }
}
