//! Optimistic attach and detach of labels on cards.

use super::{BoardResult, BoardStore};
use crate::board::{
    domain::{BoardDomainError, CardId, CardLabel, ItemRef, Label, LabelAction, LabelId},
    ports::{BoardPersistence, ErrorSink, SyncFailure, SyncOperation},
};
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

/// How a label toggle settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The label is now attached.
    Attached,
    /// The label is now detached.
    Detached,
    /// The backend refused the change and the previous label set was
    /// restored.
    RolledBack,
}

/// Flips card-label associations in visible state and confirms them with
/// the backend.
pub struct AssociationToggle<P, S>
where
    P: BoardPersistence,
    S: ErrorSink,
{
    store: BoardStore,
    persistence: Arc<P>,
    sink: Arc<S>,
}

impl<P, S> Clone for AssociationToggle<P, S>
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

impl<P, S> AssociationToggle<P, S>
where
    P: BoardPersistence + 'static,
    S: ErrorSink + 'static,
{
    /// Creates a toggle writing into `store`.
    #[must_use]
    pub const fn new(store: BoardStore, persistence: Arc<P>, sink: Arc<S>) -> Self {
        Self {
            store,
            persistence,
            sink,
        }
    }

    /// Detaches `label_id` from the card when attached, attaches it
    /// otherwise.
    ///
    /// The flip is visible before this returns. Once the backend answers,
    /// the card's label set is replaced with the one the backend reports and
    /// the outcome follows that set, not the requested action. The returned
    /// future owns its handles and can be spawned.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::NotFound`] when the card is not visible.
    pub fn toggle(
        &self,
        card_id: CardId,
        label_id: LabelId,
    ) -> BoardResult<impl Future<Output = ToggleOutcome> + Send + 'static + use<P, S>> {
        let card = self
            .store
            .card(card_id)
            .ok_or(BoardDomainError::NotFound(ItemRef::Card(card_id)))?;
        let action = LabelAction::toggling(card.has_label(label_id));
        let mut flipped = card.labels().clone();
        match action {
            LabelAction::Attach => flipped.insert(label_id),
            LabelAction::Detach => flipped.remove(&label_id),
        };
        let previous = self.store.set_card_labels(card_id, flipped)?;
        tracing::debug!(%card_id, %label_id, action = action.as_str(), "label toggled locally");

        let store = self.store.clone();
        let persistence = Arc::clone(&self.persistence);
        let sink = Arc::clone(&self.sink);
        Ok(async move {
            let association = CardLabel::new(card_id, label_id);
            match persistence.toggle_label(card_id, label_id, action).await {
                Ok(labels) => {
                    let attached = labels.iter().any(|label| label.id() == label_id);
                    refresh(&store, card_id, labels);
                    if attached {
                        ToggleOutcome::Attached
                    } else {
                        ToggleOutcome::Detached
                    }
                }
                Err(error) => {
                    if let Err(err) = store.set_card_labels(card_id, previous) {
                        tracing::debug!(%card_id, error = %err, "card gone before rollback");
                    }
                    let operation = SyncOperation::ToggleLabel {
                        association,
                        action,
                    };
                    tracing::warn!(%operation, %error, "label toggle rolled back");
                    sink.report(&SyncFailure::new(operation, error));
                    ToggleOutcome::RolledBack
                }
            }
        })
    }
}

fn refresh(store: &BoardStore, card_id: CardId, labels: Vec<Label>) {
    let authoritative: BTreeSet<LabelId> = labels.iter().map(Label::id).collect();
    for label in labels {
        store.upsert_label(label);
    }
    if let Err(err) = store.set_card_labels(card_id, authoritative) {
        tracing::debug!(%card_id, error = %err, "card gone before confirmation");
    }
}
