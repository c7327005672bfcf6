//! Error-observation port for failures contained by optimistic updates.
//!
//! Optimistic operations never propagate persistence failures to their
//! caller; they roll back and report here instead, so a presentation layer
//! can tell the user why the board snapped back.

use super::BoardPersistenceError;
use crate::board::domain::{BoardId, CardLabel, LabelAction};
use std::fmt;

/// The optimistic operation whose persistence call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOperation {
    /// Repositioning the lists of a board.
    ReorderLists(BoardId),
    /// Repositioning cards within or between lists.
    ReorderCards,
    /// Attaching or detaching a label.
    ToggleLabel {
        /// The association being toggled.
        association: CardLabel,
        /// The requested direction.
        action: LabelAction,
    },
}

impl fmt::Display for SyncOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReorderLists(board_id) => write!(f, "reorder lists of board {board_id}"),
            Self::ReorderCards => write!(f, "reorder cards"),
            Self::ToggleLabel {
                association,
                action,
            } => write!(
                f,
                "{} label {} on card {}",
                action.as_str(),
                association.label_id,
                association.card_id
            ),
        }
    }
}

/// A persistence failure that was rolled back locally.
#[derive(Debug, Clone)]
pub struct SyncFailure {
    operation: SyncOperation,
    error: BoardPersistenceError,
}

impl SyncFailure {
    /// Creates a failure record.
    #[must_use]
    pub const fn new(operation: SyncOperation, error: BoardPersistenceError) -> Self {
        Self { operation, error }
    }

    /// Returns the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> SyncOperation {
        self.operation
    }

    /// Returns the persistence error.
    #[must_use]
    pub const fn error(&self) -> &BoardPersistenceError {
        &self.error
    }
}

impl fmt::Display for SyncFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to {}: {}", self.operation, self.error)
    }
}

/// Receiver of contained failures.
///
/// Implementations must not block; they are called from the task that
/// performed the rollback.
pub trait ErrorSink: Send + Sync {
    /// Records a failure that has already been rolled back.
    fn report(&self, failure: &SyncFailure);
}
