//! Board lists, ranked within their board.

use super::{BoardId, ListId};
use crate::ordering::{Position, Positioned};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// An ordered column of cards on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    id: ListId,
    board_id: BoardId,
    title: String,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedListData {
    /// Persisted list identifier.
    pub id: ListId,
    /// Owning board.
    pub board_id: BoardId,
    /// List title.
    pub title: String,
    /// Rank within the board.
    pub position: Position,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl List {
    /// Reconstructs a list from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedListData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            title: data.title,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the list identifier.
    #[must_use]
    pub const fn id(&self) -> ListId {
        self.id
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the list title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the rank within the board.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update and refreshes `updated_at`.
    pub fn apply_update(&mut self, update: &ListUpdate, clock: &impl Clock) {
        if let Some(title) = &update.title {
            title.clone_into(&mut self.title);
        }
        self.touch(clock);
    }

    /// Refreshes `updated_at` to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

impl Positioned for List {
    type Id = ListId;
    type ParentKey = BoardId;

    fn id(&self) -> ListId {
        self.id
    }

    fn parent_key(&self) -> BoardId {
        self.board_id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn place(&mut self, parent: BoardId, position: Position) {
        self.board_id = parent;
        self.position = position;
    }
}

/// Fields supplied when creating a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewList {
    /// List title.
    pub title: String,
}

impl NewList {
    /// Creates a list payload.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Partial update of a list's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUpdate {
    /// Replacement title.
    pub title: Option<String>,
}

impl ListUpdate {
    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
