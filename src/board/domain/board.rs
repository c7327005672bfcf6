//! Board aggregate and its creation and update payloads.

use super::{BoardId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A user-owned board holding ordered lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    owner_id: UserId,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Owner of the board.
    pub owner_id: UserId,
    /// Board title.
    pub title: String,
    /// Board description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            owner_id: data.owner_id,
            title: data.title,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Returns the board title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the board description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
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
    pub fn apply_update(&mut self, update: &BoardUpdate, clock: &impl Clock) {
        if let Some(title) = &update.title {
            title.clone_into(&mut self.title);
        }
        if let Some(description) = &update.description {
            description.clone_into(&mut self.description);
        }
        self.updated_at = clock.utc();
    }
}

/// Fields supplied when creating a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBoard {
    /// Board title.
    pub title: String,
    /// Board description.
    pub description: String,
}

impl NewBoard {
    /// Creates a board payload with an empty description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial update of a board's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

impl BoardUpdate {
    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
