//! Cards, ranked within their list, and card-to-label associations.

use super::{CardId, LabelId, ListId};
use crate::ordering::{Position, Positioned};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A task card inside a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    list_id: ListId,
    title: String,
    description: String,
    position: Position,
    labels: BTreeSet<LabelId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCardData {
    /// Persisted card identifier.
    pub id: CardId,
    /// Owning list.
    pub list_id: ListId,
    /// Card title.
    pub title: String,
    /// Card description.
    pub description: String,
    /// Rank within the list.
    pub position: Position,
    /// Labels attached to the card.
    pub labels: BTreeSet<LabelId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Reconstructs a card from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCardData) -> Self {
        Self {
            id: data.id,
            list_id: data.list_id,
            title: data.title,
            description: data.description,
            position: data.position,
            labels: data.labels,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the card identifier.
    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    /// Returns the owning list.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the card title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the card description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the rank within the list.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the attached label ids.
    #[must_use]
    pub const fn labels(&self) -> &BTreeSet<LabelId> {
        &self.labels
    }

    /// Returns `true` when the label is attached.
    #[must_use]
    pub fn has_label(&self, label_id: LabelId) -> bool {
        self.labels.contains(&label_id)
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

    /// Replaces the attached label set.
    pub fn set_labels(&mut self, labels: BTreeSet<LabelId>) {
        self.labels = labels;
    }

    /// Detaches a label, returning `true` when it was attached.
    pub fn detach_label(&mut self, label_id: LabelId) -> bool {
        self.labels.remove(&label_id)
    }

    /// Applies a partial update and refreshes `updated_at`.
    pub fn apply_update(&mut self, update: &CardUpdate, clock: &impl Clock) {
        if let Some(title) = &update.title {
            title.clone_into(&mut self.title);
        }
        if let Some(description) = &update.description {
            description.clone_into(&mut self.description);
        }
        self.touch(clock);
    }

    /// Refreshes `updated_at` to the current clock time.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

impl Positioned for Card {
    type Id = CardId;
    type ParentKey = ListId;

    fn id(&self) -> CardId {
        self.id
    }

    fn parent_key(&self) -> ListId {
        self.list_id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn place(&mut self, parent: ListId, position: Position) {
        self.list_id = parent;
        self.position = position;
    }
}

/// Fields supplied when creating a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    /// Card title.
    pub title: String,
    /// Card description.
    pub description: String,
}

impl NewCard {
    /// Creates a card payload with an empty description.
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

/// Partial update of a card's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

impl CardUpdate {
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

/// Many-to-many association between a card and a label.
///
/// A given pair exists at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardLabel {
    /// Associated card.
    pub card_id: CardId,
    /// Associated label.
    pub label_id: LabelId,
}

impl CardLabel {
    /// Creates an association record.
    #[must_use]
    pub const fn new(card_id: CardId, label_id: LabelId) -> Self {
        Self { card_id, label_id }
    }
}

/// Direction of a label toggle at the persistence boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAction {
    /// Attach the label; a no-op when already attached.
    Attach,
    /// Detach the label; a no-op when not attached.
    Detach,
}

impl LabelAction {
    /// Returns the action that flips the current membership.
    #[must_use]
    pub const fn toggling(attached: bool) -> Self {
        if attached { Self::Detach } else { Self::Attach }
    }

    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attach => "attach",
            Self::Detach => "detach",
        }
    }
}
