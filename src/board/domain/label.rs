//! Global labels that cards may reference.

use super::LabelId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, coloured tag shared by every board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    id: LabelId,
    name: String,
    color: String,
    created_at: DateTime<Utc>,
}

impl Label {
    /// Creates a label as reported by the backend.
    #[must_use]
    pub fn new(
        id: LabelId,
        name: impl Into<String>,
        color: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            created_at,
        }
    }

    /// Returns the label identifier.
    #[must_use]
    pub const fn id(&self) -> LabelId {
        self.id
    }

    /// Returns the label name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the label colour, as supplied by the user.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies a partial update. Labels carry no modification timestamp.
    pub fn apply_update(&mut self, update: &LabelUpdate) {
        if let Some(name) = &update.name {
            name.clone_into(&mut self.name);
        }
        if let Some(color) = &update.color {
            color.clone_into(&mut self.color);
        }
    }
}

/// Fields supplied when creating a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLabel {
    /// Label name.
    pub name: String,
    /// Label colour.
    pub color: String,
}

impl NewLabel {
    /// Creates a label payload.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Partial update of a label's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelUpdate {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement colour.
    pub color: Option<String>,
}

impl LabelUpdate {
    /// Sets the replacement name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
