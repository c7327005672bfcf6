//! Identifier types for the board domain.
//!
//! Identifiers are stable integers assigned by the persistence backend.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a backend-assigned identifier.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Identifier of the user who owns boards.
    UserId
);
integer_id!(
    /// Identifier of a board.
    BoardId
);
integer_id!(
    /// Identifier of a list within a board.
    ListId
);
integer_id!(
    /// Identifier of a card within a list.
    CardId
);
integer_id!(
    /// Identifier of a global label.
    LabelId
);

/// Typed reference to any board item, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ItemRef {
    /// A board.
    Board(BoardId),
    /// A list.
    List(ListId),
    /// A card.
    Card(CardId),
    /// A label.
    Label(LabelId),
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board(id) => write!(f, "board {id}"),
            Self::List(id) => write!(f, "list {id}"),
            Self::Card(id) => write!(f, "card {id}"),
            Self::Label(id) => write!(f, "label {id}"),
        }
    }
}

impl From<BoardId> for ItemRef {
    fn from(id: BoardId) -> Self {
        Self::Board(id)
    }
}

impl From<ListId> for ItemRef {
    fn from(id: ListId) -> Self {
        Self::List(id)
    }
}

impl From<CardId> for ItemRef {
    fn from(id: CardId) -> Self {
        Self::Card(id)
    }
}

impl From<LabelId> for ItemRef {
    fn from(id: LabelId) -> Self {
        Self::Label(id)
    }
}
