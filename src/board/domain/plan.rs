//! Reorder plans scoped to one kind of board item.

use super::{BoardId, CardPlan, ListPlan};
use serde::{Deserialize, Serialize};

/// A reorder plan for either the lists of a board or its cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardPlan {
    /// New positions for the lists of one board.
    Lists {
        /// Board whose lists are repositioned.
        board_id: BoardId,
        /// The list placements.
        plan: ListPlan,
    },
    /// New lists and positions for cards.
    Cards {
        /// The card placements.
        plan: CardPlan,
    },
}

impl BoardPlan {
    /// Wraps a list plan for `board_id`.
    #[must_use]
    pub const fn lists(board_id: BoardId, plan: ListPlan) -> Self {
        Self::Lists { board_id, plan }
    }

    /// Wraps a card plan.
    #[must_use]
    pub const fn cards(plan: CardPlan) -> Self {
        Self::Cards { plan }
    }

    /// Returns `true` when the plan moves nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        match self {
            Self::Lists { plan, .. } => plan.is_empty(),
            Self::Cards { plan } => plan.is_empty(),
        }
    }

    /// Returns the number of placements.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Lists { plan, .. } => plan.len(),
            Self::Cards { plan } => plan.len(),
        }
    }
}
