//! Error types for ordered-collection operations.

use std::fmt;
use thiserror::Error;

/// Errors returned by [`PositionedCollection`](super::PositionedCollection)
/// and the reorder planner.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderingError {
    /// The referenced item is not part of the collection.
    #[error("item {0} not found")]
    NotFound(String),

    /// The caller supplied arguments inconsistent with the collection.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl OrderingError {
    /// Builds a [`OrderingError::NotFound`] for the given identifier.
    pub fn not_found(id: impl fmt::Display) -> Self {
        Self::NotFound(id.to_string())
    }
}

/// Result type for ordered-collection operations.
pub type OrderingResult<T> = Result<T, OrderingError>;
