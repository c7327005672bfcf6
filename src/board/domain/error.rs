//! Error types for board domain operations.

use super::ItemRef;
use crate::ordering::OrderingError;
use thiserror::Error;

/// Errors returned by board domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The referenced board item is not known.
    #[error("{0} not found")]
    NotFound(ItemRef),

    /// The caller supplied malformed or inconsistent input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An ordering invariant check failed.
    #[error(transparent)]
    Ordering(#[from] OrderingError),
}

/// Result type for board domain operations.
pub type BoardDomainResult<T> = Result<T, BoardDomainError>;
