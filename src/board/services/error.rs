//! Service-level errors.

use crate::board::{domain::BoardDomainError, ports::BoardPersistenceError};
use thiserror::Error;

/// Errors returned by board services.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Persistence operation failed.
    #[error(transparent)]
    Persistence(#[from] BoardPersistenceError),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;
