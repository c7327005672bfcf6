//! Port contracts for board persistence and failure observation.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod error_sink;
pub mod persistence;

pub use error_sink::{ErrorSink, SyncFailure, SyncOperation};
pub use persistence::{BoardPersistence, BoardPersistenceError, BoardPersistenceResult};

#[cfg(test)]
pub use persistence::MockBoardPersistence;
