//! Simulated network latency for the in-memory backend.

use std::time::Duration;

/// Delays applied by [`InMemoryBoardPersistence`] before answering.
///
/// [`InMemoryBoardPersistence`]: super::InMemoryBoardPersistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistenceLatency {
    /// Delay before answering queries.
    pub read: Duration,
    /// Delay before answering create, update, delete and label calls.
    pub write: Duration,
    /// Delay before answering bulk reposition calls.
    pub reorder: Duration,
}

impl Default for PersistenceLatency {
    fn default() -> Self {
        Self {
            read: Duration::from_millis(800),
            write: Duration::from_millis(500),
            reorder: Duration::from_millis(800),
        }
    }
}

impl PersistenceLatency {
    /// Answers every call immediately.
    ///
    /// Useful for tests.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            read: Duration::ZERO,
            write: Duration::ZERO,
            reorder: Duration::ZERO,
        }
    }

    /// Applies the same delay to every call.
    #[must_use]
    pub const fn uniform(delay: Duration) -> Self {
        Self {
            read: delay,
            write: delay,
            reorder: delay,
        }
    }
}
