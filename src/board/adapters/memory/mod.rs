//! In-memory persistence backend.

mod latency;
mod persistence;

pub use latency::PersistenceLatency;
pub use persistence::InMemoryBoardPersistence;
