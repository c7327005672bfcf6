//! Kanban boards, their lists, cards and labels.
//!
//! Visible state lives in a [`services::BoardStore`]. Drags are translated
//! into reorder plans, written into the store at once and persisted in the
//! background; failed writes are rolled back and reported through an
//! [`ports::ErrorSink`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
