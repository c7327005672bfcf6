//! Application services for board state and its synchronisation with the
//! backend.

mod error;
mod labels;
mod reorder;
mod session;
mod store;

pub use error::{BoardError, BoardResult};
pub use labels::{AssociationToggle, ToggleOutcome};
pub use reorder::{OptimisticSyncCoordinator, SyncOutcome};
pub use session::BoardService;
pub use store::{BoardSnapshot, BoardStore};
