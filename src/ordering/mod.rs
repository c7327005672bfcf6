//! Ordered-collection engine for drag-and-drop reordering.
//!
//! Everything in this module is pure and independent of the Kanban domain:
//!
//! - [`PositionedCollection`] keeps the positions of every parent's children
//!   contiguous (`0..n-1`) across appends, removals and reassignments.
//! - [`plan_reorder`] turns a [`DragDescription`] into a [`ReorderPlan`], the
//!   complete new arrangement of every parent the drag touches.
//! - [`ParentSnapshot`] captures whole parents so a reorder can be undone
//!   without breaking contiguity.
//!
//! The same code path serves any item type implementing [`Positioned`]; in
//! this crate that is lists within a board and cards within lists.

mod collection;
mod error;
mod plan;
mod planner;
mod positioned;
mod snapshot;

pub use collection::PositionedCollection;
pub use error::{OrderingError, OrderingResult};
pub use plan::{DragDescription, DragLocation, Placement, ReorderPlan, sequence_placements};
pub use planner::plan_reorder;
pub use positioned::{Position, Positioned};
pub use snapshot::ParentSnapshot;

#[cfg(test)]
mod tests;
