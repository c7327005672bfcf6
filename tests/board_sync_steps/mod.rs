//! Step definitions for optimistic board synchronisation scenarios.

pub mod world;

mod given;
mod then;
mod when;
