//! Corkboard: ordering and optimistic synchronisation for Kanban boards.
//!
//! This crate keeps the visible arrangement of lists and cards consistent
//! while a user drags them around, and reconciles that arrangement with a
//! persistence backend that may fail.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`ordering`]: Parent-scoped ordered collections and the reorder planner
//! - [`board`]: Board domain, persistence port, and optimistic services

pub mod board;
pub mod ordering;
