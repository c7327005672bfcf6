//! Adapter implementations for board ports.
//!
//! - [`memory::InMemoryBoardPersistence`]: thread-safe in-memory backend with
//!   simulated latency and failure injection
//! - [`TracingErrorSink`]: reports contained failures as `tracing` events
//! - [`ChannelErrorSink`]: forwards contained failures to a presentation
//!   layer over a channel

pub mod memory;

mod sinks;

pub use sinks::{ChannelErrorSink, TracingErrorSink};
