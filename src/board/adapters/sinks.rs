//! Error sink adapters.

use crate::board::ports::{ErrorSink, SyncFailure};
use tokio::sync::mpsc;

/// Reports contained failures as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, failure: &SyncFailure) {
        tracing::error!(
            operation = %failure.operation(),
            error = %failure.error(),
            "optimistic update rolled back"
        );
    }
}

/// Forwards contained failures to an unbounded channel.
///
/// Failures reported after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelErrorSink {
    sender: mpsc::UnboundedSender<SyncFailure>,
}

impl ChannelErrorSink {
    /// Creates a sink together with the receiving end of its channel.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SyncFailure>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ErrorSink for ChannelErrorSink {
    fn report(&self, failure: &SyncFailure) {
        if self.sender.send(failure.clone()).is_err() {
            tracing::debug!(%failure, "error observer gone, dropping failure");
        }
    }
}
