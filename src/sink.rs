//! Where the orchestrator reports the failures it converts into `500`s.

use tracing::error;

use crate::error::Error;

/// Receives every error the [`PageHandler`](crate::PageHandler) absorbs.
pub trait ErrorSink: Send + Sync + 'static {
    fn record(&self, error: &Error);
}

/// Default sink: one `tracing` event at `ERROR` level per failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn record(&self, err: &Error) {
        error!(error = %err, source = ?std::error::Error::source(err), "page render failed");
    }
}
