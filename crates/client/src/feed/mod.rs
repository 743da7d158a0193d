//! Live snapshot feed for the remote `channels` collection.
//!
//! Opening the feed connects a WebSocket, announces a live query with a
//! `subscribe` command, and forwards every `channels.snapshot` event's
//! documents to the store. There is no reconnect: connection loss is logged
//! and the feed goes quiet, with no error channel back to the store.

use futures_channel::mpsc::UnboundedSender;

/// Lifecycle of a feed connection. Observational only; the store takes no
/// action on transitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeedState {
    #[default]
    Idle,
    Connecting,
    Streaming,
    Closed,
}

impl FeedState {
    pub fn is_streaming(&self) -> bool {
        matches!(self, FeedState::Streaming)
    }
}

/// Handle for tearing down an open feed.
#[derive(Debug, Clone)]
pub struct FeedHandle {
    shutdown: UnboundedSender<()>,
}

impl FeedHandle {
    pub(crate) fn new(shutdown: UnboundedSender<()>) -> Self {
        Self { shutdown }
    }

    /// Ask the connection task to close the socket. Signalling a feed that
    /// already went away is a no-op.
    pub fn unsubscribe(&self) {
        let _ = self.shutdown.unbounded_send(());
    }
}

/// Collection the feed watches.
pub(crate) const CHANNELS_COLLECTION: &str = "channels";

// Include platform-specific transport
#[cfg(target_arch = "wasm32")]
mod feed_wasm;
#[cfg(target_arch = "wasm32")]
pub use feed_wasm::FeedConnection;

#[cfg(not(target_arch = "wasm32"))]
mod feed_native;
#[cfg(not(target_arch = "wasm32"))]
pub use feed_native::FeedConnection;
