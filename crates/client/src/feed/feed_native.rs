//! Native feed transport using tokio-tungstenite.

use dioxus::prelude::*;
use futures_channel::mpsc::unbounded;
use futures_util::{SinkExt, StreamExt};
use huddle_shared::{ChannelDoc, ClientCommand, ServerEvent, WsEnvelope};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{FeedHandle, FeedState, CHANNELS_COLLECTION};

/// Live connection to the channels feed (native implementation).
pub struct FeedConnection;

impl FeedConnection {
    /// Open the feed in a background tokio task and return its teardown
    /// handle.
    pub fn open(
        url: String,
        state: Signal<FeedState>,
        on_snapshot: impl Fn(Vec<ChannelDoc>) + Send + Sync + 'static,
    ) -> FeedHandle {
        open_feed(url, state, on_snapshot)
    }
}

fn open_feed(
    url: String,
    mut state: Signal<FeedState>,
    on_snapshot: impl Fn(Vec<ChannelDoc>) + Send + Sync + 'static,
) -> FeedHandle {
    let (shutdown_tx, mut shutdown_rx) = unbounded::<()>();

    tokio::spawn(async move {
        state.set(FeedState::Connecting);

        let (ws_stream, _response) = match connect_async(&url).await {
            Ok(conn) => conn,
            Err(e) => {
                crate::log_error!("feed connect to {} failed: {}", url, e);
                state.set(FeedState::Closed);
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();

        // Announce the live query before reading anything.
        let subscribe = WsEnvelope::new(ClientCommand::Subscribe {
            collection: CHANNELS_COLLECTION.to_string(),
        });
        match serde_json::to_string(&subscribe) {
            Ok(json) => {
                if let Err(e) = write.send(Message::text(json)).await {
                    crate::log_error!("feed subscribe failed: {}", e);
                    state.set(FeedState::Closed);
                    return;
                }
            }
            Err(e) => {
                crate::log_error!("feed subscribe serialize failed: {}", e);
                state.set(FeedState::Closed);
                return;
            }
        }

        state.set(FeedState::Streaming);
        crate::log_info!("channel feed streaming from {}", url);

        loop {
            tokio::select! {
                msg = read.next() => match msg {
                    Some(Ok(Message::Text(text))) => handle_frame(text.as_str(), &on_snapshot),
                    Some(Ok(Message::Close(_))) | None => {
                        crate::log_info!("channel feed closed by remote");
                        break;
                    }
                    Some(Ok(_)) => {
                        // Binary, ping and pong frames carry nothing for us.
                    }
                    Some(Err(e)) => {
                        crate::log_error!("feed read error: {}", e);
                        break;
                    }
                },
                _ = shutdown_rx.next() => {
                    let unsubscribe = WsEnvelope::new(ClientCommand::Unsubscribe {
                        collection: CHANNELS_COLLECTION.to_string(),
                    });
                    if let Ok(json) = serde_json::to_string(&unsubscribe) {
                        let _ = write.send(Message::text(json)).await;
                    }
                    let _ = write.send(Message::Close(None)).await;
                    break;
                }
            }
        }

        state.set(FeedState::Closed);
    });

    FeedHandle::new(shutdown_tx)
}

fn handle_frame(text: &str, on_snapshot: &(impl Fn(Vec<ChannelDoc>) + Send + Sync)) {
    match serde_json::from_str::<WsEnvelope<ServerEvent>>(text) {
        Ok(envelope) => match envelope.payload {
            ServerEvent::ChannelsSnapshot { docs } => on_snapshot(docs),
            ServerEvent::Error { code, message, .. } => {
                crate::log_warn!("feed server error {}: {}", code, message);
            }
        },
        Err(e) => crate::log_error!("feed frame parse failed: {}", e),
    }
}
