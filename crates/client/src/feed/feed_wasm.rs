//! Web feed transport using the browser WebSocket API.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::unbounded;
use futures_util::{select, StreamExt};
use huddle_shared::{ChannelDoc, ClientCommand, ServerEvent, WsEnvelope};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{js_sys, CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use super::{FeedHandle, FeedState, CHANNELS_COLLECTION};

/// Live connection to the channels feed (WASM implementation).
pub struct FeedConnection;

impl FeedConnection {
    /// Open the feed on the browser event loop and return its teardown
    /// handle.
    pub fn open(
        url: String,
        state: Signal<FeedState>,
        on_snapshot: impl Fn(Vec<ChannelDoc>) + 'static,
    ) -> FeedHandle {
        open_feed(url, state, on_snapshot)
    }
}

fn open_feed(
    url: String,
    mut state: Signal<FeedState>,
    on_snapshot: impl Fn(Vec<ChannelDoc>) + 'static,
) -> FeedHandle {
    let (shutdown_tx, mut shutdown_rx) = unbounded::<()>();
    let on_snapshot: Rc<dyn Fn(Vec<ChannelDoc>)> = Rc::new(on_snapshot);

    spawn_local(async move {
        state.set(FeedState::Connecting);

        let ws = match connect(&url, on_snapshot).await {
            Ok(ws) => ws,
            Err(reason) => {
                crate::log_error!("feed connect to {} failed: {}", url, reason);
                state.set(FeedState::Closed);
                return;
            }
        };

        // Announce the live query before reading anything.
        let subscribe = WsEnvelope::new(ClientCommand::Subscribe {
            collection: CHANNELS_COLLECTION.to_string(),
        });
        match serde_json::to_string(&subscribe) {
            Ok(json) => {
                if let Err(e) = ws.send_with_str(&json) {
                    crate::log_error!("feed subscribe failed: {:?}", e);
                    let _ = ws.close();
                    state.set(FeedState::Closed);
                    return;
                }
            }
            Err(e) => {
                crate::log_error!("feed subscribe serialize failed: {}", e);
                let _ = ws.close();
                state.set(FeedState::Closed);
                return;
            }
        }

        state.set(FeedState::Streaming);
        crate::log_info!("channel feed streaming from {}", url);

        // Mirror socket closure into a stream so one select covers both
        // teardown paths.
        let (closed_tx, mut closed_rx) = unbounded::<()>();
        let onclose = Closure::wrap(Box::new(move |_: CloseEvent| {
            let _ = closed_tx.unbounded_send(());
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));
        onclose.forget();

        select! {
            _ = shutdown_rx.next() => {
                let unsubscribe = WsEnvelope::new(ClientCommand::Unsubscribe {
                    collection: CHANNELS_COLLECTION.to_string(),
                });
                if let Ok(json) = serde_json::to_string(&unsubscribe) {
                    let _ = ws.send_with_str(&json);
                }
                let _ = ws.close();
            }
            _ = closed_rx.next() => {
                crate::log_info!("channel feed closed by remote");
            }
        }

        state.set(FeedState::Closed);
    });

    FeedHandle::new(shutdown_tx)
}

/// Establish the socket and wire the message handler. The caller owns the
/// returned socket and is responsible for closing it.
async fn connect(
    url: &str,
    on_snapshot: Rc<dyn Fn(Vec<ChannelDoc>)>,
) -> Result<WebSocket, String> {
    let ws = WebSocket::new(url).map_err(|e| format!("failed to create WebSocket: {e:?}"))?;

    let is_open = Rc::new(RefCell::new(false));
    let failure = Rc::new(RefCell::new(None::<String>));

    let is_open_flag = is_open.clone();
    let onopen = Closure::wrap(Box::new(move |_: Event| {
        *is_open_flag.borrow_mut() = true;
    }) as Box<dyn FnMut(Event)>);
    ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    onopen.forget();

    let failure_flag = failure.clone();
    let onerror = Closure::wrap(Box::new(move |_: ErrorEvent| {
        *failure_flag.borrow_mut() = Some("WebSocket error".to_string());
    }) as Box<dyn FnMut(ErrorEvent)>);
    ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
        if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
            let text: String = text.into();
            match serde_json::from_str::<WsEnvelope<ServerEvent>>(&text) {
                Ok(envelope) => match envelope.payload {
                    ServerEvent::ChannelsSnapshot { docs } => on_snapshot(docs),
                    ServerEvent::Error { code, message, .. } => {
                        crate::log_warn!("feed server error {}: {}", code, message);
                    }
                },
                Err(e) => crate::log_error!("feed frame parse failed: {}", e),
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();

    // Wait up to 5 seconds for the open handshake.
    for _ in 0..500 {
        if *is_open.borrow() {
            return Ok(ws);
        }
        if let Some(reason) = failure.borrow().clone() {
            return Err(reason);
        }
        gloo_timers::future::TimeoutFuture::new(10).await;
    }

    Err("connection timeout".to_string())
}
