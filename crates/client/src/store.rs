//! Root application store.
//!
//! One [`StoreContext`] per application run, created by [`StoreProvider`]
//! and retrieved with [`use_store`]. The context wraps a plain
//! [`RootStore`] in signals: the store mirrors the remote `channels`
//! collection through the live snapshot feed and keeps a stubbed login
//! flag. Every snapshot fully replaces the local collection; at this scale
//! diffing buys nothing, though a larger deployment would want incremental
//! patches here.

use dioxus::prelude::*;
use huddle_shared::{ApiError, Channel, ChannelDoc, CreateChannelRequest};

use crate::api_client::ApiClient;
use crate::feed::{FeedConnection, FeedHandle, FeedState};
use crate::names;

/// Where the remote document store lives.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub base_url: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl RemoteConfig {
    fn api_client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }

    /// WebSocket endpoint for the live snapshot feed.
    fn feed_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            format!("ws://{base}")
        };
        format!("{ws_base}/api/feed")
    }
}

/// Plain application state. All collection and session mutation happens
/// here; [`StoreContext`] adds reactivity and the remote side effects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootStore {
    channels: Vec<Channel>,
    is_logged_in: bool,
}

impl RootStore {
    /// Channels ordered by identifier ascending. Computed on every call;
    /// the backing collection keeps whatever order snapshots arrived in.
    pub fn channels_sorted(&self) -> Vec<Channel> {
        let mut channels = self.channels.clone();
        channels.sort_by(|a, b| a.id.cmp(&b.id));
        channels
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    /// Replace the collection with the latest snapshot, one channel per
    /// remote document.
    pub fn update_channels(&mut self, docs: &[ChannelDoc]) {
        self.channels.clear();
        for doc in docs {
            self.channels.push(Channel {
                id: doc.id.clone(),
                name: doc.name.clone(),
            });
        }
    }

    pub fn login(&mut self) {
        self.is_logged_in = true;
    }

    pub fn logout(&mut self) {
        self.is_logged_in = false;
    }
}

/// Store handle provided to the component tree.
#[derive(Clone, Copy)]
pub struct StoreContext {
    state: Signal<RootStore>,
    feed: Signal<Option<FeedHandle>>,
    feed_state: Signal<FeedState>,
    remote: Signal<RemoteConfig>,
}

impl StoreContext {
    pub fn new(remote: RemoteConfig) -> Self {
        Self {
            state: Signal::new(RootStore::default()),
            feed: Signal::new(None),
            feed_state: Signal::new(FeedState::Idle),
            remote: Signal::new(remote),
        }
    }

    /// Channels ordered by identifier ascending (reactive read).
    pub fn channels_sorted(&self) -> Vec<Channel> {
        self.state.read().channels_sorted()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read().is_logged_in()
    }

    /// Lifecycle of the live subscription (reactive read).
    pub fn feed_state(&self) -> FeedState {
        self.feed_state.read().clone()
    }

    /// Open the live subscription to the remote `channels` collection.
    /// Every snapshot notification fully replaces the local collection.
    /// No-op while a subscription is already held.
    pub fn start_streaming_channels(&mut self) {
        if self.feed.read().is_some() {
            return;
        }
        let url = self.remote.read().feed_url();
        let state = self.state;
        let handle = FeedConnection::open(url, self.feed_state, move |docs| {
            let mut state = state;
            state.write().update_channels(&docs);
        });
        self.feed.set(Some(handle));
    }

    /// Drop the live subscription, if one is held. Calling without an
    /// active subscription is a no-op.
    pub fn stop_streaming_channels(&mut self) {
        if let Some(handle) = self.feed.write().take() {
            handle.unsubscribe();
        }
    }

    /// Ask the remote store to create a channel with a fresh two-word name.
    /// The new channel is not inserted locally; the live feed reports it
    /// back once the write lands. A failed write surfaces unchanged.
    pub async fn add_channel(&self) -> Result<Channel, ApiError> {
        let client = self.remote.read().api_client();
        let request = CreateChannelRequest {
            name: names::channel_name(),
        };
        client.post_json("/api/channels", &request).await
    }

    pub fn login(&mut self) {
        self.state.write().login();
    }

    pub fn logout(&mut self) {
        self.state.write().logout();
    }
}

/// Mounts one [`StoreContext`] for the whole subtree.
#[component]
pub fn StoreProvider(base_url: Option<String>, children: Element) -> Element {
    use_context_provider(|| {
        let remote = match base_url {
            Some(base_url) => RemoteConfig { base_url },
            None => RemoteConfig::default(),
        };
        StoreContext::new(remote)
    });
    children
}

/// Nearest enclosing [`StoreContext`].
///
/// Panics when called outside a [`StoreProvider`]; that is a wiring mistake
/// in the component tree, not a runtime condition.
pub fn use_store() -> StoreContext {
    try_use_context::<StoreContext>()
        .expect("use_store must be called inside a StoreProvider")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, name: &str) -> ChannelDoc {
        ChannelDoc {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn snapshot_fully_replaces_collection() {
        let mut store = RootStore::default();
        store.update_channels(&[doc("c1", "red-fox"), doc("c2", "blue-owl")]);
        store.update_channels(&[doc("c3", "tiny-bee")]);

        let channels = store.channels_sorted();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].id, "c3");
        assert_eq!(channels[0].name, "tiny-bee");
    }

    #[test]
    fn empty_snapshot_clears_collection() {
        let mut store = RootStore::default();
        store.update_channels(&[doc("c1", "red-fox")]);
        store.update_channels(&[]);
        assert!(store.channels_sorted().is_empty());
    }

    #[test]
    fn channels_sorted_orders_by_id() {
        let mut store = RootStore::default();
        store.update_channels(&[
            doc("z9", "blue-owl"),
            doc("a1", "red-fox"),
            doc("m5", "calm-yak"),
        ]);

        let ids: Vec<String> = store
            .channels_sorted()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["a1", "m5", "z9"]);
    }

    #[test]
    fn snapshot_scenario_two_documents() {
        let mut store = RootStore::default();
        store.update_channels(&[doc("a1", "red-fox"), doc("z9", "blue-owl")]);

        assert_eq!(
            store.channels_sorted(),
            vec![
                Channel {
                    id: "a1".to_string(),
                    name: "red-fox".to_string()
                },
                Channel {
                    id: "z9".to_string(),
                    name: "blue-owl".to_string()
                },
            ]
        );
    }

    #[test]
    fn login_logout_toggle_flag() {
        let mut store = RootStore::default();
        assert!(!store.is_logged_in());

        store.login();
        assert!(store.is_logged_in());

        store.logout();
        assert!(!store.is_logged_in());

        store.logout();
        store.login();
        assert!(store.is_logged_in());
    }

    #[test]
    fn feed_url_swaps_scheme_and_appends_path() {
        let remote = RemoteConfig {
            base_url: "https://chat.example.com/".to_string(),
        };
        assert_eq!(remote.feed_url(), "wss://chat.example.com/api/feed");

        let remote = RemoteConfig {
            base_url: "http://localhost:8080".to_string(),
        };
        assert_eq!(remote.feed_url(), "ws://localhost:8080/api/feed");
    }

    #[test]
    fn provider_hands_out_empty_store() {
        #[component]
        fn Probe() -> Element {
            let mut store = use_store();
            assert!(store.channels_sorted().is_empty());
            assert!(!store.is_logged_in());
            assert_eq!(store.feed_state(), FeedState::Idle);

            store.login();
            assert!(store.is_logged_in());
            store.logout();
            assert!(!store.is_logged_in());

            rsx! { "" }
        }

        #[component]
        fn App() -> Element {
            rsx! {
                StoreProvider { Probe {} }
            }
        }

        let mut dom = VirtualDom::new(App);
        dom.rebuild_in_place();
    }

    #[test]
    fn stop_streaming_without_start_is_a_noop() {
        #[component]
        fn Probe() -> Element {
            let mut store = use_store();
            store.stop_streaming_channels();
            store.stop_streaming_channels();
            assert!(store.channels_sorted().is_empty());
            assert_eq!(store.feed_state(), FeedState::Idle);
            rsx! { "" }
        }

        #[component]
        fn App() -> Element {
            rsx! {
                StoreProvider { Probe {} }
            }
        }

        let mut dom = VirtualDom::new(App);
        dom.rebuild_in_place();
    }

    #[test]
    #[should_panic(expected = "use_store must be called inside a StoreProvider")]
    fn use_store_outside_provider_panics() {
        #[component]
        fn Orphan() -> Element {
            let _ = use_store();
            rsx! { "" }
        }

        let mut dom = VirtualDom::new(Orphan);
        dom.rebuild_in_place();
    }
}
