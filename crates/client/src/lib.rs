//! Huddle client state layer.
//!
//! Reactive store for the huddle chat client: [`StoreProvider`] mounts one
//! [`StoreContext`] for the component tree, the context mirrors the remote
//! `channels` collection through a live snapshot feed, and
//! [`use_store`] retrieves it from any descendant.

pub mod api_client;
pub mod feed;
pub mod logging;
pub mod names;
pub mod store;

pub use api_client::ApiClient;
pub use feed::{FeedConnection, FeedHandle, FeedState};
pub use store::{use_store, RemoteConfig, RootStore, StoreContext, StoreProvider};
