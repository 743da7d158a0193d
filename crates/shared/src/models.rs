//! Data models shared between the huddle client and the remote store.

use serde::{Deserialize, Serialize};

// --- Channels ---

/// A channel record as held by the client store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// A document in the remote `channels` collection. The `id` is the key the
/// document store assigned; clients never pick it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDoc {
    pub id: String,
    pub name: String,
}

// --- Channel Request/Response Types ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub name: String,
}
