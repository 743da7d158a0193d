//! Wire protocol for the live collection feed.
//!
//! Every frame in either direction is a [`WsEnvelope`] carrying a tagged
//! payload. The client announces a live query with `subscribe`; the server
//! answers with a full `channels.snapshot` event on every change to the
//! watched collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ChannelDoc;

/// Envelope wrapping every feed frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsEnvelope<T> {
    pub id: String,
    #[serde(flatten)]
    pub payload: T,
    pub ts: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl<T> WsEnvelope<T> {
    /// Wrap a payload with a fresh frame id and the current timestamp.
    pub fn new(payload: T) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            payload,
            ts: Utc::now(),
            correlation_id: None,
        }
    }
}

/// Commands the client sends over the feed socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ClientCommand {
    Subscribe { collection: String },
    Unsubscribe { collection: String },
}

/// Events the server pushes over the feed socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Point-in-time view of the whole `channels` collection. Supersedes
    /// every earlier snapshot; there is no incremental form.
    #[serde(rename = "channels.snapshot")]
    ChannelsSnapshot { docs: Vec<ChannelDoc> },
    Error {
        code: String,
        message: String,
        correlation_id: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_command_serializes_with_type_tag() {
        let envelope = WsEnvelope::new(ClientCommand::Subscribe {
            collection: "channels".to_string(),
        });
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["type"], "subscribe");
        assert_eq!(value["data"]["collection"], "channels");
        assert!(value.get("correlationId").is_none());
        assert!(!value["id"].as_str().unwrap().is_empty());
    }

    #[test]
    fn snapshot_event_parses_from_wire_shape() {
        let json = r#"{
            "id": "f3a6e6d0-6f0f-4c53-9f6a-3b7f6f1f2a9b",
            "type": "channels.snapshot",
            "data": { "docs": [
                { "id": "a1", "name": "red-fox" },
                { "id": "z9", "name": "blue-owl" }
            ] },
            "ts": "2026-01-05T10:00:00Z"
        }"#;
        let envelope: WsEnvelope<ServerEvent> = serde_json::from_str(json).unwrap();
        match envelope.payload {
            ServerEvent::ChannelsSnapshot { docs } => {
                assert_eq!(docs.len(), 2);
                assert_eq!(docs[0].id, "a1");
                assert_eq!(docs[0].name, "red-fox");
                assert_eq!(docs[1].id, "z9");
            }
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[test]
    fn error_event_carries_correlation_id() {
        let json = r#"{
            "id": "0e2f7c3a-54d7-49a8-9d1c-3f2f8f4b5c6d",
            "type": "error",
            "data": { "code": "denied", "message": "no access", "correlationId": "abc" },
            "ts": "2026-01-05T10:00:00Z"
        }"#;
        let envelope: WsEnvelope<ServerEvent> = serde_json::from_str(json).unwrap();
        match envelope.payload {
            ServerEvent::Error { code, correlation_id, .. } => {
                assert_eq!(code, "denied");
                assert_eq!(correlation_id.as_deref(), Some("abc"));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }
}
