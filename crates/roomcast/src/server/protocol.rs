//! WebSocket Protocol Messages
//!
//! Every text message, in either direction, is one JSON frame:
//! `{ "type": "<event name>", "data": <payload> }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use roomcast_core::ServerEvent;

/// Errors decoding an inbound text message
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Invalid frame: {0}")]
    InvalidFrame(#[from] serde_json::Error),
}

/// A single event on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Frame {
    /// Event name: `join room`, `leave room`, `chat message`, `toggle like`
    #[serde(rename = "type")]
    pub event: String,

    /// Event payload; omitted inbound means no fields at all
    #[serde(default)]
    pub data: Value,
}

impl Frame {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<&ServerEvent> for Frame {
    fn from(event: &ServerEvent) -> Self {
        Self {
            event: event.kind.as_str().to_string(),
            data: event.payload.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomcast_core::EventKind;
    use serde_json::json;

    #[test]
    fn test_decode_client_frame() {
        let frame = Frame::decode(r#"{"type":"join room","data":{"username":"ada","room":"x"}}"#)
            .unwrap();
        assert_eq!(frame.event, "join room");
        assert_eq!(frame.data, json!({"username": "ada", "room": "x"}));
    }

    #[test]
    fn test_decode_without_data() {
        let frame = Frame::decode(r#"{"type":"join room"}"#).unwrap();
        assert_eq!(frame.data, Value::Null);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Frame::decode("not json").is_err());
        assert!(Frame::decode(r#"{"data":{}}"#).is_err());
    }

    #[test]
    fn test_server_event_frame() {
        let event = ServerEvent::new(EventKind::ToggleLike, json!({"id": "m1", "delta": -1, "room": "x"}));
        let json = Frame::from(&event).encode().unwrap();
        assert!(json.contains("\"type\":\"toggle like\""));
        assert!(json.contains("\"delta\":-1"));
    }
}
