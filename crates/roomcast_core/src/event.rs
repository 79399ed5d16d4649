//! Relay Events
//!
//! Typed events crossing the transport boundary. Inbound payloads are parsed
//! with defaults here so handlers never see a missing field.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Room used when a request does not name one
pub const DEFAULT_ROOM: &str = "general";

/// Username used when a request does not carry one
pub const DEFAULT_USERNAME: &str = "Unknown";

/// Errors raised while decoding an inbound event
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("Not an inbound event: {0}")]
    NotInbound(EventKind),
}

/// Event type tag, named as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connect,
    Disconnect,
    JoinRoom,
    LeaveRoom,
    ChatMessage,
    ToggleLike,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::JoinRoom => "join room",
            Self::LeaveRoom => "leave room",
            Self::ChatMessage => "chat message",
            Self::ToggleLike => "toggle like",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "connect" => Ok(Self::Connect),
            "disconnect" => Ok(Self::Disconnect),
            "join room" => Ok(Self::JoinRoom),
            "leave room" => Ok(Self::LeaveRoom),
            "chat message" => Ok(Self::ChatMessage),
            "toggle like" => Ok(Self::ToggleLike),
            other => Err(EventError::UnknownEvent(other.to_string())),
        }
    }
}

/// Case-sensitive room name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomName(String);

impl RoomName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomName {
    fn default() -> Self {
        Self(DEFAULT_ROOM.to_string())
    }
}

impl Borrow<str> for RoomName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for RoomName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join/leave request after defaulting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRequest {
    pub username: String,
    pub room: RoomName,
}

impl RoomRequest {
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            username: text_field(payload, "username")
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            room: room_of(payload),
        }
    }
}

/// Inbound event from a client
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    JoinRoom(RoomRequest),
    LeaveRoom(RoomRequest),
    /// `{ id, username, message, timestamp, likes, room }`, relayed verbatim
    ChatMessage { room: RoomName, payload: Value },
    /// `{ id, delta, room }`, relayed verbatim
    ToggleLike { room: RoomName, payload: Value },
}

impl ClientEvent {
    /// Decode an event by its wire name.
    ///
    /// Payload fields are never validated: absent or `null` `username` and
    /// `room` fall back to their defaults. Only the name can be rejected.
    pub fn parse(name: &str, payload: Value) -> Result<Self, EventError> {
        let kind: EventKind = name.parse()?;
        Self::from_kind(kind, payload)
    }

    pub fn from_kind(kind: EventKind, payload: Value) -> Result<Self, EventError> {
        match kind {
            EventKind::JoinRoom => Ok(Self::JoinRoom(RoomRequest::from_payload(&payload))),
            EventKind::LeaveRoom => Ok(Self::LeaveRoom(RoomRequest::from_payload(&payload))),
            EventKind::ChatMessage => Ok(Self::ChatMessage {
                room: room_of(&payload),
                payload,
            }),
            EventKind::ToggleLike => Ok(Self::ToggleLike {
                room: room_of(&payload),
                payload,
            }),
            EventKind::Connect | EventKind::Disconnect => Err(EventError::NotInbound(kind)),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::JoinRoom(_) => EventKind::JoinRoom,
            Self::LeaveRoom(_) => EventKind::LeaveRoom,
            Self::ChatMessage { .. } => EventKind::ChatMessage,
            Self::ToggleLike { .. } => EventKind::ToggleLike,
        }
    }
}

/// Outbound event pushed to member connections
#[derive(Debug, Clone, PartialEq)]
pub struct ServerEvent {
    pub kind: EventKind,
    pub payload: Value,
}

impl ServerEvent {
    pub fn new(kind: EventKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Field as text; `None` only when absent or `null`.
///
/// Non-string values keep their JSON text so `5` and `"5"` stay apart from
/// each other and from the default.
fn text_field(payload: &Value, key: &str) -> Option<String> {
    match payload.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn room_of(payload: &Value) -> RoomName {
    text_field(payload, "room")
        .map(RoomName::from)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_kind_wire_names() {
        for kind in [
            EventKind::Connect,
            EventKind::Disconnect,
            EventKind::JoinRoom,
            EventKind::LeaveRoom,
            EventKind::ChatMessage,
            EventKind::ToggleLike,
        ] {
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
        }
        assert!(matches!(
            "join".parse::<EventKind>(),
            Err(EventError::UnknownEvent(name)) if name == "join"
        ));
    }

    #[test]
    fn test_join_defaults() {
        let event = ClientEvent::parse("join room", json!({})).unwrap();
        assert_eq!(
            event,
            ClientEvent::JoinRoom(RoomRequest {
                username: "Unknown".to_string(),
                room: RoomName::from("general"),
            })
        );
    }

    #[test]
    fn test_join_reads_fields() {
        let event =
            ClientEvent::parse("leave room", json!({"username": "ada", "room": "Lobby"})).unwrap();
        let ClientEvent::LeaveRoom(request) = event else {
            panic!("expected leave room");
        };
        assert_eq!(request.username, "ada");
        assert_eq!(request.room.as_str(), "Lobby");
    }

    #[test]
    fn test_missing_or_null_fields_default() {
        let request = RoomRequest::from_payload(&json!({"username": null, "room": null}));
        assert_eq!(request.username, DEFAULT_USERNAME);
        assert_eq!(request.room.as_str(), DEFAULT_ROOM);

        let request = RoomRequest::from_payload(&json!("not an object"));
        assert_eq!(request.room.as_str(), DEFAULT_ROOM);
    }

    #[test]
    fn test_non_string_room_is_its_own_room() {
        let numeric = RoomRequest::from_payload(&json!({"username": 7, "room": 5}));
        assert_eq!(numeric.username, "7");
        assert_eq!(numeric.room.as_str(), "5");
        assert_ne!(numeric.room, RoomName::default());

        let quoted = RoomRequest::from_payload(&json!({"room": "5"}));
        assert_ne!(quoted.room, numeric.room);

        let flag = RoomRequest::from_payload(&json!({"room": true}));
        assert_eq!(flag.room.as_str(), "true");
    }

    #[test]
    fn test_chat_message_keeps_payload() {
        let payload = json!({
            "id": "m1",
            "username": "ada",
            "message": "hi",
            "timestamp": 1700000000,
            "likes": 0,
            "room": "x",
            "extra": [1, 2]
        });
        let event = ClientEvent::parse("chat message", payload.clone()).unwrap();
        assert_eq!(
            event,
            ClientEvent::ChatMessage {
                room: RoomName::from("x"),
                payload,
            }
        );
    }

    #[test]
    fn test_toggle_like_default_room() {
        let event = ClientEvent::parse("toggle like", json!({"id": "m1", "delta": -1})).unwrap();
        assert_eq!(event.kind(), EventKind::ToggleLike);
        let ClientEvent::ToggleLike { room, .. } = event else {
            panic!("expected toggle like");
        };
        assert_eq!(room.as_str(), "general");
    }

    #[test]
    fn test_lifecycle_events_not_inbound() {
        assert!(matches!(
            ClientEvent::parse("connect", json!({})),
            Err(EventError::NotInbound(EventKind::Connect))
        ));
        assert!(ClientEvent::parse("disconnect", Value::Null).is_err());
    }

    #[test]
    fn test_room_names_case_sensitive() {
        assert_ne!(RoomName::from("General"), RoomName::default());
    }
}
