//! Roomcast Core
//!
//! Transport-agnostic room relay:
//! - `connection` - the handle a transport gives the core for each client
//! - `registry` - room name to member connections
//! - `broadcast` - best-effort fanout to a room's members
//! - `router` - decodes inbound events and dispatches them to handlers

pub mod broadcast;
pub mod connection;
pub mod event;
pub mod registry;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use broadcast::Broadcaster;
pub use connection::{Connection, ConnectionId, ConnectionRef, SendError};
pub use event::{
    ClientEvent, DEFAULT_ROOM, DEFAULT_USERNAME, EventError, EventKind, RoomName, RoomRequest,
    ServerEvent,
};
pub use registry::RoomRegistry;
pub use router::EventRouter;
