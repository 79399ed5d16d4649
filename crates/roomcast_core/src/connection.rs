//! Client Connections
//!
//! The core never owns a socket. Transports hand it a [`ConnectionRef`] and
//! the core only ever asks two things of it: who it is, and to queue an event.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::event::ServerEvent;

/// Stable identity of one client session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors a transport reports when it cannot queue an outbound event.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("Connection closed")]
    Closed,

    #[error("Outbound queue full")]
    Full,
}

/// One live client session, owned by the transport layer.
///
/// `send` must not block: implementations queue the event and return.
pub trait Connection: Send + Sync {
    fn id(&self) -> ConnectionId;

    fn send(&self, event: Arc<ServerEvent>) -> Result<(), SendError>;
}

/// Shared handle to a connection
pub type ConnectionRef = Arc<dyn Connection>;
