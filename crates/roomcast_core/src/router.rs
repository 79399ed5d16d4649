//! Event Router
//!
//! Entry points the transport wires its lifecycle and inbound events to.
//! Each inbound event is parsed with defaults into a [`ClientEvent`] and
//! dispatched to its handler.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use crate::broadcast::Broadcaster;
use crate::connection::{Connection, ConnectionId, ConnectionRef};
use crate::event::{ClientEvent, EventError, EventKind, RoomName, RoomRequest, ServerEvent};
use crate::registry::RoomRegistry;

pub struct EventRouter {
    registry: Arc<RoomRegistry>,
    broadcaster: Broadcaster,

    /// Connected clients
    connections: DashMap<ConnectionId, ConnectionRef>,
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRouter {
    pub fn new() -> Self {
        Self::with_registry(Arc::new(RoomRegistry::new()))
    }

    pub fn with_registry(registry: Arc<RoomRegistry>) -> Self {
        Self {
            broadcaster: Broadcaster::new(registry.clone()),
            registry,
            connections: DashMap::new(),
        }
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Number of currently connected clients
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    /// A transport accepted a new client.
    pub fn on_connect(&self, conn: ConnectionRef) {
        let id = conn.id();
        self.connections.insert(id, conn);
        tracing::info!("Client connected: {}", id);
    }

    /// A client went away. Peers are not notified.
    pub fn on_disconnect(&self, id: ConnectionId) {
        self.connections.remove(&id);
        let rooms = self.registry.remove_connection_everywhere(id);
        tracing::info!("Client disconnected: {} (left {} rooms)", id, rooms.len());
    }

    /// Decode and dispatch an inbound event by its wire name.
    ///
    /// Fails only when the name is not an inbound event.
    pub fn on_event(
        &self,
        conn: &ConnectionRef,
        name: &str,
        payload: Value,
    ) -> Result<(), EventError> {
        let event = ClientEvent::parse(name, payload)?;
        self.dispatch(conn, event);
        Ok(())
    }

    pub fn dispatch(&self, conn: &ConnectionRef, event: ClientEvent) {
        match event {
            ClientEvent::JoinRoom(request) => self.handle_join(conn, request),
            ClientEvent::LeaveRoom(request) => self.handle_leave(conn, request),
            ClientEvent::ChatMessage { room, payload } => self.handle_chat_message(room, payload),
            ClientEvent::ToggleLike { room, payload } => {
                self.handle_toggle_like(conn.id(), room, payload)
            }
        }
    }

    fn handle_join(&self, conn: &ConnectionRef, request: RoomRequest) {
        self.registry.join(&request.room, conn);
        tracing::info!("{} joined room: {}", request.username, request.room);
    }

    fn handle_leave(&self, conn: &ConnectionRef, request: RoomRequest) {
        self.registry.leave(&request.room, conn.id());
        tracing::info!("{} left room: {}", request.username, request.room);
    }

    /// Chat messages echo back to the sender, who is a normal member.
    fn handle_chat_message(&self, room: RoomName, payload: Value) {
        tracing::info!("Received message: {}", payload);
        self.broadcaster.broadcast(
            room.as_str(),
            ServerEvent::new(EventKind::ChatMessage, payload),
            None,
        );
    }

    /// The sender already applied its own like locally.
    fn handle_toggle_like(&self, sender: ConnectionId, room: RoomName, payload: Value) {
        tracing::info!("Toggle like: {}", payload);
        self.broadcaster.broadcast(
            room.as_str(),
            ServerEvent::new(EventKind::ToggleLike, payload),
            Some(sender),
        );
    }
}
