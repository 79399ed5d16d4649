//! Fanout Broadcaster
//!
//! Delivers one event to every current member of a room. Membership is read
//! fresh for each call and the registry lock is released before any send.
//! A failing recipient is logged and skipped; the transport's disconnect
//! path is what removes it from the registry.

use std::sync::Arc;

use crate::connection::{Connection, ConnectionId};
use crate::event::ServerEvent;
use crate::registry::RoomRegistry;

#[derive(Clone)]
pub struct Broadcaster {
    registry: Arc<RoomRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Send `event` to every member of `room` except `exclude`.
    pub fn broadcast(&self, room: &str, event: ServerEvent, exclude: Option<ConnectionId>) {
        let members = self.registry.members(room);
        let event = Arc::new(event);

        let mut delivered = 0usize;
        let mut failed = 0usize;

        for member in members {
            let id = member.id();
            if Some(id) == exclude {
                continue;
            }

            match member.send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    failed += 1;
                    tracing::warn!("Failed to send {} to client {}: {}", event.kind, id, e);
                }
            }
        }

        tracing::debug!(
            room = %room,
            event = %event.kind,
            delivered,
            failed,
            "Broadcast complete"
        );
    }
}
