//! Room Registry
//!
//! Maps room names to their member connections. Rooms are created on first
//! join and pruned as soon as their last member leaves. A reverse index from
//! connection to rooms keeps disconnect cleanup proportional to the rooms
//! that connection is actually in.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;

use crate::connection::{Connection, ConnectionId, ConnectionRef};
use crate::event::RoomName;

/// Shared room membership table
#[derive(Default)]
pub struct RoomRegistry {
    inner: Mutex<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    /// room -> members
    rooms: HashMap<RoomName, HashMap<ConnectionId, ConnectionRef>>,

    /// connection -> rooms it is in
    memberships: HashMap<ConnectionId, HashSet<RoomName>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room, creating the room if needed.
    ///
    /// Returns `false` if the connection was already a member.
    pub fn join(&self, room: &RoomName, conn: &ConnectionRef) -> bool {
        let id = conn.id();
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let members = inner.rooms.entry(room.clone()).or_default();
        if members.contains_key(&id) {
            return false;
        }
        members.insert(id, conn.clone());
        inner.memberships.entry(id).or_default().insert(room.clone());

        tracing::trace!("Connection {} added to room {}", id, room);
        true
    }

    /// Remove a connection from a room.
    ///
    /// Returns `false` if it was not a member. Empty rooms are dropped.
    pub fn leave(&self, room: &RoomName, id: ConnectionId) -> bool {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let removed = match inner.rooms.get_mut(room) {
            Some(members) => {
                let removed = members.remove(&id).is_some();
                if members.is_empty() {
                    inner.rooms.remove(room);
                    tracing::debug!("Removed empty room {}", room);
                }
                removed
            }
            None => false,
        };

        if removed {
            if let Some(rooms) = inner.memberships.get_mut(&id) {
                rooms.remove(room);
                if rooms.is_empty() {
                    inner.memberships.remove(&id);
                }
            }
        }

        removed
    }

    /// Snapshot of a room's members; empty for unknown rooms.
    pub fn members(&self, room: &str) -> Vec<ConnectionRef> {
        self.inner
            .lock()
            .rooms
            .get(room)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Drop a connection from every room it joined.
    ///
    /// Returns the rooms it was removed from.
    pub fn remove_connection_everywhere(&self, id: ConnectionId) -> Vec<RoomName> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let Some(rooms) = inner.memberships.remove(&id) else {
            return Vec::new();
        };

        for room in &rooms {
            if let Some(members) = inner.rooms.get_mut(room) {
                members.remove(&id);
                if members.is_empty() {
                    inner.rooms.remove(room);
                    tracing::debug!("Removed empty room {}", room);
                }
            }
        }

        rooms.into_iter().collect()
    }

    pub fn is_member(&self, room: &str, id: ConnectionId) -> bool {
        self.inner
            .lock()
            .rooms
            .get(room)
            .is_some_and(|members| members.contains_key(&id))
    }

    /// Rooms a connection currently belongs to
    pub fn rooms_of(&self, id: ConnectionId) -> Vec<RoomName> {
        self.inner
            .lock()
            .memberships
            .get(&id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of non-empty rooms
    pub fn room_count(&self) -> usize {
        self.inner.lock().rooms.len()
    }

    pub fn member_count(&self, room: &str) -> usize {
        self.inner
            .lock()
            .rooms
            .get(room)
            .map(HashMap::len)
            .unwrap_or(0)
    }
}
