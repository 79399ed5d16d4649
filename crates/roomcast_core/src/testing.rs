//! Test connections that record what they were sent.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::connection::{Connection, ConnectionId, ConnectionRef, SendError};
use crate::event::ServerEvent;

pub struct RecordingConnection {
    id: ConnectionId,
    received: Mutex<Vec<Arc<ServerEvent>>>,
    closed: AtomicBool,
}

impl RecordingConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::new(),
            received: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        })
    }

    /// A connection whose peer has already gone away
    pub fn closed() -> Arc<Self> {
        let conn = Self::new();
        conn.closed.store(true, Ordering::SeqCst);
        conn
    }

    pub fn received(&self) -> Vec<ServerEvent> {
        self.received.lock().iter().map(|e| (**e).clone()).collect()
    }

    pub fn handle(self: &Arc<Self>) -> ConnectionRef {
        self.clone()
    }
}

impl Connection for RecordingConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send(&self, event: Arc<ServerEvent>) -> Result<(), SendError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SendError::Closed);
        }
        self.received.lock().push(event);
        Ok(())
    }
}
