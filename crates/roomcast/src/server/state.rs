//! Server Application State
//!
//! Shared state accessible by all WebSocket handlers.

use std::sync::Arc;

use roomcast_core::EventRouter;

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Relay core: rooms, fanout and event dispatch
    router: EventRouter,

    config: ServerConfig,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                router: EventRouter::new(),
                config,
            }),
        }
    }

    pub fn router(&self) -> &EventRouter {
        &self.inner.router
    }

    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the number of connected clients
    pub fn client_count(&self) -> usize {
        self.inner.router.connection_count()
    }

    /// Get the number of rooms with at least one member
    pub fn room_count(&self) -> usize {
        self.inner.router.registry().room_count()
    }
}
