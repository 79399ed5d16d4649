//! WebSocket Connection Handler
//!
//! Handles individual WebSocket connections and message processing.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;

use roomcast_core::{Connection, ConnectionId, ConnectionRef, SendError, ServerEvent};

use super::protocol::Frame;
use super::state::AppState;

/// A WebSocket client as seen by the relay core.
///
/// Outbound events are queued on a bounded channel drained by the
/// connection's writer task.
pub struct WsConnection {
    id: ConnectionId,
    tx: mpsc::Sender<Arc<ServerEvent>>,
}

impl WsConnection {
    pub fn new(tx: mpsc::Sender<Arc<ServerEvent>>) -> Self {
        Self {
            id: ConnectionId::new(),
            tx,
        }
    }
}

impl Connection for WsConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn send(&self, event: Arc<ServerEvent>) -> Result<(), SendError> {
        self.tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => SendError::Full,
            TrySendError::Closed(_) => SendError::Closed,
        })
    }
}

/// Handle a WebSocket connection
pub async fn handle_websocket(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // Create channel for sending events to this client
    let (tx, mut rx) = mpsc::channel::<Arc<ServerEvent>>(state.config().outbound_buffer);

    let conn: ConnectionRef = Arc::new(WsConnection::new(tx));
    let session_id = conn.id();
    state.router().on_connect(conn.clone());

    // Forward queued events to the socket
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match Frame::from(event.as_ref()).encode() {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("Failed to encode {} for {}: {}", event.kind, session_id, e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Process incoming messages
    let recv_state = state.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = ws_receiver.next().await {
            match msg {
                Message::Text(text) => {
                    handle_client_message(&recv_state, &conn, &text);
                }
                Message::Close(_) => {
                    break;
                }
                Message::Ping(_data) => {
                    // Pong is handled automatically by axum
                    tracing::trace!("Received ping from {}", session_id);
                }
                _ => {}
            }
        }
    });

    join_first(send_task, recv_task).await;

    // Cleanup: neither task can touch the registry any more
    state.router().on_disconnect(session_id);
}

/// Wait for either task to end, then abort the other and wait for it too.
///
/// `abort` only takes effect at the task's next await point, so a reader in
/// the middle of dispatching a frame finishes that frame before this returns.
async fn join_first(mut a: JoinHandle<()>, mut b: JoinHandle<()>) {
    let a_done = tokio::select! {
        _ = &mut a => true,
        _ = &mut b => false,
    };
    let other = if a_done { b } else { a };
    other.abort();
    let _ = other.await;
}

/// Handle one text message from a client.
///
/// Frames that fail to decode and unknown event names are logged and dropped;
/// nothing is sent back to the client.
pub fn handle_client_message(state: &AppState, conn: &ConnectionRef, text: &str) {
    let frame = match Frame::decode(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("Failed to parse client message from {}: {}", conn.id(), e);
            return;
        }
    };

    if let Err(e) = state.router().on_event(conn, &frame.event, frame.data) {
        tracing::warn!("Ignoring event from {}: {}", conn.id(), e);
    }
}
