//! WebSocket Server
//!
//! Accepts client connections and wires them into the relay core.

mod handler;
mod protocol;
mod router;
mod state;

pub use handler::*;
pub use protocol::*;
pub use router::*;
pub use state::*;
