//! Roomcast - Real-time Room Relay Server
//!
//! This crate provides the network side of the relay:
//! - WebSocket transport wiring connections into `roomcast_core`
//! - HTTP router with health endpoint
//! - Server configuration

// Re-export core crate
pub use roomcast_core;

// Server configuration
pub mod config;

// WebSocket server
pub mod server;
