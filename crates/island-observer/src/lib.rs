//! Sync server for the Island world engine.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/` and `/ws`) pushing the full world after
//!   every change and accepting observer commands
//! - **REST endpoints** for the latest world frame and server status
//!
//! # Architecture
//!
//! Connection tasks never touch the world. The engine publishes each new
//! world through [`AppState::publish_world`], which serializes it once and
//! fans the frame out over a [`tokio::sync::broadcast`] channel. Commands
//! travel the other way through an mpsc queue owned by the engine.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ObserverError;
pub use protocol::{ClientMessage, ServerMessage, encode_world_update};
pub use router::build_router;
pub use server::{ServerConfig, ServerError};
pub use startup::{StartupError, spawn_observer};
pub use state::{AppState, WorldStats};
