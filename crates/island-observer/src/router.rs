//! Axum router construction for the sync server.
//!
//! Assembles the `WebSocket` and REST routes into a single [`Router`]
//! with CORS middleware enabled for cross-origin clients.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` and `GET /ws` -- sync `WebSocket`
/// - `GET /api/world` -- latest world frame
/// - `GET /api/status` -- connection and entity counts
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(ws::ws_sync))
        .route("/ws", get(ws::ws_sync))
        .route("/api/world", get(handlers::get_world))
        .route("/api/status", get(handlers::get_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
