//! HTTP read endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::error::ObserverError;
use crate::state::{AppState, WorldStats};

// ---------------------------------------------------------------------------
// GET /api/world -- latest world frame
// ---------------------------------------------------------------------------

/// Return the latest `worldUpdate` frame, exactly as observers receive it.
///
/// Responds `503` until the engine has published its first world.
pub async fn get_world(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ObserverError> {
    let frame = state.latest_frame().await.ok_or(ObserverError::NotReady)?;
    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        frame.as_str().to_owned(),
    ))
}

// ---------------------------------------------------------------------------
// GET /api/status -- connection and entity counts
// ---------------------------------------------------------------------------

/// Response body of `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Open observer connections.
    pub connections: usize,
    /// World frames published since startup.
    pub updates_published: u64,
    /// Entity counts of the latest world.
    pub world: WorldStats,
}

/// Report connected observers and entity counts.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let world = state.latest.read().await.stats;
    Json(StatusResponse {
        connections: state.connection_count(),
        updates_published: state.published_count(),
        world,
    })
}
