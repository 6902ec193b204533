//! Sync server startup helper for embedding in the engine binary.
//!
//! [`spawn_observer`] binds the listener eagerly, so a taken port fails
//! startup, then serves on a background Tokio task alongside the engine
//! loop.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError, bind, serve};
use crate::state::AppState;

/// Errors that can occur when spawning the sync server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Bind the sync server and spawn it on a background task.
///
/// The caller should hold the returned handle and abort it during
/// shutdown.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the address cannot be bound.
pub async fn spawn_observer(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    let listener = bind(config).await?;

    let handle = tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await {
            tracing::error!(error = %e, "Sync server exited with error");
        }
    });

    tracing::info!(host = %config.host, port = config.port, "Sync server spawned on background task");

    Ok(handle)
}
