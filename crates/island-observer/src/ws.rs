//! `WebSocket` handler for world synchronization.
//!
//! Each connection subscribes to the world frame broadcast, then receives
//! the latest frame immediately, then every frame the engine publishes.
//! Subscribing first means no update published during the handshake is
//! lost. Inbound `command` frames are forwarded to the engine queue;
//! anything unparseable is logged and dropped without closing the
//! connection.
//!
//! If a client falls behind, lagged frames are skipped and the client
//! resumes from the most recent one.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::protocol::ClientMessage;
use crate::state::AppState;

/// Upgrade an HTTP request to a sync `WebSocket`.
///
/// # Route
///
/// `GET /` and `GET /ws`
pub async fn ws_sync(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// What to do after handling an inbound frame.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let _guard = state.track_connection();
    debug!(connections = state.connection_count(), "Observer connected");

    let (snapshot, mut rx) = state.subscribe_with_snapshot().await;

    if let Some(frame) = snapshot {
        if socket.send(Message::Text(frame)).await.is_err() {
            debug!("Observer disconnected before initial snapshot");
            return;
        }
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(frame) => {
                        if socket.send(Message::Text(frame)).await.is_err() {
                            debug!("Observer disconnected (send failed)");
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        debug!(skipped = n, "Observer lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("Observer disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("Observer disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Ok(Message::Text(text))) => {
                        if matches!(forward_command(&state, text.as_str()).await, Flow::Close) {
                            return;
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        warn!("Ignoring binary frame from observer");
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    Some(Ok(Message::Pong(_))) => {}
                }
            }
        }
    }
}

async fn forward_command(state: &AppState, text: &str) -> Flow {
    match ClientMessage::parse(text) {
        Ok(ClientMessage::Command(command)) => {
            debug!(action = command.action(), "Command received");
            if state.commands.send(command).await.is_err() {
                warn!("Engine command queue closed, dropping observer");
                return Flow::Close;
            }
        }
        Err(e) => {
            warn!(error = %e, "Ignoring malformed observer message");
        }
    }
    Flow::Continue
}
