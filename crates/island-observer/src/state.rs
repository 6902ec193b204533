//! Shared application state for the sync server.
//!
//! [`AppState`] is the only bridge between connection tasks and the engine:
//!
//! - inbound commands go to the engine through an mpsc queue
//! - serialized world frames come back through a broadcast channel
//! - the most recent frame is cached for newly connected observers and
//!   for `GET /api/world`
//!
//! Connection tasks never see the world itself.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use axum::extract::ws::Utf8Bytes;
use island_types::Command;
use island_world::World;
use serde::Serialize;
use tokio::sync::{RwLock, broadcast, mpsc};
use tracing::debug;

use crate::error::ObserverError;
use crate::protocol::encode_world_update;

/// Capacity of the broadcast channel for world frames.
///
/// If a subscriber falls behind by more than this many frames it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest frame.
pub const BROADCAST_CAPACITY: usize = 256;

/// Capacity of the inbound command queue.
pub const COMMAND_QUEUE_CAPACITY: usize = 1024;

/// Entity counts of the last published world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldStats {
    /// Creatures alive.
    pub creatures: usize,
    /// Terrain tiles.
    pub tiles: usize,
    /// Fountains placed.
    pub fountains: usize,
    /// Pink trees placed.
    pub pink_trees: usize,
    /// Gardens claimed.
    pub private_gardens: usize,
    /// Lines in the message log.
    pub messages: usize,
}

impl WorldStats {
    /// Count the entities of a world.
    pub fn of(world: &World) -> Self {
        Self {
            creatures: world.creatures().len(),
            tiles: world.tiles().len(),
            fountains: world.fountains().len(),
            pink_trees: world.pink_trees().len(),
            private_gardens: world.gardens().len(),
            messages: world.messages().len(),
        }
    }
}

/// The most recent published world.
#[derive(Debug, Clone, Default)]
pub struct LatestWorld {
    /// The serialized `worldUpdate` frame, once one exists.
    pub frame: Option<Utf8Bytes>,
    /// Entity counts at that moment.
    pub stats: WorldStats,
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
pub struct AppState {
    /// Broadcast sender for serialized world frames.
    pub tx: broadcast::Sender<Utf8Bytes>,
    /// The latest world frame, replayed to new observers.
    pub latest: Arc<RwLock<LatestWorld>>,
    /// Queue of commands for the engine.
    pub commands: mpsc::Sender<Command>,
    connections: AtomicUsize,
    published: AtomicU64,
}

impl AppState {
    /// Create the state and the receiving end of its command queue.
    ///
    /// The receiver belongs to the engine loop.
    pub fn new() -> (Self, mpsc::Receiver<Command>) {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        let (commands, command_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let state = Self {
            tx,
            latest: Arc::new(RwLock::new(LatestWorld::default())),
            commands,
            connections: AtomicUsize::new(0),
            published: AtomicU64::new(0),
        };
        (state, command_rx)
    }

    /// Subscribe to the world frame broadcast.
    pub fn subscribe(&self) -> broadcast::Receiver<Utf8Bytes> {
        self.tx.subscribe()
    }

    /// Subscribe, then read the cached frame.
    ///
    /// In that order, a frame published between the two steps is still
    /// delivered through the receiver, so a new observer never misses one.
    pub async fn subscribe_with_snapshot(
        &self,
    ) -> (Option<Utf8Bytes>, broadcast::Receiver<Utf8Bytes>) {
        let rx = self.subscribe();
        let snapshot = self.latest_frame().await;
        (snapshot, rx)
    }

    /// Serialize `world` once and push it to every connected observer.
    ///
    /// Returns the number of receivers that got the frame; zero when no
    /// observer is connected.
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError::Serialization`] if the world cannot be
    /// serialized; nothing is sent in that case.
    pub fn publish_world(&self, world: &World) -> Result<usize, ObserverError> {
        let frame = Utf8Bytes::from(encode_world_update(world)?);

        // Cache before sending. Use try_write to avoid blocking the engine
        // loop; if a reader holds the lock, the next publish catches up.
        if let Ok(mut latest) = self.latest.try_write() {
            latest.frame = Some(frame.clone());
            latest.stats = WorldStats::of(world);
        } else {
            debug!("Latest world cache busy, skipping this frame");
        }
        self.published.fetch_add(1, Ordering::Relaxed);

        // send returns Err only when there are zero receivers.
        Ok(self.tx.send(frame).unwrap_or(0))
    }

    /// The latest frame, if any world has been published.
    pub async fn latest_frame(&self) -> Option<Utf8Bytes> {
        self.latest.read().await.frame.clone()
    }

    /// Number of open observer connections.
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::Relaxed)
    }

    /// Number of frames published since startup.
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Count a connection until the returned guard drops.
    pub fn track_connection(self: &Arc<Self>) -> ConnectionGuard {
        self.connections.fetch_add(1, Ordering::Relaxed);
        ConnectionGuard {
            state: Arc::clone(self),
        }
    }
}

/// Decrements the connection count when dropped.
pub struct ConnectionGuard {
    state: Arc<AppState>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.state.connections.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use island_types::Creature;

    use super::*;

    fn world_with_creature() -> World {
        World::new(Vec::new(), vec![Creature::new(0.0, 0.0, "#ff9f43", None)])
    }

    #[tokio::test]
    async fn publish_caches_and_broadcasts() {
        let (state, _rx) = AppState::new();
        let mut sub = state.subscribe();

        let receivers = state.publish_world(&world_with_creature()).unwrap();
        assert_eq!(receivers, 1);

        let frame = sub.recv().await.unwrap();
        assert_eq!(state.latest_frame().await, Some(frame));
        assert_eq!(state.latest.read().await.stats.creatures, 1);
        assert_eq!(state.published_count(), 1);
    }

    #[tokio::test]
    async fn publish_without_observers_is_fine() {
        let (state, _rx) = AppState::new();
        assert_eq!(state.publish_world(&World::default()).unwrap(), 0);
        assert!(state.latest_frame().await.is_some());
    }

    #[tokio::test]
    async fn snapshot_then_live_frames() {
        let (state, _rx) = AppState::new();
        state.publish_world(&world_with_creature()).unwrap();
        let first = state.latest_frame().await;

        let (snapshot, mut rx) = state.subscribe_with_snapshot().await;
        assert_eq!(snapshot, first);
        assert!(rx.try_recv().is_err(), "snapshot must not be replayed on the channel");

        state.publish_world(&World::default()).unwrap();
        let live = rx.recv().await.unwrap();
        assert_ne!(Some(live.clone()), first);
        assert_eq!(state.latest_frame().await, Some(live));
    }

    #[tokio::test]
    async fn snapshot_is_empty_before_first_publish() {
        let (state, _rx) = AppState::new();
        let (snapshot, mut rx) = state.subscribe_with_snapshot().await;
        assert!(snapshot.is_none());

        state.publish_world(&World::default()).unwrap();
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn busy_cache_still_broadcasts() {
        let (state, _rx) = AppState::new();
        state.publish_world(&World::default()).unwrap();
        let cached = state.latest_frame().await;
        let mut sub = state.subscribe();

        let reader = state.latest.read().await;
        let receivers = state.publish_world(&world_with_creature()).unwrap();
        drop(reader);

        assert_eq!(receivers, 1);
        assert_eq!(state.published_count(), 2);
        assert_ne!(Some(sub.recv().await.unwrap()), cached);
        // The cache kept the older frame; the next publish refreshes it.
        assert_eq!(state.latest_frame().await, cached);
        assert_eq!(state.latest.read().await.stats.creatures, 0);
    }

    #[test]
    fn connection_guard_counts() {
        let (state, _rx) = AppState::new();
        let state = Arc::new(state);
        let a = state.track_connection();
        let b = state.track_connection();
        assert_eq!(state.connection_count(), 2);
        drop(a);
        assert_eq!(state.connection_count(), 1);
        drop(b);
        assert_eq!(state.connection_count(), 0);
    }
}
