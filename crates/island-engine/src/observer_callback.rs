//! World callback that publishes to the sync server.
//!
//! After each tick and each applied command, the world is serialized once
//! and fanned out to every connected observer.

use std::sync::Arc;

use island_core::{ChangeCause, WorldCallback};
use island_observer::AppState;
use island_world::World;
use tracing::{trace, warn};

/// Callback that bridges the engine loop to the sync server.
pub struct ObserverCallback {
    state: Arc<AppState>,
}

impl ObserverCallback {
    /// Create a new observer callback backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl WorldCallback for ObserverCallback {
    fn on_change(&mut self, world: &World, cause: ChangeCause) {
        match self.state.publish_world(world) {
            Ok(receivers) => trace!(?cause, receivers, "World broadcast sent"),
            Err(e) => warn!(?cause, error = %e, "Failed to publish world"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use island_types::Creature;

    use super::*;

    #[tokio::test]
    async fn change_reaches_subscribers() {
        let (state, _rx) = AppState::new();
        let state = Arc::new(state);
        let mut sub = state.subscribe();
        let mut callback = ObserverCallback::new(Arc::clone(&state));

        let world = World::new(Vec::new(), vec![Creature::new(0.0, 0.0, "#ff9f43", None)]);
        callback.on_change(&world, ChangeCause::MovementTick);

        let frame = sub.recv().await.unwrap();
        assert!(frame.as_str().starts_with(r#"{"type":"worldUpdate""#));
        assert_eq!(state.latest_frame().await, Some(frame));
    }
}
