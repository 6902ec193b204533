//! Wire format of the sync `WebSocket`.
//!
//! Both directions use JSON text frames with a `type` tag and a `payload`:
//!
//! ```json
//! { "type": "worldUpdate", "payload": { "creatures": [], "tiles": [], ... } }
//! { "type": "command", "payload": { "action": "jump", "creatureId": "..." } }
//! ```

use island_types::Command;
use island_world::World;
use serde::{Deserialize, Serialize};

/// A frame sent by an observer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Request a world mutation.
    Command(Command),
}

/// A frame pushed to every observer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ServerMessage<'a> {
    /// The full world state.
    WorldUpdate(&'a World),
}

impl ClientMessage {
    /// Parse a text frame.
    ///
    /// # Errors
    ///
    /// Returns the JSON error for non-JSON input, an unknown `type`, an
    /// unknown `action`, or missing fields.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Serialize a `worldUpdate` frame.
///
/// # Errors
///
/// Returns the JSON error if serialization fails.
pub fn encode_world_update(world: &World) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerMessage::WorldUpdate(world))
}
