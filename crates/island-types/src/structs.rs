//! Entity structs held by the world store and serialized to observers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    BiomeType, CreatureState, DecorationType, Direction, EmotionalState, FenceType, GreetingType,
};
use crate::ids::{CreatureId, OwnerId};

/// Wall-clock instant in Unix epoch milliseconds.
pub type Timestamp = i64;

/// Upper bound of the vitality gauge.
pub const MAX_VITALITY: u32 = 100;

// ---------------------------------------------------------------------------
// Creature
// ---------------------------------------------------------------------------

/// An autonomous creature wandering the island.
///
/// Vitality and emotional state are private: the only way to change them is
/// [`Creature::set_vitality`], which clamps to `0..=100` and re-derives the
/// mood so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Creature {
    /// Unique identifier.
    pub id: CreatureId,
    /// Current x position.
    pub x: f64,
    /// Current y position.
    pub y: f64,
    /// Movement target x.
    pub target_x: f64,
    /// Movement target y.
    pub target_y: f64,
    /// Behavioral state.
    #[ts(type = "number")]
    pub state: CreatureState,
    /// When a timed state reverts to idle.
    #[ts(type = "number | null")]
    pub state_expires_at: Option<Timestamp>,
    /// Facing direction.
    #[ts(type = "number")]
    pub direction: Direction,
    /// Body color as a CSS hex string.
    pub color: String,
    vitality: u32,
    emotional_state: EmotionalState,
    /// Owning wallet, if minted.
    pub owner_id: Option<OwnerId>,
    /// Last time the creature was fed.
    #[ts(type = "number | null")]
    pub last_fed: Option<Timestamp>,
    /// Whether it is currently playing.
    pub is_playing: bool,
    /// The creature it is playing with.
    pub playing_with: Option<CreatureId>,
    /// Whether a jump is in progress.
    pub is_jumping: bool,
    /// When the jump ends.
    #[ts(type = "number | null")]
    pub jump_expires_at: Option<Timestamp>,
    /// Salute style; `None` unless saluting.
    pub greeting_type: GreetingType,
    /// Speech bubble text.
    pub bubble: Option<String>,
    /// When the speech bubble disappears.
    #[ts(type = "number | null")]
    pub bubble_expires_at: Option<Timestamp>,
}

impl Creature {
    /// Create an idle, fully vital creature standing at `(x, y)`.
    pub fn new(x: f64, y: f64, color: impl Into<String>, owner_id: Option<OwnerId>) -> Self {
        Self {
            id: CreatureId::new(),
            x,
            y,
            target_x: x,
            target_y: y,
            state: CreatureState::Idle,
            state_expires_at: None,
            direction: Direction::default(),
            color: color.into(),
            vitality: MAX_VITALITY,
            emotional_state: EmotionalState::from_vitality(MAX_VITALITY),
            owner_id,
            last_fed: None,
            is_playing: false,
            playing_with: None,
            is_jumping: false,
            jump_expires_at: None,
            greeting_type: GreetingType::None,
            bubble: None,
            bubble_expires_at: None,
        }
    }

    /// Current vitality, always within `0..=100`.
    pub const fn vitality(&self) -> u32 {
        self.vitality
    }

    /// Mood derived from the current vitality.
    pub const fn emotional_state(&self) -> EmotionalState {
        self.emotional_state
    }

    /// Set vitality, clamped to the gauge, and re-derive the mood.
    pub fn set_vitality(&mut self, vitality: u32) {
        self.vitality = vitality.min(MAX_VITALITY);
        self.emotional_state = EmotionalState::from_vitality(self.vitality);
    }

    /// Whether `owner` owns this creature.
    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        self.owner_id.as_ref() == Some(owner)
    }

    /// Euclidean distance from this creature to a point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }

    /// Stop where it stands: target snaps to the current position.
    pub fn halt(&mut self) {
        self.target_x = self.x;
        self.target_y = self.y;
        self.state = CreatureState::Idle;
        self.state_expires_at = None;
    }
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Decoration drawn on top of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Decoration {
    /// What is drawn.
    #[serde(rename = "type")]
    #[ts(type = "number")]
    pub kind: DecorationType,
    /// Sprite variant (0-3).
    pub variant: u8,
}

/// A static terrain cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Tile {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Terrain biome.
    #[serde(rename = "type")]
    #[ts(type = "number")]
    pub biome: BiomeType,
    /// Elevation step (0-2).
    pub height: u8,
    /// Optional decoration.
    pub decoration: Option<Decoration>,
    /// Whether a garden fence runs over this tile.
    pub has_fence: bool,
    /// Style of that fence.
    pub fence_type: Option<FenceType>,
}

// ---------------------------------------------------------------------------
// Landmarks
// ---------------------------------------------------------------------------

/// A fountain whose water activity grows with its level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Fountain {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Water level, `1..=4`.
    pub state: u8,
}

impl Fountain {
    /// Level of a freshly placed fountain.
    pub const MIN_LEVEL: u8 = 1;
    /// Highest level a fountain can reach.
    pub const MAX_LEVEL: u8 = 4;

    /// Place a fountain at its lowest level.
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            state: Self::MIN_LEVEL,
        }
    }

    /// Raise the level by one, stopping at [`Self::MAX_LEVEL`].
    pub fn advance(&mut self) {
        self.state = self.state.saturating_add(1).min(Self::MAX_LEVEL);
    }
}

/// A pink tree decoration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PinkTree {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Gardens
// ---------------------------------------------------------------------------

/// One tile of a claimed garden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GardenTile {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// True on the parcel's perimeter.
    pub has_fence: bool,
}

/// A rectangular parcel claimed by a wallet owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PrivateGarden {
    /// Claiming wallet.
    pub owner_id: OwnerId,
    /// Every tile covered, border and interior.
    pub tiles: Vec<GardenTile>,
    /// Claim time.
    #[ts(type = "number")]
    pub created_at: Timestamp,
    /// Fence style.
    pub fence_type: FenceType,
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// A speech bubble line recorded in the world's message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ChatMessage {
    /// Speaking creature.
    pub creature_id: CreatureId,
    /// Bubble text.
    pub text: String,
    /// When it was said.
    #[ts(type = "number")]
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creature_is_happy_and_full() {
        let creature = Creature::new(1.0, 2.0, "#ff9f43", None);
        assert_eq!(creature.vitality(), 100);
        assert_eq!(creature.emotional_state(), EmotionalState::Happy);
        assert_eq!(creature.state, CreatureState::Idle);
        assert!((creature.target_x - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn creature_serializes_client_codes() {
        let mut creature = Creature::new(1.0, 2.0, "#ff9f43", None);
        creature.state = CreatureState::Walking;
        creature.direction = Direction::West;
        let value = serde_json::to_value(&creature).unwrap_or_default();
        assert_eq!(value["state"], 1);
        assert_eq!(value["direction"], 6);
        assert_eq!(value["greetingType"], "none");
        assert_eq!(value["emotionalState"], "happy");
    }

    #[test]
    fn tile_serializes_biome_code() {
        let tile = Tile {
            x: 0,
            y: 0,
            biome: BiomeType::River,
            height: 1,
            decoration: Some(Decoration {
                kind: DecorationType::Rock,
                variant: 2,
            }),
            has_fence: false,
            fence_type: None,
        };
        let value = serde_json::to_value(&tile).unwrap_or_default();
        assert_eq!(value["type"], 3);
        assert_eq!(value["decoration"]["type"], 4);
    }

    #[test]
    fn set_vitality_clamps_and_recomputes_mood() {
        let mut creature = Creature::new(0.0, 0.0, "#ff9f43", None);
        creature.set_vitality(130);
        assert_eq!(creature.vitality(), 100);
        creature.set_vitality(30);
        assert_eq!(creature.emotional_state(), EmotionalState::Sad);
        creature.set_vitality(10);
        assert_eq!(creature.emotional_state(), EmotionalState::Sick);
    }

    #[test]
    fn fountain_level_caps_at_four() {
        let mut fountain = Fountain::new(0.0, 0.0);
        for _ in 0..10 {
            fountain.advance();
        }
        assert_eq!(fountain.state, Fountain::MAX_LEVEL);
    }

    #[test]
    fn creature_serializes_camel_case() {
        let creature = Creature::new(0.0, 0.0, "#ff9f43", Some(OwnerId::new("owner")));
        let value = serde_json::to_value(&creature).unwrap_or_default();
        assert_eq!(value["vitality"], 100);
        assert_eq!(value["emotionalState"], "happy");
        assert_eq!(value["ownerId"], "owner");
        assert_eq!(value["isPlaying"], false);
    }
}
