//! Enumeration types for the island world.
//!
//! Creature states, directions, biomes and decorations travel as numeric
//! codes, matching the observer client's tables. Moods, greetings and fence
//! styles travel as lowercase strings (`"happy"`, `"salutx2"`, `"wooden"`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A numeric wire code that names no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    /// Which enum was being decoded.
    pub kind: &'static str,
    /// The rejected code.
    pub code: u8,
}

/// Numeric wire codes for a fieldless `#[repr(u8)]` enum with an `ALL` table.
macro_rules! wire_code {
    ($ty:ident, $kind:literal) => {
        impl From<$ty> for u8 {
            fn from(value: $ty) -> Self {
                value as Self
            }
        }

        impl TryFrom<u8> for $ty {
            type Error = UnknownCode;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                Self::ALL
                    .into_iter()
                    .find(|variant| u8::from(*variant) == code)
                    .ok_or(UnknownCode { kind: $kind, code })
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Creatures
// ---------------------------------------------------------------------------

/// Behavioral state of a creature.
///
/// Every state except [`Idle`](Self::Idle) and [`Walking`](Self::Walking)
/// is temporary and reverts to `Idle` once its expiry passes. Codes 2 and 3
/// are reserved for the client's grouping animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum CreatureState {
    /// Standing still; may start wandering on a movement tick.
    #[default]
    Idle = 0,
    /// Moving toward its target.
    Walking = 1,
    /// Playing with another creature.
    Playing = 4,
    /// Bathing near a fountain.
    Bathing = 5,
    /// Eating food it was fed.
    Eating = 6,
    /// Waving at observers.
    Saluting = 7,
    /// Dancing in place.
    Dancing = 8,
    /// Asleep.
    Sleeping = 9,
}

impl CreatureState {
    /// Every state.
    pub const ALL: [Self; 8] = [
        Self::Idle,
        Self::Walking,
        Self::Playing,
        Self::Bathing,
        Self::Eating,
        Self::Saluting,
        Self::Dancing,
        Self::Sleeping,
    ];

    /// Whether this state is temporary and carries an expiry.
    pub const fn is_timed(self) -> bool {
        !matches!(self, Self::Idle | Self::Walking)
    }
}

wire_code!(CreatureState, "creature state");

/// One of the 8 compass directions a creature can face.
///
/// Codes run clockwise from north (0) to north-west (7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Direction {
    /// +y.
    North = 0,
    /// Between north and east.
    NorthEast = 1,
    /// +x.
    #[default]
    East = 2,
    /// Between south and east.
    SouthEast = 3,
    /// -y.
    South = 4,
    /// Between south and west.
    SouthWest = 5,
    /// -x.
    West = 6,
    /// Between north and west.
    NorthWest = 7,
}

impl Direction {
    /// All directions, counter-clockwise starting from east (0 degrees).
    const BY_SECTOR: [Self; 8] = [
        Self::East,
        Self::NorthEast,
        Self::North,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    /// Every direction, in code order.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// Quantize a movement vector into one of 8 sectors of 45 degrees.
    ///
    /// Sector boundaries sit at the odd multiples of 22.5 degrees, so due
    /// east is centered on 0 degrees. Positive `dy` points north.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_vector(dx: f64, dy: f64) -> Self {
        let degrees = dy.atan2(dx).to_degrees();
        let sector = (degrees / 45.0).round() as i64;
        let index = usize::try_from(sector.rem_euclid(8)).unwrap_or(0);
        Self::BY_SECTOR.get(index).copied().unwrap_or(Self::East)
    }
}

wire_code!(Direction, "direction");

/// Mood derived from vitality. Never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum EmotionalState {
    /// Vitality at least 50.
    #[default]
    Happy,
    /// Vitality at least 25.
    Sad,
    /// Vitality below 25.
    Sick,
}

impl EmotionalState {
    /// Vitality at or above which a creature is happy.
    pub const HAPPY_THRESHOLD: u32 = 50;
    /// Vitality at or above which a creature is merely sad.
    pub const SAD_THRESHOLD: u32 = 25;

    /// Derive the emotional state from a vitality value.
    pub const fn from_vitality(vitality: u32) -> Self {
        if vitality >= Self::HAPPY_THRESHOLD {
            Self::Happy
        } else if vitality >= Self::SAD_THRESHOLD {
            Self::Sad
        } else {
            Self::Sick
        }
    }
}

/// How many arms a creature raises when it salutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum GreetingType {
    /// Not saluting.
    #[default]
    #[serde(rename = "none")]
    None,
    /// One-arm salute.
    #[serde(rename = "salutx1")]
    OneArm,
    /// Two-arm salute.
    #[serde(rename = "salutx2")]
    TwoArms,
}

/// Food a creature can be fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodType {
    /// Apple, +30 vitality.
    Apple,
    /// Yellow flower, +20 vitality.
    YellowFlower,
    /// Pink flower, +25 vitality.
    PinkFlower,
    /// Rainbow flower, +40 vitality.
    RainbowFlower,
}

impl FoodType {
    /// Look up a food by its wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "apple" => Some(Self::Apple),
            "yellowflower" => Some(Self::YellowFlower),
            "pinkflower" => Some(Self::PinkFlower),
            "rainbowflower" => Some(Self::RainbowFlower),
            _ => None,
        }
    }

    /// Vitality restored by eating this food.
    pub const fn vitality_gain(self) -> u32 {
        match self {
            Self::Apple => 30,
            Self::YellowFlower => 20,
            Self::PinkFlower => 25,
            Self::RainbowFlower => 40,
        }
    }
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Biome of a terrain tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum BiomeType {
    /// Wooded ring and north-east quadrant.
    Forest = 0,
    /// Dry quadrant.
    Desert = 1,
    /// Rocky quadrant.
    Mountain = 2,
    /// Water quadrant and river veins.
    River = 3,
    /// Open ground at the island center.
    Clearing = 4,
    /// Shoreline.
    Edge = 5,
}

impl BiomeType {
    /// Every biome.
    pub const ALL: [Self; 6] = [
        Self::Forest,
        Self::Desert,
        Self::Mountain,
        Self::River,
        Self::Clearing,
        Self::Edge,
    ];
}

wire_code!(BiomeType, "biome");

/// Kind of decoration placed on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum DecorationType {
    /// Crumbled stone.
    Ruins = 0,
    /// Glowing lantern.
    LightSource = 1,
    /// Carved pole.
    Totem = 2,
    /// A tree.
    Tree = 3,
    /// A rock.
    Rock = 4,
    /// A flower patch.
    Flower = 5,
}

impl DecorationType {
    /// Every decoration kind.
    pub const ALL: [Self; 6] = [
        Self::Ruins,
        Self::LightSource,
        Self::Totem,
        Self::Tree,
        Self::Rock,
        Self::Flower,
    ];
}

wire_code!(DecorationType, "decoration");

/// Visual style of a garden fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum FenceType {
    /// Plain wooden pickets.
    #[default]
    Wooden,
    /// Hedge with flowers.
    Floral,
    /// Crystal shards.
    Crystal,
    /// Rainbow arches.
    Rainbow,
}
