//! Shared type definitions for the Island world engine.
//!
//! This crate is the single source of truth for the data model every other
//! crate in the workspace operates on. Entity types flow downstream to
//! `TypeScript` via `ts-rs` for the observer client.
//!
//! # Modules
//!
//! - [`ids`] -- Creature identifiers and owner wallet addresses
//! - [`enums`] -- Behavioral states, directions, moods, biomes, fence styles, foods,
//!   and the numeric wire codes some of them use
//! - [`structs`] -- Creatures, tiles, fountains, pink trees, gardens, chat messages
//! - [`commands`] -- The closed set of observer commands

pub mod commands;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use commands::Command;
pub use enums::{
    BiomeType, CreatureState, DecorationType, Direction, EmotionalState, FenceType, FoodType,
    GreetingType, UnknownCode,
};
pub use ids::{CreatureId, OwnerId};
pub use structs::{
    ChatMessage, Creature, Decoration, Fountain, GardenTile, MAX_VITALITY, PinkTree,
    PrivateGarden, Tile, Timestamp,
};
