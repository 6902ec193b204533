//! Reasons a command is rejected.
//!
//! A rejected command leaves the world untouched. The engine logs the
//! variant at debug level and skips the broadcast.

use island_types::{CreatureId, OwnerId};
use island_world::WorldError;

/// Why a command was not applied.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// No creature has the given id.
    #[error("creature {0} not found")]
    CreatureNotFound(CreatureId),

    /// The creature exists but belongs to someone else (or no one).
    #[error("creature {creature_id} is not owned by {owner_id}")]
    NotOwner {
        /// The creature acted on.
        creature_id: CreatureId,
        /// The caller claiming ownership.
        owner_id: OwnerId,
    },

    /// The claim signature did not verify against the owner address.
    #[error("signature does not verify for {0}")]
    SignatureRejected(OwnerId),

    /// A claimed side length is outside the configured limits.
    #[error("garden size {width}x{height} outside {min}..={max}")]
    GardenSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Smallest allowed side.
        min: u32,
        /// Largest allowed side.
        max: u32,
    },

    /// The rectangle overlaps a parcel or leaves the island.
    #[error("area at ({start_x}, {start_y}) is not available")]
    AreaUnavailable {
        /// Left column.
        start_x: i32,
        /// Bottom row.
        start_y: i32,
    },

    /// The owner has no garden to restyle.
    #[error("{0} has no garden")]
    NoGarden(OwnerId),

    /// No fountain stands near enough to bathe.
    #[error("creature {0} is not near a fountain")]
    NoFountainNearby(CreatureId),

    /// A creature tried to play with itself.
    #[error("creature {0} cannot play with itself")]
    SelfPlay(CreatureId),

    /// The two creatures are too far apart to play.
    #[error("creatures are {distance:.2} apart, limit {limit}")]
    TooFarToPlay {
        /// Distance between them.
        distance: f64,
        /// Maximum allowed distance.
        limit: f64,
    },

    /// A position lies off the island.
    #[error("({x}, {y}) is outside the island")]
    OutsideIsland {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
    },

    /// A lookup in the world store failed.
    #[error(transparent)]
    World(#[from] WorldError),
}
