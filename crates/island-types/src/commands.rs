//! Commands submitted by observers.
//!
//! A [`Command`] is a closed tagged union keyed by the `action` field. Each
//! variant carries exactly the fields its handler needs, so a command that
//! deserializes is structurally complete; semantic checks (ownership,
//! distances, garden bounds) happen in the command processor.
//!
//! ```json
//! { "action": "feedCreature", "ownerId": "ab12..", "creatureId": "..", "foodType": "apple" }
//! ```

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, FenceType, GreetingType};
use crate::ids::{CreatureId, OwnerId};

/// A world-mutating request from an observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    // --- Gardens ---
    /// Claim a rectangular parcel, authenticated by a wallet signature.
    #[serde(rename_all = "camelCase")]
    ClaimGarden {
        /// Claiming wallet address.
        owner_id: OwnerId,
        /// The signed message.
        message: String,
        /// Signature of `message` by `owner_id`.
        signature: String,
        /// Left column of the parcel.
        start_x: i32,
        /// Bottom row of the parcel.
        start_y: i32,
        /// Parcel width in tiles.
        width: u32,
        /// Parcel height in tiles.
        height: u32,
        /// Fence style; wooden when absent.
        #[serde(default)]
        fence_type: Option<FenceType>,
    },
    /// Restyle the fence of a garden the caller owns.
    #[serde(rename_all = "camelCase")]
    UpdateFence {
        /// Owning wallet address.
        owner_id: OwnerId,
        /// New fence style.
        fence_type: FenceType,
    },

    // --- Owner care ---
    /// Feed an owned creature.
    #[serde(rename_all = "camelCase")]
    FeedCreature {
        /// Owning wallet address.
        owner_id: OwnerId,
        /// Creature to feed.
        creature_id: CreatureId,
        /// Food name; unknown foods are eaten but restore nothing.
        food_type: String,
    },
    /// Bathe an owned creature standing near a fountain.
    #[serde(rename_all = "camelCase")]
    BatheCreature {
        /// Owning wallet address.
        owner_id: OwnerId,
        /// Creature to bathe.
        creature_id: CreatureId,
    },
    /// Make two nearby creatures play together.
    #[serde(rename_all = "camelCase")]
    PlayWithCreature {
        /// First creature.
        creature_id: CreatureId,
        /// Its playmate.
        target_creature_id: CreatureId,
    },
    /// Mint a new creature for a wallet.
    #[serde(rename_all = "camelCase")]
    MintCreature {
        /// Wallet that will own the creature.
        owner_id: OwnerId,
    },

    // --- Landmarks ---
    /// Place a fountain.
    AddFountain {
        /// X position.
        x: f64,
        /// Y position.
        y: f64,
    },
    /// Remove the fountain at `index`.
    RemoveFountain {
        /// Position in the fountain list.
        index: usize,
    },
    /// Raise the level of the fountain at `index`.
    ChangeFountainState {
        /// Position in the fountain list.
        index: usize,
    },
    /// Place a pink tree.
    AddPinkTree {
        /// X position.
        x: f64,
        /// Y position.
        y: f64,
    },
    /// Remove the pink tree at `index`.
    RemovePinkTree {
        /// Position in the tree list.
        index: usize,
    },

    // --- Creature control ---
    /// Walk toward a point.
    #[serde(rename_all = "camelCase")]
    MoveTo {
        /// Creature to move.
        creature_id: CreatureId,
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// Hop in place.
    #[serde(rename_all = "camelCase")]
    Jump {
        /// Jumping creature.
        creature_id: CreatureId,
    },
    /// Salute, optionally with both arms.
    #[serde(rename_all = "camelCase")]
    Salute {
        /// Saluting creature.
        creature_id: CreatureId,
        /// Salute style.
        #[serde(default)]
        greeting_type: Option<GreetingType>,
    },
    /// Dance in place.
    #[serde(rename_all = "camelCase")]
    Dance {
        /// Dancing creature.
        creature_id: CreatureId,
    },
    /// Fall asleep.
    #[serde(rename_all = "camelCase")]
    Sleep {
        /// Sleeping creature.
        creature_id: CreatureId,
    },
    /// Repaint a creature.
    #[serde(rename_all = "camelCase")]
    ChangeColor {
        /// Creature to repaint.
        creature_id: CreatureId,
        /// New CSS color.
        color: String,
    },
    /// Turn a creature to face a direction.
    #[serde(rename_all = "camelCase")]
    SetDirection {
        /// Creature to turn.
        creature_id: CreatureId,
        /// New facing.
        direction: Direction,
    },
    /// Show a speech bubble above a creature.
    #[serde(rename_all = "camelCase")]
    SetBubble {
        /// Speaking creature.
        creature_id: CreatureId,
        /// Bubble text.
        text: String,
    },

    // --- Admin ---
    /// Move a creature instantly.
    #[serde(rename_all = "camelCase")]
    Teleport {
        /// Creature to move.
        creature_id: CreatureId,
        /// New x.
        x: f64,
        /// New y.
        y: f64,
    },
    /// Delete a creature.
    #[serde(rename_all = "camelCase")]
    RemoveCreature {
        /// Creature to delete.
        creature_id: CreatureId,
    },
    /// Add an unowned creature at a point.
    AddCreature {
        /// X position.
        x: f64,
        /// Y position.
        y: f64,
    },
}

impl Command {
    /// The wire name of this command's `action`.
    pub const fn action(&self) -> &'static str {
        match self {
            Self::ClaimGarden { .. } => "claimGarden",
            Self::UpdateFence { .. } => "updateFence",
            Self::FeedCreature { .. } => "feedCreature",
            Self::BatheCreature { .. } => "batheCreature",
            Self::PlayWithCreature { .. } => "playWithCreature",
            Self::MintCreature { .. } => "mintCreature",
            Self::AddFountain { .. } => "addFountain",
            Self::RemoveFountain { .. } => "removeFountain",
            Self::ChangeFountainState { .. } => "changeFountainState",
            Self::AddPinkTree { .. } => "addPinkTree",
            Self::RemovePinkTree { .. } => "removePinkTree",
            Self::MoveTo { .. } => "moveTo",
            Self::Jump { .. } => "jump",
            Self::Salute { .. } => "salute",
            Self::Dance { .. } => "dance",
            Self::Sleep { .. } => "sleep",
            Self::ChangeColor { .. } => "changeColor",
            Self::SetDirection { .. } => "setDirection",
            Self::SetBubble { .. } => "setBubble",
            Self::Teleport { .. } => "teleport",
            Self::RemoveCreature { .. } => "removeCreature",
            Self::AddCreature { .. } => "addCreature",
        }
    }
}
