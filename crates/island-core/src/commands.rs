//! The command processor.
//!
//! [`execute`] validates a [`Command`] against the current world and, only
//! if every check passes, applies it. A rejected command returns a
//! [`CommandError`] and leaves the world exactly as it was.
//!
//! | command | checks |
//! |---|---|
//! | `claimGarden` | signature, side limits, area free and on the island |
//! | `updateFence` | caller owns a garden |
//! | `feedCreature` | creature exists and is owned by the caller |
//! | `batheCreature` | as feed, plus a fountain within [`BATHE_RANGE`] |
//! | `playWithCreature` | two distinct creatures within [`PLAY_RANGE`] |
//! | landmark removal / level | index in range |
//! | creature control | creature exists |
//! | `addCreature` | point on the island |

use island_types::{
    ChatMessage, Command, Creature, CreatureId, CreatureState, FenceType, Fountain, GardenTile,
    GreetingType, OwnerId, PinkTree, PrivateGarden, Timestamp,
};
use island_world::{
    ClaimRect, World, build_parcel_tiles, is_area_available, random_creature_color,
    random_point_on_island,
};
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::behavior;
use crate::config::IslandConfig;
use crate::error::CommandError;
use crate::verifier::SignatureVerifier;
use crate::vitality;

/// Furthest a creature may stand from a fountain to bathe.
pub const BATHE_RANGE: f64 = 2.0;

/// Furthest apart two creatures may be to play.
pub const PLAY_RANGE: f64 = 3.0;

/// Everything a command may read or change.
pub struct CommandContext<'a> {
    /// The world being mutated.
    pub world: &'a mut World,
    /// Limits and island shape.
    pub config: &'a IslandConfig,
    /// Checks garden claim signatures.
    pub verifier: &'a dyn SignatureVerifier,
    /// Randomness for spawn points and colors.
    pub rng: &'a mut StdRng,
}

/// What an applied command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A new garden was claimed.
    GardenClaimed {
        /// Claiming wallet.
        owner_id: OwnerId,
        /// Number of tiles in the parcel.
        tiles: usize,
    },
    /// A garden fence was restyled.
    FenceUpdated {
        /// Owning wallet.
        owner_id: OwnerId,
        /// New style.
        fence_type: FenceType,
    },
    /// A creature was created.
    CreatureSpawned {
        /// The new creature.
        creature_id: CreatureId,
        /// Owning wallet, if minted.
        owner_id: Option<OwnerId>,
    },
    /// A creature was deleted.
    CreatureRemoved {
        /// The deleted creature.
        creature_id: CreatureId,
    },
    /// A creature's state, vitality, or appearance changed.
    CreatureUpdated {
        /// The affected creature.
        creature_id: CreatureId,
    },
    /// Two creatures started playing.
    PlayStarted {
        /// First playmate.
        creature_id: CreatureId,
        /// Second playmate.
        target_creature_id: CreatureId,
    },
    /// A fountain or pink tree was placed, removed, or changed.
    LandmarksChanged,
}

/// Validate and apply one command.
///
/// # Errors
///
/// Returns a [`CommandError`] naming the first failed check. The world is
/// untouched in that case.
#[allow(clippy::too_many_lines)]
pub fn execute(
    ctx: &mut CommandContext<'_>,
    command: Command,
    now: Timestamp,
) -> Result<CommandOutcome, CommandError> {
    match command {
        Command::ClaimGarden {
            owner_id,
            message,
            signature,
            start_x,
            start_y,
            width,
            height,
            fence_type,
        } => {
            let rect = ClaimRect {
                start_x,
                start_y,
                width,
                height,
            };
            claim_garden(ctx, owner_id, &message, &signature, rect, fence_type, now)
        }
        Command::UpdateFence {
            owner_id,
            fence_type,
        } => update_fence(ctx.world, owner_id, fence_type),
        Command::FeedCreature {
            owner_id,
            creature_id,
            food_type,
        } => {
            ensure_owner(ctx.world, creature_id, &owner_id)?;
            let creature = creature_leaving_play(ctx.world, creature_id)?;
            vitality::restore(creature, vitality::food_gain(&food_type));
            creature.last_fed = Some(now);
            behavior::start_timed_state(creature, CreatureState::Eating, now);
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }
        Command::BatheCreature {
            owner_id,
            creature_id,
        } => bathe(ctx.world, creature_id, &owner_id, now),
        Command::PlayWithCreature {
            creature_id,
            target_creature_id,
        } => play(ctx.world, creature_id, target_creature_id, now),
        Command::MintCreature { owner_id } => {
            let (x, y) = random_point_on_island(ctx.config.world.island_radius, ctx.rng);
            let color = random_creature_color(ctx.rng);
            let creature = Creature::new(x, y, color, Some(owner_id.clone()));
            let creature_id = creature.id;
            ctx.world.add_creature(creature);
            info!(creature_id = %creature_id, owner_id = %owner_id, "Creature minted");
            Ok(CommandOutcome::CreatureSpawned {
                creature_id,
                owner_id: Some(owner_id),
            })
        }

        Command::AddFountain { x, y } => {
            ctx.world.add_fountain(Fountain::new(x, y));
            Ok(CommandOutcome::LandmarksChanged)
        }
        Command::RemoveFountain { index } => {
            ctx.world.remove_fountain(index)?;
            Ok(CommandOutcome::LandmarksChanged)
        }
        Command::ChangeFountainState { index } => {
            ctx.world.fountain_mut(index)?.advance();
            Ok(CommandOutcome::LandmarksChanged)
        }
        Command::AddPinkTree { x, y } => {
            ctx.world.add_pink_tree(PinkTree { x, y });
            Ok(CommandOutcome::LandmarksChanged)
        }
        Command::RemovePinkTree { index } => {
            ctx.world.remove_pink_tree(index)?;
            Ok(CommandOutcome::LandmarksChanged)
        }

        Command::MoveTo { creature_id, x, y } => {
            behavior::start_walking(creature_leaving_play(ctx.world, creature_id)?, x, y);
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }
        Command::Jump { creature_id } => {
            behavior::start_jump(creature_mut(ctx.world, creature_id)?, now);
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }
        Command::Salute {
            creature_id,
            greeting_type,
        } => {
            let greeting = greeting_type.unwrap_or(GreetingType::OneArm);
            let creature = creature_leaving_play(ctx.world, creature_id)?;
            behavior::start_salute(creature, greeting, now);
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }
        Command::Dance { creature_id } => {
            let creature = creature_leaving_play(ctx.world, creature_id)?;
            behavior::start_timed_state(creature, CreatureState::Dancing, now);
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }
        Command::Sleep { creature_id } => {
            let creature = creature_leaving_play(ctx.world, creature_id)?;
            behavior::start_timed_state(creature, CreatureState::Sleeping, now);
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }
        Command::ChangeColor { creature_id, color } => {
            creature_mut(ctx.world, creature_id)?.color = color;
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }
        Command::SetDirection {
            creature_id,
            direction,
        } => {
            creature_mut(ctx.world, creature_id)?.direction = direction;
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }
        Command::SetBubble { creature_id, text } => {
            behavior::show_bubble(creature_mut(ctx.world, creature_id)?, text.clone(), now);
            ctx.world.push_message(
                ChatMessage {
                    creature_id,
                    text,
                    created_at: now,
                },
                ctx.config.messages.max_messages,
            );
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }

        Command::Teleport { creature_id, x, y } => {
            let creature = creature_leaving_play(ctx.world, creature_id)?;
            behavior::clear_play_link(creature);
            creature.x = x;
            creature.y = y;
            creature.halt();
            Ok(CommandOutcome::CreatureUpdated { creature_id })
        }
        Command::RemoveCreature { creature_id } => remove_creature(ctx.world, creature_id),
        Command::AddCreature { x, y } => {
            let radius = ctx.config.world.island_radius;
            if x.hypot(y) > radius {
                return Err(CommandError::OutsideIsland { x, y });
            }
            let creature = Creature::new(x, y, random_creature_color(ctx.rng), None);
            let creature_id = creature.id;
            ctx.world.add_creature(creature);
            Ok(CommandOutcome::CreatureSpawned {
                creature_id,
                owner_id: None,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Gardens
// ---------------------------------------------------------------------------

fn claim_garden(
    ctx: &mut CommandContext<'_>,
    owner_id: OwnerId,
    message: &str,
    signature: &str,
    rect: ClaimRect,
    fence_type: Option<FenceType>,
    now: Timestamp,
) -> Result<CommandOutcome, CommandError> {
    let verified = match ctx.verifier.verify(message, signature, owner_id.as_str()) {
        Ok(verified) => verified,
        Err(e) => {
            warn!(owner_id = %owner_id, error = %e, "Signature verification failed");
            false
        }
    };
    if !verified {
        return Err(CommandError::SignatureRejected(owner_id));
    }

    let limits = &ctx.config.gardens;
    let side_ok = |side: u32| (limits.min_size..=limits.max_size).contains(&side);
    if !side_ok(rect.width) || !side_ok(rect.height) {
        return Err(CommandError::GardenSize {
            width: rect.width,
            height: rect.height,
            min: limits.min_size,
            max: limits.max_size,
        });
    }

    if !is_area_available(ctx.world.gardens(), ctx.config.world.island_radius, &rect) {
        return Err(CommandError::AreaUnavailable {
            start_x: rect.start_x,
            start_y: rect.start_y,
        });
    }

    let fence_type = fence_type.unwrap_or_default();
    let tiles = build_parcel_tiles(&rect);
    mark_fence(ctx.world, &tiles, fence_type);

    let tile_count = tiles.len();
    ctx.world.add_garden(PrivateGarden {
        owner_id: owner_id.clone(),
        tiles,
        created_at: now,
        fence_type,
    });

    info!(
        owner_id = %owner_id,
        start_x = rect.start_x,
        start_y = rect.start_y,
        width = rect.width,
        height = rect.height,
        fence = ?fence_type,
        "Garden claimed"
    );

    Ok(CommandOutcome::GardenClaimed {
        owner_id,
        tiles: tile_count,
    })
}

fn update_fence(
    world: &mut World,
    owner_id: OwnerId,
    fence_type: FenceType,
) -> Result<CommandOutcome, CommandError> {
    let garden = world
        .garden_owned_by_mut(&owner_id)
        .ok_or_else(|| CommandError::NoGarden(owner_id.clone()))?;
    garden.fence_type = fence_type;
    let tiles = garden.tiles.clone();
    mark_fence(world, &tiles, fence_type);

    Ok(CommandOutcome::FenceUpdated {
        owner_id,
        fence_type,
    })
}

/// Annotate the world tiles under a parcel's border with its fence.
fn mark_fence(world: &mut World, parcel: &[GardenTile], fence_type: FenceType) {
    for border in parcel.iter().filter(|t| t.has_fence) {
        if let Some(tile) = world.tile_mut(border.x, border.y) {
            tile.has_fence = true;
            tile.fence_type = Some(fence_type);
        }
    }
}

// ---------------------------------------------------------------------------
// Creatures
// ---------------------------------------------------------------------------

fn creature_mut(world: &mut World, id: CreatureId) -> Result<&mut Creature, CommandError> {
    world
        .creature_mut(id)
        .ok_or(CommandError::CreatureNotFound(id))
}

fn ensure_owner(world: &World, id: CreatureId, owner_id: &OwnerId) -> Result<(), CommandError> {
    let creature = world.creature(id).ok_or(CommandError::CreatureNotFound(id))?;
    if !creature.is_owned_by(owner_id) {
        return Err(CommandError::NotOwner {
            creature_id: id,
            owner_id: owner_id.clone(),
        });
    }
    Ok(())
}

/// Look up a creature whose state is about to change.
///
/// If it is mid-play, its partner is released first so no link is left
/// pointing one way.
fn creature_leaving_play(
    world: &mut World,
    id: CreatureId,
) -> Result<&mut Creature, CommandError> {
    if world.creature(id).is_none() {
        return Err(CommandError::CreatureNotFound(id));
    }
    release_partner(world, id);
    creature_mut(world, id)
}

/// End the partner's side of `id`'s play session, if it has one.
fn release_partner(world: &mut World, id: CreatureId) {
    let Some(partner_id) = world.creature(id).and_then(|c| c.playing_with) else {
        return;
    };
    if let Some(partner) = world
        .creature_mut(partner_id)
        .filter(|partner| partner.playing_with == Some(id))
    {
        behavior::end_play(partner);
    }
}

fn bathe(
    world: &mut World,
    creature_id: CreatureId,
    owner_id: &OwnerId,
    now: Timestamp,
) -> Result<CommandOutcome, CommandError> {
    ensure_owner(world, creature_id, owner_id)?;
    let creature = world
        .creature(creature_id)
        .ok_or(CommandError::CreatureNotFound(creature_id))?;
    let near_fountain = world
        .fountains()
        .iter()
        .any(|f| creature.distance_to(f.x, f.y) <= BATHE_RANGE);
    if !near_fountain {
        return Err(CommandError::NoFountainNearby(creature_id));
    }

    let creature = creature_leaving_play(world, creature_id)?;
    behavior::start_timed_state(creature, CreatureState::Bathing, now);
    Ok(CommandOutcome::CreatureUpdated { creature_id })
}

fn play(
    world: &mut World,
    creature_id: CreatureId,
    target_creature_id: CreatureId,
    now: Timestamp,
) -> Result<CommandOutcome, CommandError> {
    if creature_id == target_creature_id {
        return Err(CommandError::SelfPlay(creature_id));
    }
    let a = world
        .creature(creature_id)
        .ok_or(CommandError::CreatureNotFound(creature_id))?;
    let b = world
        .creature(target_creature_id)
        .ok_or(CommandError::CreatureNotFound(target_creature_id))?;

    let distance = a.distance_to(b.x, b.y);
    if distance > PLAY_RANGE {
        return Err(CommandError::TooFarToPlay {
            distance,
            limit: PLAY_RANGE,
        });
    }

    // Both may already be playing with someone else.
    release_partner(world, creature_id);
    release_partner(world, target_creature_id);

    let (a, b) = world
        .creature_pair_mut(creature_id, target_creature_id)
        .ok_or(CommandError::CreatureNotFound(target_creature_id))?;

    for (creature, partner) in [(a, target_creature_id), (b, creature_id)] {
        behavior::start_timed_state(creature, CreatureState::Playing, now);
        creature.is_playing = true;
        creature.playing_with = Some(partner);
        vitality::restore(creature, vitality::PLAY_VITALITY_GAIN);
    }

    Ok(CommandOutcome::PlayStarted {
        creature_id,
        target_creature_id,
    })
}

fn remove_creature(
    world: &mut World,
    creature_id: CreatureId,
) -> Result<CommandOutcome, CommandError> {
    if world.creature(creature_id).is_none() {
        return Err(CommandError::CreatureNotFound(creature_id));
    }
    release_partner(world, creature_id);
    world.remove_creature(creature_id)?;
    info!(creature_id = %creature_id, "Creature removed");
    Ok(CommandOutcome::CreatureRemoved { creature_id })
}
