//! Vitality decay and restoration.
//!
//! Vitality only changes through [`Creature::set_vitality`], which clamps to
//! `0..=100` and re-derives the emotional state, so every function here
//! keeps mood and vitality in step.

use island_types::{Creature, FoodType};
use island_world::World;
use tracing::trace;

/// Vitality each partner gains from a play session.
pub const PLAY_VITALITY_GAIN: u32 = 5;

/// Raise a creature's vitality, capped at the maximum.
pub fn restore(creature: &mut Creature, amount: u32) {
    creature.set_vitality(creature.vitality().saturating_add(amount));
}

/// Vitality gained from a food name. Unknown foods give nothing.
pub fn food_gain(food_name: &str) -> u32 {
    FoodType::from_name(food_name).map_or(0, FoodType::vitality_gain)
}

/// Run one decay tick: every creature loses `rate`, floored at zero.
///
/// Returns how many creatures changed.
pub fn decay_all(world: &mut World, rate: u32) -> usize {
    let mut changed: usize = 0;
    for creature in world.creatures_mut() {
        let before = creature.vitality();
        creature.set_vitality(before.saturating_sub(rate));
        if creature.vitality() != before {
            changed = changed.saturating_add(1);
            trace!(
                creature_id = %creature.id,
                vitality = creature.vitality(),
                mood = ?creature.emotional_state(),
                "Vitality decayed"
            );
        }
    }
    changed
}
