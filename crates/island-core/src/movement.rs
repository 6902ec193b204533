//! The fast movement tick.
//!
//! Each tick, in order:
//!
//! 1. Lapsed timed states, jumps, and bubbles revert.
//! 2. Idle creatures may start wandering toward a random island point.
//! 3. Walking creatures take one step of at most `speed` toward their
//!    target, turning to face the step. A step that would enter or leave a
//!    garden is refused: the creature halts where it stands.

use island_types::{Creature, CreatureState, Direction, PrivateGarden, Timestamp};
use island_world::{World, movement_crosses_any_fence, random_point_on_island};
use rand::Rng;
use tracing::trace;

use crate::behavior;
use crate::config::MovementConfig;

/// What a movement tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementReport {
    /// Creatures with at least one timer that lapsed.
    pub expired: usize,
    /// Idle creatures that started wandering.
    pub wandered: usize,
    /// Creatures that took a step.
    pub stepped: usize,
    /// Creatures that reached their target.
    pub arrived: usize,
    /// Creatures stopped by a fence.
    pub halted: usize,
}

impl MovementReport {
    /// Whether the tick changed anything.
    pub const fn is_quiet(&self) -> bool {
        self.expired == 0
            && self.wandered == 0
            && self.stepped == 0
            && self.arrived == 0
            && self.halted == 0
    }
}

/// Outcome of advancing one walking creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Moved,
    Arrived,
    Halted,
}

/// Run one movement tick over every creature.
pub fn movement_tick<R: Rng + ?Sized>(
    world: &mut World,
    config: &MovementConfig,
    island_radius: f64,
    now: Timestamp,
    rng: &mut R,
) -> MovementReport {
    let mut report = MovementReport::default();
    let (creatures, gardens) = world.creatures_and_gardens_mut();

    for creature in creatures.iter_mut() {
        if behavior::expire(creature, now) {
            report.expired = report.expired.saturating_add(1);
        }

        match creature.state {
            CreatureState::Idle => {
                if rng.random_bool(config.wander_chance) {
                    let (x, y) = random_point_on_island(island_radius, rng);
                    behavior::start_walking(creature, x, y);
                    report.wandered = report.wandered.saturating_add(1);
                }
            }
            CreatureState::Walking => match step(creature, gardens, config) {
                Step::Moved => report.stepped = report.stepped.saturating_add(1),
                Step::Arrived => report.arrived = report.arrived.saturating_add(1),
                Step::Halted => report.halted = report.halted.saturating_add(1),
            },
            _ => {}
        }
    }

    report
}

fn step(creature: &mut Creature, gardens: &[PrivateGarden], config: &MovementConfig) -> Step {
    let dx = creature.target_x - creature.x;
    let dy = creature.target_y - creature.y;
    let distance = dx.hypot(dy);

    if distance <= config.arrival_epsilon {
        creature.state = CreatureState::Idle;
        creature.state_expires_at = None;
        return Step::Arrived;
    }

    let stride = config.speed.min(distance);
    let next = (
        creature.x + dx / distance * stride,
        creature.y + dy / distance * stride,
    );
    creature.direction = Direction::from_vector(dx, dy);

    if movement_crosses_any_fence(gardens, (creature.x, creature.y), next) {
        trace!(
            creature_id = %creature.id,
            x = creature.x,
            y = creature.y,
            "Fence blocks step"
        );
        creature.halt();
        return Step::Halted;
    }

    creature.x = next.0;
    creature.y = next.1;
    Step::Moved
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use island_types::{FenceType, OwnerId};
    use island_world::{ClaimRect, build_parcel_tiles};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const RADIUS: f64 = 20.0;

    fn still() -> MovementConfig {
        MovementConfig {
            wander_chance: 0.0,
            ..MovementConfig::default()
        }
    }

    fn walker(x: f64, y: f64, tx: f64, ty: f64) -> Creature {
        let mut c = Creature::new(x, y, "#ff9f43", None);
        behavior::start_walking(&mut c, tx, ty);
        c
    }

    fn garden_at(start_x: i32, start_y: i32, width: u32, height: u32) -> PrivateGarden {
        PrivateGarden {
            owner_id: OwnerId::new("owner"),
            tiles: build_parcel_tiles(&ClaimRect {
                start_x,
                start_y,
                width,
                height,
            }),
            created_at: 0,
            fence_type: FenceType::Wooden,
        }
    }

    #[test]
    fn walker_steps_toward_target() {
        let mut world = World::new(Vec::new(), vec![walker(0.0, 0.0, 1.0, 0.0)]);
        let mut rng = StdRng::seed_from_u64(1);

        let report = movement_tick(&mut world, &still(), RADIUS, 0, &mut rng);
        assert_eq!(report.stepped, 1);

        let c = &world.creatures()[0];
        assert!((c.x - 0.05).abs() < 1e-9);
        assert_eq!(c.direction, Direction::East);
    }

    #[test]
    fn walker_arrives_and_idles() {
        let mut world = World::new(Vec::new(), vec![walker(0.0, 0.0, 0.3, 0.3)]);
        let mut rng = StdRng::seed_from_u64(1);

        let mut arrived = false;
        for tick in 0..50 {
            let report = movement_tick(&mut world, &still(), RADIUS, tick, &mut rng);
            if report.arrived == 1 {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        let c = &world.creatures()[0];
        assert_eq!(c.state, CreatureState::Idle);
        assert!(c.distance_to(0.3, 0.3) <= 0.1);
    }

    #[test]
    fn step_never_overshoots() {
        let config = MovementConfig {
            speed: 1.0,
            arrival_epsilon: 0.0,
            wander_chance: 0.0,
            ..MovementConfig::default()
        };
        let mut world = World::new(Vec::new(), vec![walker(0.0, 0.0, 0.4, 0.0)]);
        let mut rng = StdRng::seed_from_u64(1);

        movement_tick(&mut world, &config, RADIUS, 0, &mut rng);
        assert!((world.creatures()[0].x - 0.4).abs() < 1e-9);
    }

    #[test]
    fn fence_halts_creature_before_crossing() {
        // Parcel covers x in 5..=7; the walker heads straight through it.
        let mut world = World::new(Vec::new(), vec![walker(0.0, 0.0, 10.0, 0.0)]);
        world.add_garden(garden_at(5, -1, 3, 3));
        let mut rng = StdRng::seed_from_u64(1);

        let mut halted_at = None;
        for tick in 0..400 {
            let report = movement_tick(&mut world, &still(), RADIUS, tick, &mut rng);
            if report.halted == 1 {
                halted_at = Some(world.creatures()[0].x);
                break;
            }
        }

        let x = halted_at.unwrap();
        assert!(x < 5.0);
        assert!(x > 4.9);
        let c = &world.creatures()[0];
        assert_eq!(c.state, CreatureState::Idle);
        assert!((c.target_x - c.x).abs() < f64::EPSILON);
        assert!((c.target_y - c.y).abs() < f64::EPSILON);
    }

    #[test]
    fn creature_inside_a_garden_cannot_leave() {
        let mut world = World::new(Vec::new(), vec![walker(6.0, 0.0, 12.0, 0.0)]);
        world.add_garden(garden_at(5, -1, 3, 3));
        let mut rng = StdRng::seed_from_u64(1);

        for tick in 0..100 {
            movement_tick(&mut world, &still(), RADIUS, tick, &mut rng);
        }
        assert!(world.creatures()[0].x <= 7.0);
    }

    #[test]
    fn idle_creatures_wander_inside_the_island() {
        let config = MovementConfig {
            wander_chance: 1.0,
            ..MovementConfig::default()
        };
        let creatures = (0..10).map(|_| Creature::new(0.0, 0.0, "#ff9f43", None)).collect();
        let mut world = World::new(Vec::new(), creatures);
        let mut rng = StdRng::seed_from_u64(5);

        let report = movement_tick(&mut world, &config, RADIUS, 0, &mut rng);
        assert_eq!(report.wandered, 10);
        for c in world.creatures() {
            assert_eq!(c.state, CreatureState::Walking);
            assert!(c.target_x.hypot(c.target_y) <= RADIUS);
        }
    }

    #[test]
    fn timed_states_do_not_walk_or_wander() {
        let config = MovementConfig {
            wander_chance: 1.0,
            ..MovementConfig::default()
        };
        let mut c = Creature::new(0.0, 0.0, "#ff9f43", None);
        behavior::start_timed_state(&mut c, CreatureState::Sleeping, 0);
        let mut world = World::new(Vec::new(), vec![c]);
        let mut rng = StdRng::seed_from_u64(5);

        let report = movement_tick(&mut world, &config, RADIUS, 100, &mut rng);
        assert!(report.is_quiet());
        assert_eq!(world.creatures()[0].state, CreatureState::Sleeping);
    }

    #[test]
    fn expiry_runs_before_wandering() {
        let mut c = Creature::new(0.0, 0.0, "#ff9f43", None);
        behavior::start_timed_state(&mut c, CreatureState::Dancing, 0);
        let mut world = World::new(Vec::new(), vec![c]);
        let mut rng = StdRng::seed_from_u64(5);

        let report = movement_tick(&mut world, &still(), RADIUS, 2_000, &mut rng);
        assert_eq!(report.expired, 1);
        assert_eq!(world.creatures()[0].state, CreatureState::Idle);
    }
}
