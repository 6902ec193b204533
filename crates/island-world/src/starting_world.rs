//! Island generation.
//!
//! Builds the starting world: a roughly circular island of tiles centered
//! on the origin, banded from the shore inward, plus a handful of unowned
//! creatures scattered over the land.
//!
//! # Terrain bands (by distance `d` from the center, radius `r`)
//!
//! | band | biome | height |
//! |---|---|---|
//! | `d > r - 3` | Edge | 0 |
//! | `d > r - 6` | Forest | 1 |
//! | `d < 3` | Clearing | 2 |
//! | otherwise | quadrant biome, 5% river veins | 1-2 (veins 0) |
//!
//! One tile in ten carries a random decoration.

use std::f64::consts::{PI, TAU};

use island_types::{BiomeType, Creature, Decoration, DecorationType, Tile};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::error::WorldError;
use crate::store::World;

/// Colors a creature can be born with.
pub const CREATURE_PALETTE: [&str; 5] = ["#ff9f43", "#ff7f50", "#ff6b6b", "#ffa502", "#ff9f1c"];

/// Distance from the shore that spawn and wander points keep.
const SHORE_MARGIN: f64 = 2.0;

/// Chance that a mid-island tile becomes a river vein.
const RIVER_VEIN_CHANCE: f64 = 0.05;

/// Chance that a tile carries a decoration.
const DECORATION_CHANCE: f64 = 0.1;

/// Parameters for [`create_starting_world`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IslandParams {
    /// Island radius in tiles.
    pub radius: f64,
    /// Number of unowned creatures to scatter.
    pub initial_creatures: u32,
}

/// Generate the starting world.
///
/// # Errors
///
/// Returns [`WorldError::InvalidIslandRadius`] if the radius is not a
/// positive finite number.
pub fn create_starting_world<R: Rng + ?Sized>(
    params: &IslandParams,
    rng: &mut R,
) -> Result<World, WorldError> {
    if !params.radius.is_finite() || params.radius <= 0.0 {
        return Err(WorldError::InvalidIslandRadius(params.radius));
    }

    let tiles = generate_tiles(params.radius, rng);
    let creatures = (0..params.initial_creatures)
        .map(|_| {
            let (x, y) = random_point_on_island(params.radius, rng);
            Creature::new(x, y, random_creature_color(rng), None)
        })
        .collect::<Vec<_>>();

    debug!(
        tiles = tiles.len(),
        creatures = creatures.len(),
        radius = params.radius,
        "Island generated"
    );

    Ok(World::new(tiles, creatures))
}

/// A uniformly random angle at a random distance short of the shore.
pub fn random_point_on_island<R: Rng + ?Sized>(radius: f64, rng: &mut R) -> (f64, f64) {
    let angle = rng.random::<f64>() * TAU;
    let distance = rng.random::<f64>() * (radius - SHORE_MARGIN).max(0.0);
    (angle.cos() * distance, angle.sin() * distance)
}

/// A random color from [`CREATURE_PALETTE`].
pub fn random_creature_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CREATURE_PALETTE.choose(rng).copied().unwrap_or("#ff9f43")
}

#[allow(clippy::cast_possible_truncation)]
fn generate_tiles<R: Rng + ?Sized>(radius: f64, rng: &mut R) -> Vec<Tile> {
    let extent = radius.floor() as i32;
    let mut tiles = Vec::new();

    for x in -extent..=extent {
        for y in -extent..=extent {
            let distance = f64::from(x).hypot(f64::from(y));
            if distance > radius {
                continue;
            }
            let (biome, height) = terrain_at(x, y, distance, radius, rng);
            let decoration = rng.random_bool(DECORATION_CHANCE).then(|| Decoration {
                kind: DecorationType::ALL
                    .choose(rng)
                    .copied()
                    .unwrap_or(DecorationType::Rock),
                variant: rng.random_range(0..4),
            });
            tiles.push(Tile {
                x,
                y,
                biome,
                height,
                decoration,
                has_fence: false,
                fence_type: None,
            });
        }
    }
    tiles
}

fn terrain_at<R: Rng + ?Sized>(
    x: i32,
    y: i32,
    distance: f64,
    radius: f64,
    rng: &mut R,
) -> (BiomeType, u8) {
    if distance > radius - 3.0 {
        return (BiomeType::Edge, 0);
    }
    if distance > radius - 6.0 {
        return (BiomeType::Forest, 1);
    }
    if distance < 3.0 {
        return (BiomeType::Clearing, 2);
    }

    let height = rng.random_range(1..=2);
    let turn = (f64::from(y).atan2(f64::from(x)) + PI) / TAU;
    let biome = if turn < 0.25 {
        BiomeType::Forest
    } else if turn < 0.5 {
        BiomeType::Desert
    } else if turn < 0.75 {
        BiomeType::Mountain
    } else {
        BiomeType::River
    };

    if rng.random_bool(RIVER_VEIN_CHANCE) {
        (BiomeType::River, 0)
    } else {
        (biome, height)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn params() -> IslandParams {
        IslandParams {
            radius: 20.0,
            initial_creatures: 5,
        }
    }

    #[test]
    fn tiles_cover_the_disk() {
        let mut rng = StdRng::seed_from_u64(7);
        let world = create_starting_world(&params(), &mut rng).unwrap();

        assert!(!world.tiles().is_empty());
        for tile in world.tiles() {
            assert!(f64::from(tile.x).hypot(f64::from(tile.y)) <= 20.0);
            assert!(!tile.has_fence);
        }
        assert!(world.tile(0, 0).is_some());
        assert!(world.tile(20, 0).is_some());
        assert!(world.tile(15, 15).is_none());
    }

    #[test]
    fn bands_follow_distance() {
        let mut rng = StdRng::seed_from_u64(7);
        let world = create_starting_world(&params(), &mut rng).unwrap();

        assert_eq!(world.tile(20, 0).map(|t| t.biome), Some(BiomeType::Edge));
        assert_eq!(world.tile(15, 0).map(|t| t.biome), Some(BiomeType::Forest));
        assert_eq!(world.tile(0, 0).map(|t| (t.biome, t.height)), Some((BiomeType::Clearing, 2)));
    }

    #[test]
    fn creatures_spawn_unowned_on_land() {
        let mut rng = StdRng::seed_from_u64(11);
        let world = create_starting_world(&params(), &mut rng).unwrap();

        assert_eq!(world.creatures().len(), 5);
        for creature in world.creatures() {
            assert!(creature.owner_id.is_none());
            assert!(creature.distance_to(0.0, 0.0) <= 18.0);
            assert!(CREATURE_PALETTE.contains(&creature.color.as_str()));
        }
    }

    #[test]
    fn rejects_non_positive_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        let bad = IslandParams {
            radius: 0.0,
            initial_creatures: 0,
        };
        assert!(matches!(
            create_starting_world(&bad, &mut rng),
            Err(WorldError::InvalidIslandRadius(_))
        ));
    }

    #[test]
    fn random_points_stay_inside() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let (x, y) = random_point_on_island(20.0, &mut rng);
            assert!(x.hypot(y) <= 20.0);
        }
    }
}
