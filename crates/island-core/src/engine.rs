//! The simulation: sole owner of the world.
//!
//! [`Simulation`] bundles the [`World`] with everything needed to change it
//! (configuration, the RNG, the signature verifier). Commands and both
//! ticks go through its methods, and nothing else holds a mutable handle,
//! so every mutation is serialized by construction.

use chrono::Utc;
use island_types::{Command, Timestamp};
use island_world::{World, WorldError, create_starting_world};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::commands::{self, CommandContext, CommandOutcome};
use crate::config::IslandConfig;
use crate::error::CommandError;
use crate::movement::{self, MovementReport};
use crate::verifier::SignatureVerifier;
use crate::vitality;

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_millis() -> Timestamp {
    Utc::now().timestamp_millis()
}

/// The world plus the state needed to mutate it.
pub struct Simulation {
    world: World,
    config: IslandConfig,
    rng: StdRng,
    verifier: Box<dyn SignatureVerifier>,
}

impl Simulation {
    /// Wrap an existing world.
    ///
    /// The RNG is seeded from `config.world.seed` when set, otherwise from
    /// OS entropy.
    pub fn new(world: World, config: IslandConfig, verifier: Box<dyn SignatureVerifier>) -> Self {
        let rng = rng_for(&config);
        Self {
            world,
            config,
            rng,
            verifier,
        }
    }

    /// Generate a fresh island and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the configured island shape is invalid.
    pub fn generate(
        config: IslandConfig,
        verifier: Box<dyn SignatureVerifier>,
    ) -> Result<Self, WorldError> {
        let mut rng = rng_for(&config);
        let world = create_starting_world(&config.island_params(), &mut rng)?;
        Ok(Self {
            world,
            config,
            rng,
            verifier,
        })
    }

    /// Read-only view of the world.
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The active configuration.
    pub const fn config(&self) -> &IslandConfig {
        &self.config
    }

    /// Validate and apply a command at time `now`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the command is rejected; the world is
    /// unchanged in that case.
    pub fn apply(
        &mut self,
        command: Command,
        now: Timestamp,
    ) -> Result<CommandOutcome, CommandError> {
        let mut ctx = CommandContext {
            world: &mut self.world,
            config: &self.config,
            verifier: self.verifier.as_ref(),
            rng: &mut self.rng,
        };
        commands::execute(&mut ctx, command, now)
    }

    /// Run one movement tick at time `now`.
    pub fn movement_tick(&mut self, now: Timestamp) -> MovementReport {
        movement::movement_tick(
            &mut self.world,
            &self.config.movement,
            self.config.world.island_radius,
            now,
            &mut self.rng,
        )
    }

    /// Run one vitality decay tick. Returns how many creatures changed.
    pub fn vitality_tick(&mut self) -> usize {
        vitality::decay_all(&mut self.world, self.config.vitality.decay_rate)
    }
}

fn rng_for(config: &IslandConfig) -> StdRng {
    config
        .world
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}
