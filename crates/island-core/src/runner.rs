//! The engine actor loop.
//!
//! [`run_engine`] is the only task that touches the [`Simulation`]. It
//! waits on three sources at once:
//!
//! - **Movement interval**: expire timers, wander, step walkers
//! - **Vitality interval**: decay every creature (first decay one full
//!   period after start)
//! - **Command queue**: apply one observer command
//!
//! Each branch runs to completion before the next is polled. After every
//! tick, and after every command that was applied, the [`WorldCallback`]
//! sees the new world. Rejected commands are logged and produce no
//! callback. The loop returns once every command sender is gone.

use island_types::Command;
use island_world::World;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::engine::{Simulation, now_millis};

/// Errors that prevent the engine loop from starting.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick period of zero would spin the loop.
    #[error("{which} tick interval must be greater than zero")]
    ZeroInterval {
        /// Which tick was misconfigured.
        which: &'static str,
    },
}

/// Why the world changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// A command was applied.
    Command,
    /// The movement tick ran.
    MovementTick,
    /// The vitality tick ran.
    VitalityTick,
}

/// Callback invoked with the world after every change.
///
/// The observer implementation serializes the world and fans it out to
/// connected clients.
pub trait WorldCallback: Send {
    /// Called after the world changed.
    fn on_change(&mut self, world: &World, cause: ChangeCause);
}

/// A no-op callback for testing.
pub struct NoOpCallback;

impl WorldCallback for NoOpCallback {
    fn on_change(&mut self, _world: &World, _cause: ChangeCause) {}
}

/// Counters describing a finished engine run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineSummary {
    /// Commands applied.
    pub commands_applied: u64,
    /// Commands rejected.
    pub commands_rejected: u64,
    /// Movement ticks run.
    pub movement_ticks: u64,
    /// Vitality ticks run.
    pub vitality_ticks: u64,
}

/// Drive the simulation until the command queue closes.
///
/// # Errors
///
/// Returns [`RunnerError::ZeroInterval`] if either tick period is zero.
pub async fn run_engine(
    simulation: &mut Simulation,
    mut commands: mpsc::Receiver<Command>,
    callback: &mut dyn WorldCallback,
) -> Result<EngineSummary, RunnerError> {
    let movement_period = simulation.config().movement.tick_interval();
    let vitality_period = simulation.config().vitality.check_interval();
    if movement_period.is_zero() {
        return Err(RunnerError::ZeroInterval { which: "movement" });
    }
    if vitality_period.is_zero() {
        return Err(RunnerError::ZeroInterval { which: "vitality" });
    }

    let mut movement = tokio::time::interval(movement_period);
    movement.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut vitality = tokio::time::interval(vitality_period);
    vitality.set_missed_tick_behavior(MissedTickBehavior::Skip);
    vitality.reset();

    let mut summary = EngineSummary::default();

    info!(
        movement_ms = movement_period.as_millis(),
        vitality_ms = vitality_period.as_millis(),
        creatures = simulation.world().creatures().len(),
        "Engine starting"
    );

    loop {
        tokio::select! {
            _ = movement.tick() => {
                simulation.movement_tick(now_millis());
                summary.movement_ticks = summary.movement_ticks.saturating_add(1);
                callback.on_change(simulation.world(), ChangeCause::MovementTick);
            }
            _ = vitality.tick() => {
                let decayed = simulation.vitality_tick();
                summary.vitality_ticks = summary.vitality_ticks.saturating_add(1);
                debug!(decayed, "Vitality tick");
                callback.on_change(simulation.world(), ChangeCause::VitalityTick);
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                let action = command.action();
                match simulation.apply(command, now_millis()) {
                    Ok(outcome) => {
                        summary.commands_applied = summary.commands_applied.saturating_add(1);
                        debug!(action, ?outcome, "Command applied");
                        callback.on_change(simulation.world(), ChangeCause::Command);
                    }
                    Err(e) => {
                        summary.commands_rejected = summary.commands_rejected.saturating_add(1);
                        debug!(action, reason = %e, "Command rejected");
                    }
                }
            }
        }
    }

    Ok(summary)
}

/// Log the end of an engine run.
pub fn log_engine_end(summary: &EngineSummary) {
    info!(
        commands_applied = summary.commands_applied,
        commands_rejected = summary.commands_rejected,
        movement_ticks = summary.movement_ticks,
        vitality_ticks = summary.vitality_ticks,
        "Engine stopped"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use island_types::{CreatureId, OwnerId};

    use super::*;
    use crate::config::IslandConfig;
    use crate::verifier::Ed25519Verifier;

    /// Records every change it is shown.
    #[derive(Default)]
    struct Recorder {
        causes: Vec<ChangeCause>,
        last_creature_count: usize,
    }

    impl WorldCallback for Recorder {
        fn on_change(&mut self, world: &World, cause: ChangeCause) {
            self.causes.push(cause);
            self.last_creature_count = world.creatures().len();
        }
    }

    impl Recorder {
        fn count(&self, cause: ChangeCause) -> usize {
            self.causes.iter().filter(|c| **c == cause).count()
        }
    }

    fn simulation(config: IslandConfig) -> Simulation {
        Simulation::generate(config, Box::new(Ed25519Verifier)).unwrap()
    }

    fn quiet_config() -> IslandConfig {
        let mut config = IslandConfig::default();
        config.world.seed = Some(7);
        config.world.initial_creatures = 0;
        config
    }

    #[tokio::test(start_paused = true)]
    async fn applied_commands_reach_the_callback() {
        let mut sim = simulation(quiet_config());
        let (tx, rx) = mpsc::channel(8);
        tx.send(Command::MintCreature {
            owner_id: OwnerId::new("wallet"),
        })
        .await
        .unwrap();
        tx.send(Command::Jump {
            creature_id: CreatureId::new(),
        })
        .await
        .unwrap();
        drop(tx);

        let mut recorder = Recorder::default();
        let summary = run_engine(&mut sim, rx, &mut recorder).await.unwrap();

        assert_eq!(summary.commands_applied, 1);
        assert_eq!(summary.commands_rejected, 1);
        assert_eq!(recorder.count(ChangeCause::Command), 1);
        assert_eq!(recorder.last_creature_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_fire_on_their_own_periods() {
        let mut config = quiet_config();
        config.movement.tick_interval_ms = 100;
        config.vitality.check_interval_ms = 1_000;
        let mut sim = simulation(config);
        let (tx, rx) = mpsc::channel::<Command>(1);

        let mut recorder = Recorder::default();
        let run = run_engine(&mut sim, rx, &mut recorder);
        let stop = async {
            tokio::time::sleep(Duration::from_millis(2_050)).await;
            drop(tx);
        };
        let (summary, ()) = tokio::join!(run, stop);
        let summary = summary.unwrap();

        // Movement fires at 0, 100, ..., 2000; vitality at 1000 and 2000.
        assert_eq!(summary.movement_ticks, 21);
        assert_eq!(summary.vitality_ticks, 2);
        assert_eq!(recorder.count(ChangeCause::VitalityTick), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn vitality_decays_through_the_loop() {
        let mut config = quiet_config();
        config.vitality.check_interval_ms = 10;
        config.vitality.decay_rate = 10;
        config.movement.wander_chance = 0.0;
        let mut sim = simulation(config);
        let (tx, rx) = mpsc::channel(1);
        tx.send(Command::AddCreature { x: 0.0, y: 0.0 })
            .await
            .unwrap();

        let mut callback = NoOpCallback;
        let run = run_engine(&mut sim, rx, &mut callback);
        let stop = async {
            tokio::time::sleep(Duration::from_millis(35)).await;
            drop(tx);
        };
        let (summary, ()) = tokio::join!(run, stop);
        assert_eq!(summary.unwrap().vitality_ticks, 3);

        let creature = sim.world().creatures().first().unwrap();
        assert_eq!(creature.vitality(), 70);
    }

    #[tokio::test]
    async fn zero_interval_is_rejected() {
        let mut config = quiet_config();
        config.movement.tick_interval_ms = 0;
        let mut sim = Simulation::new(World::default(), config, Box::new(Ed25519Verifier));
        let (_tx, rx) = mpsc::channel(1);

        let result = run_engine(&mut sim, rx, &mut NoOpCallback).await;
        assert!(matches!(result, Err(RunnerError::ZeroInterval { which: "movement" })));
    }
}
