//! Engine binary for the Island world.
//!
//! Wires the simulation to the sync server and runs both until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `island-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Generate the island and its starting creatures
//! 4. Publish the initial world and start the sync server
//! 5. Run the engine loop until Ctrl-C
//! 6. Log the result

mod error;
mod observer_callback;

use std::path::Path;
use std::sync::Arc;

use island_core::{Ed25519Verifier, IslandConfig, Simulation, log_engine_end, run_engine};
use island_observer::{AppState, ServerConfig, spawn_observer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::observer_callback::ObserverCallback;

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "island-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, island generation, or server
/// startup fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration. Logging needs its level, so errors surface
    //    only once the subscriber is installed.
    let config = load_config();

    // 2. Initialize structured logging.
    let default_level = config
        .as_ref()
        .map_or("info", |c| c.logging.level.as_str())
        .to_owned();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(true)
        .init();

    info!("island-engine starting");

    let config = config?;
    info!(
        island_radius = config.world.island_radius,
        initial_creatures = config.world.initial_creatures,
        seed = config.world.seed,
        movement_tick_ms = config.movement.tick_interval_ms,
        vitality_tick_ms = config.vitality.check_interval_ms,
        "Configuration loaded"
    );

    // 3. Generate the island.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let mut simulation = Simulation::generate(config, Box::new(Ed25519Verifier))?;
    info!(
        tiles = simulation.world().tiles().len(),
        creatures = simulation.world().creatures().len(),
        "Starting world created"
    );

    // 4. Publish the initial world, then start the sync server so the
    //    first observer already has a snapshot to receive.
    let (app_state, command_rx) = AppState::new();
    let app_state = Arc::new(app_state);
    if let Err(e) = app_state.publish_world(simulation.world()) {
        warn!(error = %e, "Failed to publish initial world");
    }
    let observer_handle = spawn_observer(&server_config, Arc::clone(&app_state)).await?;
    info!(port = server_config.port, "Sync server started");

    // 5. Run the engine until Ctrl-C.
    let mut callback = ObserverCallback::new(Arc::clone(&app_state));
    tokio::select! {
        result = run_engine(&mut simulation, command_rx, &mut callback) => {
            // 6. Log results.
            log_engine_end(&result?);
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "Failed to listen for Ctrl-C");
            }
            info!("Shutdown requested");
        }
    }

    observer_handle.abort();
    info!(
        creatures = simulation.world().creatures().len(),
        gardens = simulation.world().gardens().len(),
        "island-engine shutdown complete"
    );

    Ok(())
}

/// Load configuration from [`CONFIG_PATH`], falling back to defaults when
/// the file does not exist.
fn load_config() -> Result<IslandConfig, EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok(IslandConfig::from_file(config_path)?)
    } else {
        IslandConfig::parse("").map_err(EngineError::from)
    }
}
