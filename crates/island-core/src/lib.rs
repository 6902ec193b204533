//! Simulation core for the Island world engine.
//!
//! Owns everything that changes the world: command validation and
//! application, the timed behavior of creatures, the movement and vitality
//! ticks, and the single-writer engine loop that serializes them.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with defaults and env overrides
//! - [`verifier`] -- Wallet signature verification for garden claims
//! - [`commands`] -- The command processor
//! - [`behavior`] -- Timed states, jumps, and speech bubbles
//! - [`movement`] -- The fast movement tick
//! - [`vitality`] -- Vitality decay and restoration
//! - [`engine`] -- [`Simulation`], the sole owner of the world
//! - [`runner`] -- The async engine loop and its change callback
//! - [`error`] -- Command rejection reasons ([`CommandError`])

pub mod behavior;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod movement;
pub mod runner;
pub mod verifier;
pub mod vitality;

pub use commands::CommandOutcome;
pub use config::{ConfigError, IslandConfig};
pub use engine::{Simulation, now_millis};
pub use error::CommandError;
pub use movement::MovementReport;
pub use runner::{
    ChangeCause, EngineSummary, NoOpCallback, RunnerError, WorldCallback, log_engine_end,
    run_engine,
};
pub use verifier::{Ed25519Verifier, SignatureVerifier, VerifyError};
