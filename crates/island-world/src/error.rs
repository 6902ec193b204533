//! Error types for the `island-world` crate.
//!
//! All fallible store and generation operations return [`WorldError`].

use island_types::CreatureId;

/// Errors that can occur during world store operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A creature was not found in the store.
    #[error("creature not found: {0}")]
    CreatureNotFound(CreatureId),

    /// No fountain exists at the given index.
    #[error("no fountain at index {0}")]
    FountainNotFound(usize),

    /// No pink tree exists at the given index.
    #[error("no pink tree at index {0}")]
    PinkTreeNotFound(usize),

    /// The island radius cannot hold any tiles.
    #[error("invalid island radius: {0}")]
    InvalidIslandRadius(f64),
}
