//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: island_core::ConfigError,
    },

    /// Island generation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: island_world::WorldError,
    },

    /// The engine loop refused to start.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: island_core::RunnerError,
    },

    /// The sync server failed to start.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying startup error.
        #[from]
        source: island_observer::StartupError,
    },
}
