//! Configuration loading and typed config structures.
//!
//! The configuration lives in `island-config.yaml` in the working
//! directory. Every field has a default, so a missing file, an empty file,
//! or a file that only overrides a few keys are all valid.

use std::path::Path;
use std::time::Duration;

use island_world::IslandParams;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but makes no sense.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `island-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IslandConfig {
    /// Island shape and starting population.
    #[serde(default)]
    pub world: WorldConfig,

    /// Garden claim limits.
    #[serde(default)]
    pub gardens: GardenConfig,

    /// Vitality decay.
    #[serde(default)]
    pub vitality: VitalityConfig,

    /// Movement tick parameters.
    #[serde(default)]
    pub movement: MovementConfig,

    /// Message log.
    #[serde(default)]
    pub messages: MessageConfig,

    /// Listening address of the sync server.
    #[serde(default)]
    pub server: ServerSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IslandConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override the server address:
    /// - `ISLAND_HOST` overrides `server.host`
    /// - `ISLAND_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("world.island_radius", self.world.island_radius)?;
        require_positive("movement.speed", self.movement.speed)?;
        require_positive("movement.arrival_epsilon", self.movement.arrival_epsilon)?;
        if self.gardens.min_size == 0 || self.gardens.min_size > self.gardens.max_size {
            return Err(ConfigError::Invalid {
                field: "gardens.min_size",
                reason: format!(
                    "must be between 1 and max_size ({}), got {}",
                    self.gardens.max_size, self.gardens.min_size
                ),
            });
        }
        if self.movement.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "movement.tick_interval_ms",
                reason: String::from("must be greater than zero"),
            });
        }
        if self.vitality.check_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "vitality.check_interval_ms",
                reason: String::from("must be greater than zero"),
            });
        }
        if !(0.0..=1.0).contains(&self.movement.wander_chance) {
            return Err(ConfigError::Invalid {
                field: "movement.wander_chance",
                reason: format!("must be a probability, got {}", self.movement.wander_chance),
            });
        }
        Ok(())
    }

    /// Island generation parameters.
    pub const fn island_params(&self) -> IslandParams {
        IslandParams {
            radius: self.world.island_radius,
            initial_creatures: self.world.initial_creatures,
        }
    }
}

/// Reject a value that is not a finite number above zero.
fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

/// Island shape and starting population.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Island radius in tiles.
    #[serde(default = "default_island_radius")]
    pub island_radius: f64,

    /// Unowned creatures present at startup.
    #[serde(default = "default_initial_creatures")]
    pub initial_creatures: u32,

    /// Seed for the world RNG; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            island_radius: default_island_radius(),
            initial_creatures: default_initial_creatures(),
            seed: None,
        }
    }
}

/// Garden claim limits, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GardenConfig {
    /// Smallest allowed side length.
    #[serde(default = "default_min_garden_size")]
    pub min_size: u32,

    /// Largest allowed side length.
    #[serde(default = "default_max_garden_size")]
    pub max_size: u32,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_garden_size(),
            max_size: default_max_garden_size(),
        }
    }
}

/// Vitality decay parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VitalityConfig {
    /// Vitality lost per decay tick.
    #[serde(default = "default_decay_rate")]
    pub decay_rate: u32,

    /// Milliseconds between decay ticks.
    #[serde(default = "default_check_interval_ms")]
    pub check_interval_ms: u64,
}

impl VitalityConfig {
    /// Period of the decay tick.
    pub const fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms)
    }
}

impl Default for VitalityConfig {
    fn default() -> Self {
        Self {
            decay_rate: default_decay_rate(),
            check_interval_ms: default_check_interval_ms(),
        }
    }
}

/// Movement tick parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovementConfig {
    /// Milliseconds between movement ticks.
    #[serde(default = "default_movement_tick_ms")]
    pub tick_interval_ms: u64,

    /// Distance covered per tick while walking.
    #[serde(default = "default_speed")]
    pub speed: f64,

    /// Distance at which a walker counts as arrived.
    #[serde(default = "default_arrival_epsilon")]
    pub arrival_epsilon: f64,

    /// Per-tick chance that an idle creature starts wandering.
    #[serde(default = "default_wander_chance")]
    pub wander_chance: f64,
}

impl MovementConfig {
    /// Period of the movement tick.
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_movement_tick_ms(),
            speed: default_speed(),
            arrival_epsilon: default_arrival_epsilon(),
            wander_chance: default_wander_chance(),
        }
    }
}

/// Message log parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageConfig {
    /// Lines kept in the world's message log.
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
        }
    }
}

/// Listening address of the sync server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSettings {
    /// Apply `ISLAND_HOST` / `ISLAND_PORT` environment overrides.
    ///
    /// An unparseable `ISLAND_PORT` is ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("ISLAND_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("ISLAND_PORT") {
            match port.parse() {
                Ok(p) => self.port = p,
                Err(e) => tracing::warn!(value = %port, error = %e, "ignoring invalid ISLAND_PORT"),
            }
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_island_radius() -> f64 {
    20.0
}

const fn default_initial_creatures() -> u32 {
    5
}

const fn default_min_garden_size() -> u32 {
    3
}

const fn default_max_garden_size() -> u32 {
    10
}

const fn default_decay_rate() -> u32 {
    1
}

const fn default_check_interval_ms() -> u64 {
    60_000
}

const fn default_movement_tick_ms() -> u64 {
    100
}

const fn default_speed() -> f64 {
    0.05
}

const fn default_arrival_epsilon() -> f64 {
    0.1
}

const fn default_wander_chance() -> f64 {
    0.02
}

const fn default_max_messages() -> usize {
    50
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3001
}

fn default_log_level() -> String {
    "info".to_owned()
}
