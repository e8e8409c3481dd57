//! Configuration system for the foxfield simulation.
//!
//! Supports YAML configuration files with sensible defaults. All values are
//! validated once at field construction; per-generation logic never checks
//! them again.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors, raised only at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be between 1 and {max}, got {got}")]
    InvalidGridSize { got: usize, max: usize },

    #[error("grass growth rate must be within [0, 1], got {0}")]
    InvalidGrassRate(f64),

    #[error("starvation threshold must be positive")]
    InvalidStarvationThreshold,

    #[error("offspring cap must be positive")]
    InvalidOffspringCap,

    #[error("generations per frame must be positive")]
    InvalidGenerationsPerFrame,

    #[error("stats interval must be positive")]
    InvalidStatsInterval,

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Largest supported grid edge; coordinates are stored as u16.
pub const MAX_GRID_SIZE: usize = u16::MAX as usize;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub field: FieldConfig,
    pub population: PopulationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Field/environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Edge length of the square grid
    pub size: usize,
    /// Wrap around at the borders (toroidal) instead of clamping
    pub wrap: bool,
    /// Probability of vegetation growing at any given cell per generation
    pub grass_rate: f64,
}

/// Agent population configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of prey at start
    pub initial_prey: usize,
    /// Number of predators at start
    pub initial_predators: usize,
    /// Consecutive foodless generations a predator tolerates
    pub starvation_threshold: u32,
    /// Maximum offspring per prey reproduction
    pub offspring_max: u32,
}

/// Display configuration for the external driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Generations advanced per rendered frame
    pub generations_per_frame: u64,
}

/// Logging and stats configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Generations between stats history snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            population: PopulationConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            size: 400,
            wrap: true,
            grass_rate: 0.05,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_prey: 10,
            initial_predators: 10,
            starvation_threshold: 10,
            offspring_max: 2,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            generations_per_frame: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 100,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field.size == 0 || self.field.size > MAX_GRID_SIZE {
            return Err(ConfigError::InvalidGridSize {
                got: self.field.size,
                max: MAX_GRID_SIZE,
            });
        }
        if !(0.0..=1.0).contains(&self.field.grass_rate) {
            return Err(ConfigError::InvalidGrassRate(self.field.grass_rate));
        }
        if self.population.starvation_threshold == 0 {
            return Err(ConfigError::InvalidStarvationThreshold);
        }
        if self.population.offspring_max == 0 {
            return Err(ConfigError::InvalidOffspringCap);
        }
        if self.display.generations_per_frame == 0 {
            return Err(ConfigError::InvalidGenerationsPerFrame);
        }
        if self.logging.stats_interval == 0 {
            return Err(ConfigError::InvalidStatsInterval);
        }
        Ok(())
    }
}
