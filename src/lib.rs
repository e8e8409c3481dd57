//! # foxfield
//!
//! Predator-prey grid ecosystem simulator.
//!
//! A vegetation layer and two mobile populations (grazing prey, hunting
//! predators) interact on a discrete square grid through movement, feeding,
//! starvation and reproduction, advancing in synchronous generations.
//!
//! ## Features
//!
//! - **Deterministic**: every random draw flows through one seeded ChaCha8
//!   generator, so equal seeds replay exactly
//! - **Total**: `generation()` is defined for every reachable state, empty
//!   populations included
//! - **Configurable**: YAML configuration, validated at construction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use foxfield::{Config, Field};
//!
//! let config = Config::default();
//! let mut field = Field::new(config).unwrap();
//!
//! field.run(1000);
//!
//! println!("Prey: {}", field.prey_count());
//! println!("Predators: {}", field.predator_count());
//! ```
//!
//! ## Reproducible runs
//!
//! ```rust,no_run
//! use foxfield::{Config, Field};
//!
//! let mut field = Field::with_seed(Config::default(), 42).unwrap();
//! field.run(500);
//! assert_eq!(field.seed(), 42);
//! ```

pub mod config;
pub mod field;
pub mod grid;
pub mod predator;
pub mod prey;
pub mod rng;
pub mod stats;

// Re-export main types
pub use config::{Config, ConfigError};
pub use field::Field;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(generations: u64, size: usize) -> Result<BenchmarkResult, ConfigError> {
    use std::time::Instant;

    let mut config = Config::default();
    config.field.size = size;

    let mut field = Field::new(config)?;

    let start = Instant::now();
    field.run(generations);
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        generations,
        grid_size: size,
        final_prey: field.prey_count(),
        final_predators: field.predator_count(),
        elapsed_secs: elapsed.as_secs_f64(),
        generations_per_second: generations as f64 / elapsed.as_secs_f64(),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub generations: u64,
    pub grid_size: usize,
    pub final_prey: usize,
    pub final_predators: usize,
    pub elapsed_secs: f64,
    pub generations_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(f, "Grid: {}x{}", self.grid_size, self.grid_size)?;
        writeln!(f, "Final prey: {}", self.final_prey)?;
        writeln!(f, "Final predators: {}", self.final_predators)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} generations/s", self.generations_per_second)?;
        Ok(())
    }
}
