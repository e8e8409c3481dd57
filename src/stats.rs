//! Statistics tracking for the simulation.

use serde::{Deserialize, Serialize};

/// Statistics snapshot for a simulation generation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Generations elapsed
    pub time: u64,
    /// Live prey count
    pub prey: usize,
    /// Live predator count
    pub predators: usize,
    /// Vegetated cells
    pub vegetation: usize,
    /// Prey born this generation
    pub prey_births: usize,
    /// Predators born this generation
    pub predator_births: usize,
    /// Prey removed this generation (consumed or starved)
    pub prey_deaths: usize,
    /// Predators removed this generation (starved)
    pub predator_deaths: usize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Prey:{:6} | Pred:{:5} | Veg:{:7} | +{}/-{} prey, +{}/-{} pred",
            self.time,
            self.prey,
            self.predators,
            self.vegetation,
            self.prey_births,
            self.prey_deaths,
            self.predator_births,
            self.predator_deaths,
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in generations
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Get prey population over time
    pub fn prey_series(&self) -> Vec<(u64, usize)> {
        self.snapshots.iter().map(|s| (s.time, s.prey)).collect()
    }

    /// Get predator population over time
    pub fn predator_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.predators))
            .collect()
    }

    /// Get vegetation coverage over time
    pub fn vegetation_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.vegetation))
            .collect()
    }

    /// Save history to a JSON file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
