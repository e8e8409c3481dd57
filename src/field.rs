//! Field engine - owns the grids and both populations, applies the
//! five-phase generation transition.

use crate::config::{Config, ConfigError};
use crate::grid::{Bounds, CellCode, OccupancyGrid, SpatialIndex, VegetationGrid};
use crate::predator::Predator;
use crate::prey::Prey;
use crate::rng::SimRng;
use crate::stats::{Stats, StatsHistory};
use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;

/// The simulation field
pub struct Field {
    // Populations
    pub prey: Vec<Prey>,
    pub predators: Vec<Predator>,

    // Environment
    pub vegetation: VegetationGrid,
    prey_trace: OccupancyGrid,
    predator_trace: OccupancyGrid,
    prey_index: SpatialIndex,

    // State
    pub time: u64,
    bounds: Bounds,

    // Configuration
    pub config: Config,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,
    prey_births: usize,
    predator_births: usize,
    prey_deaths: usize,
    predator_deaths: usize,

    // Random number generator (seeded for reproducibility)
    rng: SimRng,
}

impl Field {
    /// Create a new field with the given configuration and an entropy seed.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let seed = rand::thread_rng().gen();
        Self::with_seed(config, seed)
    }

    /// Create a new field with a specific seed for reproducibility.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = SimRng::seeded(seed);
        let size = config.field.size;
        let edge = size as u16;
        let bounds = Bounds::new(edge, config.field.wrap);

        let mut prey = Vec::with_capacity(config.population.initial_prey);
        let mut prey_trace = OccupancyGrid::new(size);
        for _ in 0..config.population.initial_prey {
            let agent = Prey::spawn(&mut rng, edge);
            prey_trace.mark(agent.x, agent.y);
            prey.push(agent);
        }

        let mut predators = Vec::with_capacity(config.population.initial_predators);
        let mut predator_trace = OccupancyGrid::new(size);
        for _ in 0..config.population.initial_predators {
            let agent = Predator::spawn(&mut rng, edge, config.population.starvation_threshold);
            predator_trace.mark(agent.x, agent.y);
            predators.push(agent);
        }

        info!(
            "field initialized: {}x{} ({}), {} prey, {} predators, seed {}",
            size,
            size,
            if config.field.wrap { "wrap" } else { "clamp" },
            prey.len(),
            predators.len(),
            seed,
        );

        let stats_history = StatsHistory::new(config.logging.stats_interval);

        Ok(Self {
            prey,
            predators,
            vegetation: VegetationGrid::new(size),
            prey_trace,
            predator_trace,
            prey_index: SpatialIndex::new(size),
            time: 0,
            bounds,
            config,
            stats: Stats::new(),
            stats_history,
            prey_births: 0,
            predator_births: 0,
            prey_deaths: 0,
            predator_deaths: 0,
            rng,
        })
    }

    /// Advance the simulation by one generation.
    ///
    /// The five phases run in strict order, each completing for the whole
    /// population before the next begins: move, eat, survive, reproduce,
    /// grow. Total for every reachable state, including empty populations.
    pub fn generation(&mut self) {
        self.prey_births = 0;
        self.predator_births = 0;
        self.prey_deaths = 0;
        self.predator_deaths = 0;

        self.move_all();
        self.eat_all();
        self.survive();
        self.reproduce();
        self.grow();

        self.time += 1;
        self.update_stats();
    }

    /// Phase 1: every prey moves, then every predator moves. Occupancy
    /// traces follow each mover; the prey index is rebuilt afterwards so
    /// feeding sees post-move positions only.
    fn move_all(&mut self) {
        let trace = &mut self.prey_trace;
        for agent in &mut self.prey {
            trace.clear(agent.x, agent.y);
            agent.step(&mut self.rng, &self.bounds);
            trace.mark(agent.x, agent.y);
        }

        let trace = &mut self.predator_trace;
        for agent in &mut self.predators {
            trace.clear(agent.x, agent.y);
            agent.step(&mut self.rng, &self.bounds);
            trace.mark(agent.x, agent.y);
        }

        self.prey_index.clear();
        for (idx, agent) in self.prey.iter().enumerate() {
            self.prey_index.insert(agent.x, agent.y, idx);
        }
    }

    /// Phase 2: every prey grazes its post-move cell (clearing it, no-op if
    /// bare), then every predator consumes all prey sharing its cell.
    fn eat_all(&mut self) {
        for agent in &mut self.prey {
            let amount = self.vegetation.consume(agent.x, agent.y);
            agent.eat(amount);
        }

        for agent in &mut self.predators {
            agent.eat(&mut self.prey, &self.prey_index);
        }
    }

    /// Phase 3: drop consumed prey, then foodless prey, then predators past
    /// their starvation threshold. Each removal rule is its own partition
    /// pass over the rebuilt collection.
    fn survive(&mut self) {
        let before = self.prey.len();

        let trace = &mut self.prey_trace;
        self.prey.retain(|agent| {
            if agent.dead {
                trace.clear(agent.x, agent.y);
                false
            } else {
                true
            }
        });
        self.prey.retain(|agent| {
            if agent.starved() {
                trace.clear(agent.x, agent.y);
                false
            } else {
                true
            }
        });
        self.prey_deaths = before - self.prey.len();

        let before = self.predators.len();
        let trace = &mut self.predator_trace;
        self.predators.retain_mut(|agent| {
            if agent.starve() {
                trace.clear(agent.x, agent.y);
                false
            } else {
                true
            }
        });
        self.predator_deaths = before - self.predators.len();
    }

    /// Phase 4: fed prey each bear a litter of 1..=offspring_max; fed
    /// predators bear exactly one. Offspring join the population after the
    /// phase, so they take no part in this generation. Predator feeding
    /// signals are cleared here, once starvation and reproduction have
    /// both read them.
    fn reproduce(&mut self) {
        let offspring_max = self.config.population.offspring_max;

        let mut litter = Vec::new();
        for agent in &mut self.prey {
            if agent.eaten > 0 {
                for _ in 0..self.rng.litter_size(offspring_max) {
                    litter.push(agent.reproduce());
                }
            }
        }
        self.prey_births = litter.len();
        self.prey.extend(litter);

        let mut cubs = Vec::new();
        for agent in &self.predators {
            if agent.eaten > 0 {
                cubs.push(agent.reproduce());
            }
        }
        self.predator_births = cubs.len();
        self.predators.extend(cubs);

        for agent in &mut self.predators {
            agent.reset_feeding();
        }
    }

    /// Phase 5: one independent Bernoulli(grass_rate) draw per cell; growth
    /// never removes vegetation, so a cell grazed this generation becomes
    /// eligible again only on the next one.
    fn grow(&mut self) {
        let sites = self
            .rng
            .growth_sites(self.vegetation.size() * self.vegetation.size(), self.config.field.grass_rate);
        self.vegetation.grow(&sites);
    }

    fn update_stats(&mut self) {
        self.stats = Stats {
            time: self.time,
            prey: self.prey.len(),
            predators: self.predators.len(),
            vegetation: self.vegetation.covered(),
            prey_births: self.prey_births,
            predator_births: self.predator_births,
            prey_deaths: self.prey_deaths,
            predator_deaths: self.predator_deaths,
        };

        if self.time % self.config.logging.stats_interval == 0 {
            debug!("{}", self.stats.summary());
            self.stats_history.record(self.stats.clone());
        }
    }

    /// Run the simulation for the given number of generations.
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.generation();
        }
    }

    /// Run with a callback invoked after every generation.
    pub fn run_with_callback<F>(&mut self, generations: u64, mut callback: F)
    where
        F: FnMut(&Field, u64),
    {
        for i in 0..generations {
            self.generation();
            callback(self, i);
        }
    }

    /// Live prey count.
    pub fn prey_count(&self) -> usize {
        self.prey.len()
    }

    /// Live predator count.
    pub fn predator_count(&self) -> usize {
        self.predators.len()
    }

    /// Whether both populations have died out.
    pub fn is_extinct(&self) -> bool {
        self.prey.is_empty() && self.predators.is_empty()
    }

    /// Seed this field was built from.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Composite per-cell display codes, row-major. Overlap precedence:
    /// predator > prey > vegetation > unoccupied. Read-only over the three
    /// underlying grids, so the rows compose in parallel.
    pub fn cell_codes(&self) -> Vec<CellCode> {
        let vegetation = self.vegetation.cells();
        let prey = self.prey_trace.cells();
        let predators = self.predator_trace.cells();

        vegetation
            .par_iter()
            .zip(prey.par_iter())
            .zip(predators.par_iter())
            .map(|((&grass, &prey_here), &predator_here)| {
                if predator_here {
                    CellCode::Predator
                } else if prey_here {
                    CellCode::Prey
                } else if grass {
                    CellCode::Vegetation
                } else {
                    CellCode::Unoccupied
                }
            })
            .collect()
    }

    /// ASCII frame of the composite codes, one row per line.
    pub fn render(&self) -> String {
        let size = self.vegetation.size();
        let codes = self.cell_codes();
        let mut out = String::with_capacity(size * (size + 1));
        for row in codes.chunks(size) {
            for code in row {
                out.push(match code {
                    CellCode::Unoccupied => '.',
                    CellCode::Vegetation => '"',
                    CellCode::Prey => 'r',
                    CellCode::Predator => 'F',
                });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.field.size = 20;
        config.population.initial_prey = 15;
        config.population.initial_predators = 5;
        config
    }

    #[test]
    fn test_field_creation() {
        let config = test_config();
        let field = Field::with_seed(config.clone(), 1).unwrap();

        assert_eq!(field.prey_count(), config.population.initial_prey);
        assert_eq!(field.predator_count(), config.population.initial_predators);
        assert_eq!(field.time, 0);
        // The field starts fully vegetated.
        assert_eq!(field.vegetation.covered(), 20 * 20);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = test_config();
        config.field.grass_rate = 2.0;
        assert!(Field::with_seed(config, 1).is_err());

        let mut config = test_config();
        config.population.starvation_threshold = 0;
        assert!(Field::new(config).is_err());
    }

    #[test]
    fn test_generation_advances_time() {
        let mut field = Field::with_seed(test_config(), 2).unwrap();
        field.generation();
        assert_eq!(field.time, 1);
        field.run(9);
        assert_eq!(field.time, 10);
    }

    #[test]
    fn test_generation_total_for_empty_populations() {
        let mut config = test_config();
        config.population.initial_prey = 0;
        config.population.initial_predators = 0;

        let mut field = Field::with_seed(config, 3).unwrap();
        field.run(50);

        assert_eq!(field.prey_count(), 0);
        assert_eq!(field.predator_count(), 0);
        assert!(field.is_extinct());
        assert_eq!(field.time, 50);
    }

    #[test]
    fn test_agents_stay_in_bounds() {
        for &wrap in &[true, false] {
            let mut config = test_config();
            config.field.wrap = wrap;
            let mut field = Field::with_seed(config, 4).unwrap();

            field.run(30);

            for agent in &field.prey {
                assert!(agent.x < 20 && agent.y < 20);
            }
            for agent in &field.predators {
                assert!(agent.x < 20 && agent.y < 20);
            }
        }
    }

    #[test]
    fn test_predator_feeding_signal_cleared_each_generation() {
        let mut field = Field::with_seed(test_config(), 5).unwrap();
        field.generation();
        for agent in &field.predators {
            assert_eq!(agent.eaten, 0);
        }
    }

    #[test]
    fn test_cell_codes_precedence() {
        let mut config = test_config();
        config.population.initial_prey = 0;
        config.population.initial_predators = 0;
        let field = Field::with_seed(config, 6).unwrap();

        // Nothing but vegetation on a fresh, empty field.
        let codes = field.cell_codes();
        assert_eq!(codes.len(), 20 * 20);
        assert!(codes.iter().all(|&c| c == CellCode::Vegetation));
    }

    #[test]
    fn test_render_dimensions() {
        let mut config = test_config();
        config.field.size = 8;
        let field = Field::with_seed(config, 7).unwrap();

        let frame = field.render();
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|l| l.chars().count() == 8));
    }

    #[test]
    fn test_run_with_callback() {
        let mut field = Field::with_seed(test_config(), 8).unwrap();
        let mut seen = 0u64;
        field.run_with_callback(5, |f, i| {
            assert_eq!(f.time, i + 1);
            seen += 1;
        });
        assert_eq!(seen, 5);
    }
}
