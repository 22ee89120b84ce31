//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring and creating simulations with
//! sensible defaults and validation.

use crate::errors::ConfigError;
use crate::evolution::{EffectSizeModel, Region, SelectedRegion, TraitModel};
use crate::simulation::{
    CensusSchedule, Configuration, EvolutionConfig, ExecutionConfig, Simulation, TrackingConfig,
};

/// Builder for constructing [`Simulation`] instances with a fluent API.
///
/// Defaults: one population, every landscape is the unit interval `[0, 1)`
/// with weight one, no mutation, no recombination, `sigma_e = 1`,
/// `optimum = 0`, `vs = 1`, no selfing, additive trait, no tracking.
/// Selected mutations draw effects from `N(0, 0.1)` unless regions are set
/// with [`selected_region`](Self::selected_region).
///
/// # Examples
///
/// ```
/// use qtevo_sim::simulation::SimulationBuilder;
///
/// let mut sim = SimulationBuilder::new()
///     .population_size(100)
///     .generations(20)
///     .mutation_rates(0.001, 0.0005)
///     .recombination_rate(0.5)
///     .seed(42)
///     .build()
///     .unwrap();
/// sim.run(None).unwrap();
/// assert_eq!(sim.generation(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationBuilder {
    population_size: Option<u32>,
    generations: Option<usize>,
    schedule: Option<Vec<u32>>,
    populations: usize,
    evolution: EvolutionConfig,
    selected_regions: Vec<SelectedRegion>,
    track: bool,
    seed: Option<u64>,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self {
            population_size: None,
            generations: None,
            schedule: None,
            populations: 1,
            evolution: EvolutionConfig::default(),
            selected_regions: Vec::new(),
            track: false,
            seed: None,
        }
    }

    /// Constant census size (required unless a schedule is given).
    pub fn population_size(mut self, size: u32) -> Self {
        self.population_size = Some(size);
        self
    }

    /// Number of generations at constant size.
    pub fn generations(mut self, generations: usize) -> Self {
        self.generations = Some(generations);
        self
    }

    /// Explicit per-generation census sizes; overrides size/generations.
    pub fn schedule(mut self, sizes: Vec<u32>) -> Self {
        self.schedule = Some(sizes);
        self
    }

    pub fn populations(mut self, count: usize) -> Self {
        self.populations = count;
        self
    }

    pub fn mutation_rates(mut self, mu_neutral: f64, mu_selected: f64) -> Self {
        self.evolution.mutation.mu_neutral = mu_neutral;
        self.evolution.mutation.mu_selected = mu_selected;
        self
    }

    pub fn neutral_regions(mut self, regions: Vec<Region>) -> Self {
        self.evolution.mutation.neutral_regions = regions;
        self
    }

    /// Add a selected region with its effect-size model.
    pub fn selected_region(mut self, region: SelectedRegion) -> Self {
        self.selected_regions.push(region);
        self
    }

    pub fn recombination_rate(mut self, littler: f64) -> Self {
        self.evolution.recombination.littler = littler;
        self
    }

    pub fn recombination_regions(mut self, regions: Vec<Region>) -> Self {
        self.evolution.recombination.regions = regions;
        self
    }

    pub fn sigma_e(mut self, sigma_e: f64) -> Self {
        self.evolution.selection.sigma_e = sigma_e;
        self
    }

    pub fn optimum(mut self, optimum: f64) -> Self {
        self.evolution.selection.optimum = optimum;
        self
    }

    pub fn vs(mut self, vs: f64) -> Self {
        self.evolution.selection.vs = vs;
        self
    }

    pub fn selfing_rate(mut self, f: f64) -> Self {
        self.evolution.selection.selfing_rate = f;
        self
    }

    pub fn trait_model(mut self, model: TraitModel) -> Self {
        self.evolution.selection.trait_model = model;
        self
    }

    pub fn track(mut self, track: bool) -> Self {
        self.track = track;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Assemble and validate the configuration without building a
    /// simulation.
    pub fn configuration(&self) -> Result<Configuration, ConfigError> {
        let schedule = match (&self.schedule, self.population_size, self.generations) {
            (Some(sizes), _, _) => CensusSchedule::explicit(sizes.clone()),
            (None, Some(size), Some(generations)) => CensusSchedule::constant(size, generations),
            _ => return Err(ConfigError::EmptySchedule),
        };

        let mut evolution = self.evolution.clone();
        evolution.mutation.selected_regions = if self.selected_regions.is_empty() {
            vec![SelectedRegion::new(0.0, 1.0, 1.0, EffectSizeModel::Gaussian { sd: 0.1 })]
        } else {
            self.selected_regions.clone()
        };

        let config = Configuration {
            execution: ExecutionConfig {
                num_populations: self.populations,
                schedule,
                seed: self.seed,
            },
            evolution,
            tracking: TrackingConfig { track: self.track },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn build(self) -> Result<Simulation, ConfigError> {
        Simulation::from_config(&self.configuration()?)
    }
}
