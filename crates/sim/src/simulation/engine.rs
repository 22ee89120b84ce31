//! Simulation engine for batches of populations.
//!
//! Each population evolves on its own `Xoshiro256PlusPlus` stream seeded
//! from a master RNG, so a batch can be advanced in parallel with rayon and
//! still give the same result for any thread count.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use tracing::{info, info_span};

use crate::errors::{ConfigError, RegistryError, SimulationError};

use super::{validate_schedule, Configuration, EvolveParams, GenerationStepper, Population};

/// Cooperative cancellation flag, checked between generations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed { generations: usize },
    /// Stopped at a generation boundary after `generations` generations.
    Interrupted { generations: usize },
}

impl RunStatus {
    pub fn generations(&self) -> usize {
        match *self {
            Self::Completed { generations } | Self::Interrupted { generations } => generations,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Evolve every population through the census schedule `nvector`.
///
/// One seed per population is drawn from `rng` in population order; the
/// populations then run in parallel on independent streams. `nvector[t]`
/// is the number of diploids born in generation `t`.
pub fn evolve_qtraits<R: Rng + ?Sized>(
    rng: &mut R,
    populations: &mut [Population],
    nvector: &[u32],
    params: &EvolveParams,
    cancel: Option<&CancelToken>,
) -> Result<RunStatus, SimulationError> {
    validate_schedule(nvector)?;
    params.validate()?;
    info!(
        populations = populations.len(),
        generations = nvector.len(),
        "evolving batch"
    );

    let seeds: Vec<u64> = populations.iter().map(|_| rng.random()).collect();
    let statuses = populations
        .par_iter_mut()
        .zip(seeds.par_iter())
        .map(|(pop, &seed)| {
            let mut local = Xoshiro256PlusPlus::seed_from_u64(seed);
            evolve_population(pop, nvector, params, &mut local, cancel)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(statuses
        .into_iter()
        .filter(|s| !s.is_completed())
        .min_by_key(RunStatus::generations)
        .unwrap_or(RunStatus::Completed {
            generations: nvector.len(),
        }))
}

fn evolve_population<R: Rng + ?Sized>(
    pop: &mut Population,
    nvector: &[u32],
    params: &EvolveParams,
    rng: &mut R,
    cancel: Option<&CancelToken>,
) -> Result<RunStatus, SimulationError> {
    let span = info_span!("population", id = pop.id());
    let _guard = span.enter();
    let stepper = GenerationStepper::new(params);
    if params.track {
        pop.enable_tracking();
    }

    for (t, &n) in nvector.iter().enumerate() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            info!(generations = t, "run interrupted");
            return Ok(RunStatus::Interrupted { generations: t });
        }
        stepper
            .advance(pop, n, rng)
            .map_err(|source| population_error(pop, source))?;
    }
    stepper.update_phenotypes(pop, rng);
    Ok(RunStatus::Completed {
        generations: nvector.len(),
    })
}

fn population_error(pop: &Population, source: RegistryError) -> SimulationError {
    SimulationError::Population {
        id: pop.id().to_string(),
        generation: pop.generation(),
        source,
    }
}

/// Main simulation engine: a batch of populations stepped together.
#[derive(Debug)]
pub struct Simulation {
    populations: Vec<Population>,
    rngs: Vec<Xoshiro256PlusPlus>,
    params: EvolveParams,
    schedule: Vec<u32>,
    /// Generations of `schedule` already run.
    cursor: usize,
}

impl Simulation {
    /// Build `num_populations` monomorphic populations of the schedule's
    /// first census size.
    pub fn from_config(config: &Configuration) -> Result<Self, ConfigError> {
        config.validate()?;
        let schedule = config.execution.schedule.sizes()?;
        let params = EvolveParams::from_config(&config.evolution, &config.tracking)?;
        let populations = (0..config.execution.num_populations)
            .map(|i| Population::new(format!("pop{i}"), schedule[0]))
            .collect();
        Self::new(populations, params, schedule, config.execution.seed)
    }

    pub fn new(
        mut populations: Vec<Population>,
        params: EvolveParams,
        schedule: Vec<u32>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if populations.is_empty() {
            return Err(ConfigError::NoPopulations);
        }
        validate_schedule(&schedule)?;
        params.validate()?;

        let mut master = match seed {
            Some(s) => Xoshiro256PlusPlus::seed_from_u64(s),
            None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
        };
        let rngs = populations
            .iter()
            .map(|_| Xoshiro256PlusPlus::seed_from_u64(master.random()))
            .collect();
        if params.track {
            populations.iter_mut().for_each(Population::enable_tracking);
        }

        Ok(Self {
            populations,
            rngs,
            params,
            schedule,
            cursor: 0,
        })
    }

    pub fn populations(&self) -> &[Population] {
        &self.populations
    }

    pub fn population(&self, index: usize) -> Option<&Population> {
        self.populations.get(index)
    }

    pub fn params(&self) -> &EvolveParams {
        &self.params
    }

    /// Change the optimum for the remaining generations.
    pub fn set_optimum(&mut self, optimum: f64) -> Result<(), ConfigError> {
        if !optimum.is_finite() {
            return Err(ConfigError::InvalidOptimum(optimum));
        }
        self.params.optimum = optimum;
        Ok(())
    }

    pub fn schedule(&self) -> &[u32] {
        &self.schedule
    }

    /// Generations run so far.
    pub fn generation(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.schedule.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.schedule.len()
    }

    /// Advance every population by one generation.
    ///
    /// Returns `false` without doing anything once the schedule is spent.
    /// Phenotypes are refreshed after the final generation.
    pub fn step(&mut self) -> Result<bool, SimulationError> {
        let Some(&n) = self.schedule.get(self.cursor) else {
            return Ok(false);
        };
        let stepper = GenerationStepper::new(&self.params);
        let last = self.cursor + 1 == self.schedule.len();

        self.populations
            .par_iter_mut()
            .zip(self.rngs.par_iter_mut())
            .try_for_each(|(pop, rng)| -> Result<(), SimulationError> {
                stepper
                    .advance(pop, n, rng)
                    .map_err(|source| population_error(pop, source))?;
                if last {
                    stepper.update_phenotypes(pop, rng);
                }
                Ok(())
            })?;

        self.cursor += 1;
        Ok(true)
    }

    /// Run the rest of the schedule, stopping early if `cancel` is set.
    pub fn run(&mut self, cancel: Option<&CancelToken>) -> Result<RunStatus, SimulationError> {
        info!(
            populations = self.populations.len(),
            generations = self.remaining(),
            "running simulation"
        );
        while !self.is_finished() {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                info!(generation = self.cursor, "run interrupted");
                return Ok(RunStatus::Interrupted {
                    generations: self.cursor,
                });
            }
            self.step()?;
        }
        info!(generation = self.cursor, "run finished");
        Ok(RunStatus::Completed {
            generations: self.cursor,
        })
    }

    /// Run at most `generations` more generations.
    pub fn run_for(&mut self, generations: usize) -> Result<(), SimulationError> {
        for _ in 0..generations {
            if !self.step()? {
                break;
            }
        }
        Ok(())
    }

    pub fn into_populations(self) -> Vec<Population> {
        self.populations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::{MutationModel, Region};
    use crate::simulation::SimulationBuilder;

    fn create_test_simulation() -> Simulation {
        SimulationBuilder::new()
            .population_size(50)
            .generations(5)
            .populations(3)
            .mutation_rates(0.01, 0.005)
            .recombination_rate(0.5)
            .seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn test_simulation_new() {
        let sim = create_test_simulation();
        assert_eq!(sim.populations().len(), 3);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.remaining(), 5);
        assert!(sim.populations().iter().all(|p| p.size() == 50));
    }

    #[test]
    fn test_simulation_step() {
        let mut sim = create_test_simulation();
        assert!(sim.step().unwrap());
        assert_eq!(sim.generation(), 1);
        assert!(sim.populations().iter().all(|p| p.generation() == 1));
    }

    #[test]
    fn test_simulation_run_for_stops_at_schedule_end() {
        let mut sim = create_test_simulation();
        sim.run_for(3).unwrap();
        assert_eq!(sim.generation(), 3);
        sim.run_for(10).unwrap();
        assert_eq!(sim.generation(), 5);
        assert!(!sim.step().unwrap());
    }

    #[test]
    fn test_simulation_run() {
        let mut sim = create_test_simulation();
        let status = sim.run(None).unwrap();
        assert_eq!(status, RunStatus::Completed { generations: 5 });
        for pop in sim.populations() {
            pop.validate().unwrap();
        }
    }

    #[test]
    fn test_cancelled_run_stops_at_boundary() {
        let mut sim = create_test_simulation();
        let token = CancelToken::new();
        sim.step().unwrap();
        token.cancel();
        let status = sim.run(Some(&token)).unwrap();
        assert_eq!(status, RunStatus::Interrupted { generations: 1 });
        assert!(sim.populations().iter().all(|p| p.generation() == 1));
    }

    #[test]
    fn test_populations_use_independent_streams() {
        let mut sim = create_test_simulation();
        sim.run(None).unwrap();
        let counts: Vec<usize> = sim.populations().iter().map(|p| p.registry().len()).collect();
        let positions: Vec<Vec<f64>> = sim
            .populations()
            .iter()
            .map(|p| p.mutations().iter().map(|m| m.position).collect())
            .collect();
        assert_eq!(counts.len(), 3);
        assert_ne!(positions[0], positions[1]);
    }

    #[test]
    fn test_evolve_qtraits_is_reproducible() {
        let mut params = EvolveParams::neutral();
        params.mutation = MutationModel::new(0.05, 0.0, vec![Region::new(0.0, 1.0, 1.0)], vec![]).unwrap();
        let run = |seed: u64| {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let mut pops = vec![Population::new("a", 20), Population::new("b", 20)];
            evolve_qtraits(&mut rng, &mut pops, &[20; 10], &params, None).unwrap();
            pops.iter()
                .map(|pop| pop.mutations().iter().map(|m| m.position).collect::<Vec<_>>())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(1), run(1));
        assert_ne!(run(1), run(2));
    }

    #[test]
    fn test_evolve_qtraits_rejects_empty_schedule() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut pops = vec![Population::new("a", 5)];
        let err = evolve_qtraits(&mut rng, &mut pops, &[], &EvolveParams::neutral(), None).unwrap_err();
        assert_eq!(err, SimulationError::Config(ConfigError::EmptySchedule));
        assert_eq!(pops[0].generation(), 0);
    }

    #[test]
    fn test_evolve_qtraits_respects_cancellation() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut pops = vec![Population::new("a", 5)];
        let token = CancelToken::new();
        token.cancel();
        let status = evolve_qtraits(&mut rng, &mut pops, &[5; 4], &EvolveParams::neutral(), Some(&token)).unwrap();
        assert_eq!(status, RunStatus::Interrupted { generations: 0 });
        assert_eq!(pops[0].generation(), 0);
    }

    #[test]
    fn test_evolve_qtraits_follows_nvector() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut pops = vec![Population::new("a", 5)];
        evolve_qtraits(&mut rng, &mut pops, &[5, 10, 40], &EvolveParams::neutral(), None).unwrap();
        assert_eq!(pops[0].size(), 40);
        assert_eq!(pops[0].generation(), 3);
    }
}
