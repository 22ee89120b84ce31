//! One Wright-Fisher generation with mutation, recombination, selfing and
//! Gaussian stabilizing selection on an additive trait.
//!
//! The phases run in a fixed order:
//!
//! 1. **Mutation**: Poisson numbers of neutral and selected mutations with
//!    means `mu * 2N` are placed on uniformly drawn gamete slots.
//! 2. **Trait and fitness**: every parent gets `G` from its selected
//!    mutations, `E ~ N(0, sigma_e)`, and a stabilizing fitness around the
//!    optimum.
//! 3. **Reproduction**: `N'` offspring, each from two fitness-weighted
//!    parents (or one, when selfing), with one meiosis per parent.
//! 4. **Bookkeeping**: counts are recomputed for the offspring and the
//!    registry is reconciled against `2N'`; retired mutations are purged
//!    from the gametes.
//! 5. **Tracking**: segregating selected mutations append their frequency
//!    to their trajectory when tracking is on.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::errors::RegistryError;
use crate::evolution::{recombine, PhenotypeFitness};
use crate::genome::{Diploid, GameteArena, GameteId, GameteTransfer};
use crate::registry::ReconcileSummary;

use super::{EvolveParams, Population};

/// Advances single populations by one generation under fixed parameters.
#[derive(Debug, Clone, Copy)]
pub struct GenerationStepper<'a> {
    params: &'a EvolveParams,
}

impl<'a> GenerationStepper<'a> {
    pub fn new(params: &'a EvolveParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &'a EvolveParams {
        self.params
    }

    /// Run one generation, leaving `next_size` diploids.
    ///
    /// # Errors
    /// Any registry precondition failure. The population must not be
    /// advanced again after an error.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        pop: &mut Population,
        next_size: u32,
        rng: &mut R,
    ) -> Result<ReconcileSummary, RegistryError> {
        if pop.is_empty() {
            return Err(RegistryError::Inconsistent(format!(
                "population '{}' has no individuals to reproduce",
                pop.id()
            )));
        }

        self.mutate(pop, rng)?;
        self.update_phenotypes(pop, rng);
        let (diploids, gametes) = self.reproduce(pop, next_size, rng);

        pop.diploids = diploids;
        pop.gametes = gametes;
        pop.increment_generation();
        pop.recount();

        let two_n = pop.two_n();
        let summary = pop.registry.reconcile(two_n, pop.generation)?;
        if summary.needs_purge() {
            let counts = pop.registry.counts();
            pop.gametes = pop.gametes.compact(&mut pop.diploids, |m| counts[m as usize] > 0);
        }

        if self.params.track {
            record_trajectories(pop);
        }
        Ok(summary)
    }

    fn mutate<R: Rng + ?Sized>(&self, pop: &mut Population, rng: &mut R) -> Result<(), RegistryError> {
        let model = &self.params.mutation;
        let two_n = pop.two_n();
        let generation = pop.generation();

        for _ in 0..model.neutral_count(two_n, rng) {
            if let Some(mutation) = model.draw_neutral(generation, rng) {
                pop.add_mutation(mutation, rng)?;
            }
        }
        for _ in 0..model.selected_count(two_n, rng) {
            if let Some(mutation) = model.draw_selected(generation, rng) {
                pop.add_mutation(mutation, rng)?;
            }
        }
        Ok(())
    }

    /// Compute `G`, draw `E` and evaluate fitness for every individual.
    pub fn update_phenotypes<R: Rng + ?Sized>(&self, pop: &mut Population, rng: &mut R) {
        let params = self.params;
        let noise = if params.sigma_e > 0.0 {
            Normal::new(0.0, params.sigma_e).ok()
        } else {
            None
        };
        let mutations = pop.registry.mutations();

        for diploid in pop.diploids.iter_mut() {
            let first = pop.gametes.get(diploid.first);
            let second = pop.gametes.get(diploid.second);
            diploid.genetic_value = params.trait_model.genetic_value(first, second, mutations);
            diploid.environmental = noise.as_ref().map_or(0.0, |n| n.sample(rng));
            diploid.fitness = params
                .selection
                .fitness(diploid.phenotype(), params.optimum)
                .get();
        }
    }

    fn reproduce<R: Rng + ?Sized>(
        &self,
        pop: &Population,
        next_size: u32,
        rng: &mut R,
    ) -> (Vec<Diploid>, GameteArena) {
        let fitness: Vec<f64> = pop.diploids.iter().map(|d| d.fitness).collect();
        let pairs = pop.select_parents(rng, &fitness, next_size as usize, self.params.selfing_rate);

        let mut next = GameteArena::with_capacity(pop.gametes.len());
        let mut transfer = GameteTransfer::new(&pop.gametes);
        let offspring = pairs
            .into_iter()
            .map(|(p1, p2)| {
                let first = self.meiosis(pop, &pop.diploids[p1], &mut transfer, &mut next, rng);
                let second = self.meiosis(pop, &pop.diploids[p2], &mut transfer, &mut next, rng);
                Diploid::new(first, second)
            })
            .collect();
        (offspring, next)
    }

    /// One gamete transmitted by `parent`: either parental gamete with
    /// probability 1/2, crossed over at the drawn breakpoints.
    fn meiosis<R: Rng + ?Sized>(
        &self,
        pop: &Population,
        parent: &Diploid,
        transfer: &mut GameteTransfer<'_>,
        next: &mut GameteArena,
        rng: &mut R,
    ) -> GameteId {
        let (start, other) = if rng.random::<f64>() < 0.5 {
            (parent.first, parent.second)
        } else {
            (parent.second, parent.first)
        };

        let breakpoints = self.params.recombination.breakpoints(rng);
        if breakpoints.is_empty() || start == other {
            return transfer.share(start, next);
        }

        let source = transfer.source();
        let child = recombine(
            source.get(start),
            source.get(other),
            &breakpoints,
            pop.registry.mutations(),
        );
        next.alloc(child)
    }
}

fn record_trajectories(pop: &mut Population) {
    let two_n = pop.two_n();
    let generation = pop.generation;
    let Some(recorder) = pop.trajectories.as_mut() else {
        return;
    };
    let mutations = pop.registry.mutations();
    for (i, &count) in pop.registry.counts().iter().enumerate() {
        if count > 0 && count < two_n && !mutations[i].neutral {
            recorder.record(generation, &mutations[i], count as f64 / two_n as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Mutation, PositionLookup};
    use crate::evolution::{EffectSizeModel, MutationModel, RecombinationModel, Region, SelectedRegion};
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn params(mu_neutral: f64, mu_selected: f64, littler: f64) -> EvolveParams {
        let mut params = EvolveParams::neutral();
        params.mutation = MutationModel::new(
            mu_neutral,
            mu_selected,
            vec![Region::new(0.0, 1.0, 1.0)],
            vec![SelectedRegion::new(0.0, 1.0, 1.0, EffectSizeModel::Gaussian { sd: 0.1 })],
        )
        .unwrap();
        params.recombination = RecombinationModel::new(littler, vec![Region::new(0.0, 1.0, 1.0)]).unwrap();
        params
    }

    #[test]
    fn test_advance_increments_generation_and_resizes() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let params = params(0.01, 0.0, 0.0);
        let stepper = GenerationStepper::new(&params);
        let mut pop = Population::new("pop", 20);

        stepper.advance(&mut pop, 30, &mut rng).unwrap();

        assert_eq!(pop.generation(), 1);
        assert_eq!(pop.size(), 30);
        assert!(pop.validate().is_ok());
    }

    #[test]
    fn test_invariants_hold_over_many_generations() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let params = params(0.05, 0.02, 1.0);
        let stepper = GenerationStepper::new(&params);
        let mut pop = Population::new("pop", 25);

        for _ in 0..200 {
            stepper.advance(&mut pop, 25, &mut rng).unwrap();
            pop.validate().unwrap();
        }
        assert!(!pop.fixations().is_empty());
    }

    #[test]
    fn test_fixed_neutral_mutation_is_retired_and_purged() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let params = EvolveParams::neutral();
        let stepper = GenerationStepper::new(&params);
        let mut pop = Population::new("pop", 3);

        // Put the same neutral mutation on every gamete.
        let index = pop.registry.insert(Mutation::neutral(0.5, 0)).unwrap();
        let carrier = pop
            .gametes
            .alloc(pop.gametes.get(0).with_mutation(index, pop.registry.mutations()));
        for diploid in pop.diploids.iter_mut() {
            *diploid = Diploid::new(carrier, carrier);
        }

        let summary = stepper.advance(&mut pop, 3, &mut rng).unwrap();

        assert_eq!(summary.fixed_neutral, 1);
        assert_eq!(pop.counts()[index as usize], 0);
        assert_eq!(pop.fixations().times(), &[1]);
        assert!(!pop.registry().lookup().contains(0.5));
        assert!((0..6).all(|slot| !pop.gamete_at(slot).contains(index)));
        assert!(pop.validate().is_ok());
    }

    #[test]
    fn test_fixed_selected_mutation_stays_and_is_recorded_once() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let params = EvolveParams::neutral();
        let stepper = GenerationStepper::new(&params);
        let mut pop = Population::new("pop", 3);

        let index = pop.registry.insert(Mutation::selected(0.5, 0, 0.1, 0.1)).unwrap();
        let carrier = pop
            .gametes
            .alloc(pop.gametes.get(0).with_mutation(index, pop.registry.mutations()));
        for diploid in pop.diploids.iter_mut() {
            *diploid = Diploid::new(carrier, carrier);
        }

        for _ in 0..3 {
            stepper.advance(&mut pop, 3, &mut rng).unwrap();
        }
        stepper.update_phenotypes(&mut pop, &mut rng);

        assert_eq!(pop.counts()[index as usize], 6);
        assert_eq!(pop.fixations().len(), 1);
        assert_eq!(pop.fixations().times(), &[1]);
        assert!(pop.diploids().iter().all(|d| (d.genetic_value - 0.2).abs() < 1e-12));
    }

    #[test]
    fn test_zero_noise_phenotype_equals_genetic_value() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let mut params = params(0.0, 0.5, 0.0);
        params.sigma_e = 0.0;
        let stepper = GenerationStepper::new(&params);
        let mut pop = Population::new("pop", 10);

        for _ in 0..5 {
            stepper.advance(&mut pop, 10, &mut rng).unwrap();
        }
        stepper.update_phenotypes(&mut pop, &mut rng);

        for d in pop.diploids() {
            assert_eq!(d.environmental, 0.0);
            assert_eq!(d.phenotype(), d.genetic_value);
            let expected = (-(d.genetic_value * d.genetic_value) / 2.0).exp();
            assert!((d.fitness - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tracking_records_selected_only() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        let mut params = params(0.05, 0.05, 0.5);
        params.track = true;
        let stepper = GenerationStepper::new(&params);
        let mut pop = Population::new("pop", 20).with_tracking();

        for _ in 0..30 {
            stepper.advance(&mut pop, 20, &mut rng).unwrap();
        }

        let recorder = pop.trajectories().unwrap();
        assert!(!recorder.is_empty());
        for record in recorder.records() {
            assert!(record.frequencies.iter().all(|&f| f > 0.0 && f < 1.0));
            assert!(record.start_generation > record.origin_generation);
        }
    }

    #[test]
    fn test_distant_optimum_still_advances() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let params = params(0.01, 0.05, 0.5).with_optimum(40.2);
        let stepper = GenerationStepper::new(&params);
        let mut pop = Population::new("pop", 50);

        for _ in 0..20 {
            stepper.advance(&mut pop, 50, &mut rng).unwrap();
        }

        assert_eq!(pop.generation(), 20);
        assert!(pop.validate().is_ok());
    }

    #[test]
    fn test_empty_population_is_rejected() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let params = EvolveParams::neutral();
        let mut pop = Population::new("pop", 0);
        assert!(GenerationStepper::new(&params).advance(&mut pop, 5, &mut rng).is_err());
    }
}
