//! Population state and its bookkeeping.
//!
//! A population owns its diploids, the gamete arena they point into, the
//! mutation registry and, optionally, a trajectory recorder. Counts in the
//! registry always describe the current generation's gametes once a
//! generation step has finished.

use std::sync::Arc;

use rand::Rng;
use tracing::warn;

use crate::base::{Mutation, MutationIndex, PositionLookup};
use crate::errors::RegistryError;
use crate::genome::{Diploid, Gamete, GameteArena};
use crate::registry::{FixationRecord, MutationRegistry};

use super::TrajectoryRecorder;

#[derive(Debug, Clone)]
pub struct Population {
    id: Arc<str>,
    pub(crate) generation: u32,
    pub(crate) diploids: Vec<Diploid>,
    pub(crate) gametes: GameteArena,
    pub(crate) registry: MutationRegistry,
    pub(crate) trajectories: Option<TrajectoryRecorder>,
}

impl Population {
    /// `size` monomorphic diploids sharing a single empty gamete.
    pub fn new(id: impl Into<Arc<str>>, size: u32) -> Self {
        let mut gametes = GameteArena::new();
        let empty = gametes.alloc(Gamete::default());
        Self {
            id: id.into(),
            generation: 0,
            diploids: vec![Diploid::new(empty, empty); size as usize],
            gametes,
            registry: MutationRegistry::new(),
            trajectories: None,
        }
    }

    /// Start recording trajectories of selected mutations.
    pub fn with_tracking(mut self) -> Self {
        self.enable_tracking();
        self
    }

    pub fn enable_tracking(&mut self) {
        if self.trajectories.is_none() {
            self.trajectories = Some(TrajectoryRecorder::new());
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of diploids `N`.
    pub fn size(&self) -> usize {
        self.diploids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diploids.is_empty()
    }

    /// Number of gametes `2N`.
    pub fn two_n(&self) -> u32 {
        2 * self.diploids.len() as u32
    }

    pub fn diploids(&self) -> &[Diploid] {
        &self.diploids
    }

    pub fn gamete_arena(&self) -> &GameteArena {
        &self.gametes
    }

    /// The two gametes of a diploid.
    pub fn gametes_of(&self, diploid: &Diploid) -> (&Gamete, &Gamete) {
        (self.gametes.get(diploid.first), self.gametes.get(diploid.second))
    }

    /// Gamete in slot `slot` of the `2N` gamete slots (diploid `slot / 2`).
    pub fn gamete_at(&self, slot: usize) -> &Gamete {
        let diploid = &self.diploids[slot / 2];
        self.gametes.get(diploid.gamete(slot % 2))
    }

    pub fn registry(&self) -> &MutationRegistry {
        &self.registry
    }

    pub fn mutations(&self) -> &[Mutation] {
        self.registry.mutations()
    }

    pub fn counts(&self) -> &[u32] {
        self.registry.counts()
    }

    pub fn fixations(&self) -> &FixationRecord {
        self.registry.fixations()
    }

    pub fn trajectories(&self) -> Option<&TrajectoryRecorder> {
        self.trajectories.as_ref()
    }

    /// Indices of mutations with `0 < count < 2N`.
    pub fn segregating(&self) -> impl Iterator<Item = MutationIndex> + '_ {
        self.registry.segregating(self.two_n())
    }

    pub fn increment_generation(&mut self) {
        self.generation += 1;
    }

    /// Store `mutation` and put it on one gamete slot drawn uniformly from
    /// the `2N` slots. The carrying gamete is copied, never edited in place.
    pub fn add_mutation<R: Rng + ?Sized>(
        &mut self,
        mutation: Mutation,
        rng: &mut R,
    ) -> Result<MutationIndex, RegistryError> {
        if self.diploids.is_empty() {
            return Err(RegistryError::Inconsistent(
                "cannot place a mutation in an empty population".into(),
            ));
        }
        let index = self.registry.insert(mutation)?;
        let slot = rng.random_range(0..self.two_n() as usize);
        let diploid = &mut self.diploids[slot / 2];
        let edited = self
            .gametes
            .get(diploid.gamete(slot % 2))
            .with_mutation(index, self.registry.mutations());
        diploid.set_gamete(slot % 2, self.gametes.alloc(edited));
        Ok(index)
    }

    /// Recompute every count from the gametes of the current diploids.
    pub(crate) fn recount(&mut self) {
        self.registry.clear_counts();
        let copies = self.gametes.multiplicities(&self.diploids);
        for (id, &n) in copies.iter().enumerate() {
            if n == 0 {
                continue;
            }
            for m in self.gametes.get(id as u32).iter() {
                self.registry.add_count(m, n);
            }
        }
    }

    /// Select `n_pairs` parent pairs, each parent drawn proportionally to
    /// `fitness`. With probability `selfing_rate` both parents are the same
    /// individual; otherwise the second parent is drawn by fitness from the
    /// remaining individuals (uniformly when none of them has positive
    /// fitness). A single-individual population always selfs.
    pub fn select_parents<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        fitness: &[f64],
        n_pairs: usize,
        selfing_rate: f64,
    ) -> Vec<(usize, usize)> {
        let size = self.size();
        let weights: Vec<f64> = fitness
            .iter()
            .map(|&w| if w.is_finite() && w > 0.0 { w } else { 0.0 })
            .collect();
        let cumulative: Vec<f64> = weights
            .iter()
            .scan(0.0, |acc, &w| {
                *acc += w;
                Some(*acc)
            })
            .collect();
        let total = cumulative.last().copied().unwrap_or(0.0);

        let uniform = !(total > 0.0 && total.is_finite());
        if uniform && size > 0 {
            warn!(population = %self.id, "all fitness values are zero; choosing parents uniformly");
        }

        // Uniform over everyone except `skip`.
        let other = |rng: &mut R, skip: usize| -> usize {
            let i = rng.random_range(0..size - 1);
            if i >= skip {
                i + 1
            } else {
                i
            }
        };

        (0..n_pairs)
            .map(|_| {
                let parent1 = if uniform {
                    rng.random_range(0..size)
                } else {
                    let r = rng.random_range(0.0..total);
                    cumulative.partition_point(|&c| c <= r).min(size - 1)
                };
                if size == 1 || rng.random::<f64>() < selfing_rate {
                    return (parent1, parent1);
                }

                let excluded = weights.get(parent1).copied().unwrap_or(0.0);
                let rest = total - excluded;
                if uniform || rest <= 0.0 {
                    return (parent1, other(rng, parent1));
                }
                // Draw over the cumulative weights with parent1's interval cut out.
                let start = cumulative[parent1] - excluded;
                let mut r = rng.random_range(0.0..rest);
                if r >= start {
                    r += excluded;
                }
                let parent2 = cumulative.partition_point(|&c| c <= r).min(size - 1);
                if parent2 == parent1 {
                    return (parent1, other(rng, parent1));
                }
                (parent1, parent2)
            })
            .collect()
    }

    /// Re-derive everything the registry claims from the gametes and check
    /// the bookkeeping invariants.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let two_n = self.two_n();
        let mutations = self.registry.mutations();
        let counts = self.registry.counts();
        if mutations.len() != counts.len() {
            return Err(RegistryError::CountTableMismatch {
                mutations: mutations.len(),
                counts: counts.len(),
            });
        }

        let mut expected = vec![0u32; counts.len()];
        for diploid in &self.diploids {
            for id in diploid.gametes() {
                let gamete = self.gametes.get(id);
                check_gamete_order(gamete.neutral(), mutations, true)?;
                check_gamete_order(gamete.selected(), mutations, false)?;
                for m in gamete.iter() {
                    expected[m as usize] += 1;
                }
            }
        }

        let mut live = 0;
        for (i, (&count, &derived)) in counts.iter().zip(expected.iter()).enumerate() {
            if count > two_n {
                return Err(RegistryError::CountExceedsPopulation { index: i, count, two_n });
            }
            if count != derived {
                return Err(RegistryError::Inconsistent(format!(
                    "mutation {i} has count {count} but {derived} gametes carry it"
                )));
            }
            if count == 0 {
                continue;
            }
            live += 1;
            let mutation = &mutations[i];
            if mutation.neutral && count == two_n && self.generation > 0 {
                return Err(RegistryError::Inconsistent(format!(
                    "fixed neutral mutation {i} was not retired"
                )));
            }
            if self.registry.lookup().get(mutation.position) != Some(i as MutationIndex) {
                return Err(RegistryError::Inconsistent(format!(
                    "live mutation {i} at {} is missing from the lookup",
                    mutation.position
                )));
            }
        }
        if self.registry.lookup().len() != live {
            return Err(RegistryError::Inconsistent(format!(
                "lookup holds {} positions for {live} live mutations",
                self.registry.lookup().len()
            )));
        }

        let fixations = self.registry.fixations();
        if fixations.mutations().len() != fixations.times().len() {
            return Err(RegistryError::Inconsistent("fixation record out of lockstep".into()));
        }
        if fixations
            .mutations()
            .windows(2)
            .any(|w| w[0].position > w[1].position)
        {
            return Err(RegistryError::Inconsistent("fixation record is not sorted".into()));
        }
        Ok(())
    }
}

fn check_gamete_order(list: &[MutationIndex], mutations: &[Mutation], neutral: bool) -> Result<(), RegistryError> {
    for &m in list {
        if mutations[m as usize].neutral != neutral {
            return Err(RegistryError::Inconsistent(format!(
                "mutation {m} is stored in the wrong gamete list"
            )));
        }
    }
    if list
        .windows(2)
        .any(|w| mutations[w[0] as usize].position >= mutations[w[1] as usize].position)
    {
        return Err(RegistryError::Inconsistent("gamete is not ordered by position".into()));
    }
    Ok(())
}
