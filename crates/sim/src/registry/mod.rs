//! Mutation registry: the arena of mutation records, their population
//! counts, the position lookup and the fixation record.
//!
//! Slots whose count drops to zero are recycled for later mutations, so an
//! index is only meaningful together with the generation it was read in.

mod fixations;
mod reconcile;

pub use fixations::FixationRecord;
pub use reconcile::{reconcile, ReconcileSummary};

use crate::base::{Mutation, MutationIndex, PositionIndex, PositionLookup};
use crate::errors::RegistryError;

#[derive(Debug, Clone, Default)]
pub struct MutationRegistry<L: PositionLookup = PositionIndex> {
    mutations: Vec<Mutation>,
    counts: Vec<u32>,
    lookup: L,
    fixations: FixationRecord,
    /// Zero-count slots, reused smallest index first (popped from the back).
    recycle_bin: Vec<MutationIndex>,
}

impl<L: PositionLookup + Default> MutationRegistry<L> {
    pub fn new() -> Self {
        Self {
            mutations: Vec::new(),
            counts: Vec::new(),
            lookup: L::default(),
            fixations: FixationRecord::new(),
            recycle_bin: Vec::new(),
        }
    }
}

impl<L: PositionLookup> MutationRegistry<L> {
    /// Store a new mutation with a count of one.
    ///
    /// Reuses a recycled slot when one is available.
    pub fn insert(&mut self, mutation: Mutation) -> Result<MutationIndex, RegistryError> {
        if self.lookup.contains(mutation.position) {
            return Err(RegistryError::PositionCollision {
                position: mutation.position,
            });
        }

        let index = match self.next_free_slot() {
            Some(slot) => {
                self.mutations[slot as usize] = mutation;
                self.counts[slot as usize] = 1;
                slot
            }
            None => {
                self.mutations.push(mutation);
                self.counts.push(1);
                (self.mutations.len() - 1) as MutationIndex
            }
        };
        self.lookup.insert(mutation.position, index);
        Ok(index)
    }

    fn next_free_slot(&mut self) -> Option<MutationIndex> {
        while let Some(slot) = self.recycle_bin.pop() {
            if self.counts[slot as usize] == 0 {
                return Some(slot);
            }
        }
        None
    }

    #[inline]
    pub fn get(&self, index: MutationIndex) -> &Mutation {
        &self.mutations[index as usize]
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    #[inline]
    pub fn count(&self, index: MutationIndex) -> u32 {
        self.counts[index as usize]
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn fixations(&self) -> &FixationRecord {
        &self.fixations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    /// Indices of mutations with `0 < count < two_n`.
    pub fn segregating(&self, two_n: u32) -> impl Iterator<Item = MutationIndex> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(move |(_, &c)| c > 0 && c < two_n)
            .map(|(i, _)| i as MutationIndex)
    }

    /// Zero every count ahead of a recount.
    pub(crate) fn clear_counts(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    #[inline]
    pub(crate) fn add_count(&mut self, index: MutationIndex, copies: u32) {
        self.counts[index as usize] += copies;
    }

    /// Reconcile counts against `two_n` gametes and refill the recycle bin.
    pub fn reconcile(&mut self, two_n: u32, generation: u32) -> Result<ReconcileSummary, RegistryError> {
        let summary = reconcile(
            &self.mutations,
            &mut self.counts,
            &mut self.lookup,
            &mut self.fixations,
            two_n,
            generation,
        )?;
        self.recycle_bin = self
            .counts
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, &c)| c == 0)
            .map(|(i, _)| i as MutationIndex)
            .collect();
        Ok(summary)
    }

    pub fn recyclable(&self) -> usize {
        self.recycle_bin.len()
    }
}
