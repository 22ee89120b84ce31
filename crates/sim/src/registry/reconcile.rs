//! End-of-generation registry maintenance.
//!
//! After counts have been recomputed for the newborn generation, every
//! mutation is inspected once, in arena order. Fixed mutations are moved
//! into the fixation record (neutral ones are also retired so their slot
//! can be recycled), and anything with a zero count leaves the position
//! lookup.

use tracing::debug;

use crate::base::{Mutation, MutationIndex, PositionLookup};
use crate::errors::RegistryError;

use super::FixationRecord;

/// What a single reconciliation pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Fixed neutral mutations recorded and retired this pass.
    pub fixed_neutral: usize,
    /// Fixed non-neutral mutations newly added to the record.
    pub fixed_selected: usize,
    /// Slots whose position was released from the lookup.
    pub released: usize,
}

impl ReconcileSummary {
    /// True when retired indices may still be referenced by gametes.
    pub fn needs_purge(&self) -> bool {
        self.fixed_neutral > 0
    }
}

/// Reconcile per-mutation counts against a census of `two_n` gametes.
///
/// `generation` is stamped onto every fixation recorded in this pass.
/// A count above `two_n` is a broken precondition and aborts the pass
/// before anything is modified.
pub fn reconcile<L: PositionLookup>(
    mutations: &[Mutation],
    counts: &mut [u32],
    lookup: &mut L,
    fixations: &mut FixationRecord,
    two_n: u32,
    generation: u32,
) -> Result<ReconcileSummary, RegistryError> {
    if mutations.len() != counts.len() {
        return Err(RegistryError::CountTableMismatch {
            mutations: mutations.len(),
            counts: counts.len(),
        });
    }
    if let Some((index, &count)) = counts.iter().enumerate().find(|(_, &c)| c > two_n) {
        return Err(RegistryError::CountExceedsPopulation { index, count, two_n });
    }

    let mut summary = ReconcileSummary::default();

    for (i, mutation) in mutations.iter().enumerate() {
        if counts[i] == two_n && two_n > 0 {
            let loc = fixations.lower_bound(mutation.position);
            if mutation.neutral {
                fixations.insert_at(loc, *mutation, generation);
                counts[i] = 0;
                summary.fixed_neutral += 1;
            } else if is_new_fixation(fixations, loc, mutation) {
                fixations.insert_at(loc, *mutation, generation);
                summary.fixed_selected += 1;
            }
        }
        if counts[i] == 0 && release(lookup, mutation.position, i as MutationIndex) {
            summary.released += 1;
        }
    }

    if summary.fixed_neutral + summary.fixed_selected > 0 {
        debug!(
            generation,
            fixed_neutral = summary.fixed_neutral,
            fixed_selected = summary.fixed_selected,
            "recorded fixations"
        );
    }

    Ok(summary)
}

// A non-neutral fixation stays in the population, so it is seen again on
// every later pass and must only be recorded the first time.
fn is_new_fixation(fixations: &FixationRecord, loc: usize, mutation: &Mutation) -> bool {
    match fixations.mutations().get(loc) {
        None => true,
        Some(existing) => {
            existing.position != mutation.position
                && existing.origin_generation != mutation.origin_generation
        }
    }
}

// Only drop the entry if it still belongs to this slot; a stale record must
// not evict a newer mutation that reuses its position.
fn release<L: PositionLookup>(lookup: &mut L, position: f64, index: MutationIndex) -> bool {
    if lookup.get(position) == Some(index) {
        lookup.remove(position);
        true
    } else {
        false
    }
}
