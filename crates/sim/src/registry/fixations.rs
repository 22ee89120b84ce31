use serde::{Deserialize, Serialize};

use crate::base::Mutation;

/// Mutations that reached frequency one, sorted by position, with the
/// generation at which each was recorded.
///
/// The two sequences are kept in lockstep: entry `i` of `times()` belongs to
/// entry `i` of `mutations()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixationRecord {
    mutations: Vec<Mutation>,
    times: Vec<u32>,
}

impl FixationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn times(&self) -> &[u32] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Mutation, u32)> + '_ {
        self.mutations.iter().zip(self.times.iter().copied())
    }

    /// First entry whose position is not less than `position`.
    pub fn lower_bound(&self, position: f64) -> usize {
        self.mutations.partition_point(|m| m.position < position)
    }

    pub(crate) fn insert_at(&mut self, index: usize, mutation: Mutation, generation: u32) {
        self.mutations.insert(index, mutation);
        self.times.insert(index, generation);
    }

    /// Number of recorded fixations with a trait effect.
    pub fn count_selected(&self) -> usize {
        self.mutations.iter().filter(|m| !m.neutral).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_bound_and_insert_keep_lockstep() {
        let mut record = FixationRecord::new();
        record.insert_at(0, Mutation::neutral(0.5, 1), 10);
        let at = record.lower_bound(0.2);
        assert_eq!(at, 0);
        record.insert_at(at, Mutation::neutral(0.2, 2), 11);
        assert_eq!(record.lower_bound(0.9), 2);

        let positions: Vec<f64> = record.mutations().iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![0.2, 0.5]);
        assert_eq!(record.times(), &[11, 10]);
    }
}
