use std::collections::BTreeMap;

use super::{MutationIndex, Position};

/// Position-to-mutation lookup used to reject duplicate positions.
///
/// The registry only relies on this contract, so alternative indexes can
/// be plugged in without touching reconciliation.
pub trait PositionLookup {
    fn contains(&self, position: f64) -> bool;

    fn get(&self, position: f64) -> Option<MutationIndex>;

    /// Returns the previous occupant, if any.
    fn insert(&mut self, position: f64, index: MutationIndex) -> Option<MutationIndex>;

    fn remove(&mut self, position: f64) -> Option<MutationIndex>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered lookup with `O(log n)` queries.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    map: BTreeMap<Position, MutationIndex>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates occupied positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, MutationIndex)> + '_ {
        self.map.iter().map(|(p, &i)| (p.get(), i))
    }
}

impl PositionLookup for PositionIndex {
    fn contains(&self, position: f64) -> bool {
        self.map.contains_key(&Position(position))
    }

    fn get(&self, position: f64) -> Option<MutationIndex> {
        self.map.get(&Position(position)).copied()
    }

    fn insert(&mut self, position: f64, index: MutationIndex) -> Option<MutationIndex> {
        self.map.insert(Position(position), index)
    }

    fn remove(&mut self, position: f64) -> Option<MutationIndex> {
        self.map.remove(&Position(position))
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}
