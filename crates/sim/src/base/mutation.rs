use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a mutation record inside the registry arena.
pub type MutationIndex = u32;

/// A genomic position on the continuous `[begin, end)` interval.
///
/// Positions are plain `f64`s with a total order so they can key ordered
/// maps. Two mutations never share a position while both are live.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub f64);

impl Position {
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Position {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single derived allele.
///
/// `selection_coefficient` is the value drawn from the effect-size model;
/// `effect` is the contribution of one copy to the trait. Neutral mutations
/// carry zero for both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    pub position: f64,
    pub origin_generation: u32,
    pub neutral: bool,
    pub effect: f64,
    pub selection_coefficient: f64,
}

impl Mutation {
    pub fn neutral(position: f64, origin_generation: u32) -> Self {
        Self {
            position,
            origin_generation,
            neutral: true,
            effect: 0.0,
            selection_coefficient: 0.0,
        }
    }

    pub fn selected(position: f64, origin_generation: u32, selection_coefficient: f64, effect: f64) -> Self {
        Self {
            position,
            origin_generation,
            neutral: false,
            effect,
            selection_coefficient,
        }
    }

    #[inline]
    pub fn key(&self) -> Position {
        Position(self.position)
    }
}
