use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::base::Mutation;

/// Frequency time series of one selected mutation, from the first
/// generation it was seen segregating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitTrajectoryRecord {
    pub position: f64,
    pub origin_generation: u32,
    pub effect: f64,
    pub start_generation: u32,
    pub frequencies: Vec<f64>,
}

impl TraitTrajectoryRecord {
    /// Number of generations recorded.
    pub fn sojourn(&self) -> usize {
        self.frequencies.len()
    }

    pub fn peak_frequency(&self) -> f64 {
        self.frequencies.iter().copied().fold(0.0, f64::max)
    }

    /// `(generation, frequency)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.frequencies
            .iter()
            .enumerate()
            .map(move |(i, &f)| (self.start_generation + i as u32, f))
    }
}

/// Collects trajectories keyed by mutation identity (origin generation and
/// position), which survives slot recycling.
#[derive(Debug, Clone, Default)]
pub struct TrajectoryRecorder {
    records: Vec<TraitTrajectoryRecord>,
    index: HashMap<(u32, u64), usize>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, generation: u32, mutation: &Mutation, frequency: f64) {
        let key = (mutation.origin_generation, mutation.position.to_bits());
        match self.index.get(&key) {
            Some(&i) => self.records[i].frequencies.push(frequency),
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(TraitTrajectoryRecord {
                    position: mutation.position,
                    origin_generation: mutation.origin_generation,
                    effect: mutation.effect,
                    start_generation: generation,
                    frequencies: vec![frequency],
                });
            }
        }
    }

    pub fn records(&self) -> &[TraitTrajectoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
