//! Crossing over between the two gametes of a parent.
//!
//! The number of breakpoints per meiosis is Poisson with mean `littler`,
//! their positions come from the recombination landscape. The recombinant
//! gamete copies the first parental gamete up to the first breakpoint, the
//! second up to the next, and so on.

use rand::Rng;
use std::iter;

use crate::base::{Mutation, MutationIndex};
use crate::errors::ConfigError;
use crate::genome::Gamete;

use super::mutation::{check_rate, poisson_count};
use super::{GenomicLandscape, Region};

#[derive(Debug, Clone)]
pub struct RecombinationModel {
    littler: f64,
    landscape: GenomicLandscape,
}

impl RecombinationModel {
    pub fn new(littler: f64, regions: Vec<Region>) -> Result<Self, ConfigError> {
        check_rate("littler", littler)?;
        Ok(Self {
            littler,
            landscape: GenomicLandscape::new(regions)?,
        })
    }

    /// No crossing over.
    pub fn none() -> Self {
        Self {
            littler: 0.0,
            landscape: GenomicLandscape::empty(),
        }
    }

    pub fn littler(&self) -> f64 {
        self.littler
    }

    /// Sorted breakpoint positions for one meiosis. Empty means the
    /// parental gamete is transmitted unchanged.
    pub fn breakpoints<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        if !self.landscape.is_active() {
            return Vec::new();
        }
        let n = poisson_count(self.littler, rng);
        let mut breakpoints: Vec<f64> = (0..n)
            .filter_map(|_| self.landscape.sample_position(rng))
            .collect();
        breakpoints.sort_by(f64::total_cmp);
        breakpoints
    }
}

/// Splice two parental gametes at `breakpoints` (ascending), starting from
/// `first`.
pub fn recombine(first: &Gamete, second: &Gamete, breakpoints: &[f64], mutations: &[Mutation]) -> Gamete {
    Gamete::new(
        splice(first.neutral(), second.neutral(), breakpoints, mutations),
        splice(first.selected(), second.selected(), breakpoints, mutations),
    )
}

fn splice(
    first: &[MutationIndex],
    second: &[MutationIndex],
    breakpoints: &[f64],
    mutations: &[Mutation],
) -> Vec<MutationIndex> {
    let position = |m: &MutationIndex| mutations[*m as usize].position;
    let mut out = Vec::with_capacity(first.len().max(second.len()));
    let mut left = f64::NEG_INFINITY;

    for (segment, &right) in breakpoints.iter().chain(iter::once(&f64::INFINITY)).enumerate() {
        let source = if segment % 2 == 0 { first } else { second };
        let start = source.partition_point(|m| position(m) < left);
        let end = source.partition_point(|m| position(m) < right);
        if start < end {
            out.extend_from_slice(&source[start..end]);
        }
        left = right;
    }
    out
}
