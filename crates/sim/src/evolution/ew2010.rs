//! Eyre-Walker (2010) trait effects.
//!
//! Under this model a mutation's effect on the trait is tied to its
//! fitness effect: `e = sign(s) |s|^tau 10^N(0, sigma)`. The functions here
//! re-derive effects for a frozen population rather than during the run,
//! so the same population can be scored under several `(tau, sigma)` pairs.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::base::Position;
use crate::simulation::Population;

use super::eyre_walker_effect;

/// Selection coefficient, trait effect and frequency of one site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EwMutDetails {
    pub s: f64,
    pub e: f64,
    pub p: f64,
}

impl Default for EwMutDetails {
    fn default() -> Self {
        Self {
            s: f64::NAN,
            e: f64::NAN,
            p: f64::NAN,
        }
    }
}

/// Draw an EW2010 effect for every segregating selected mutation.
///
/// Mutations are visited in arena order, one normal deviate each, so the
/// result is reproducible for a given RNG state. The population is not
/// modified.
pub fn assign_effects<R: Rng + ?Sized>(
    rng: &mut R,
    population: &Population,
    tau: f64,
    sigma: f64,
) -> BTreeMap<Position, EwMutDetails> {
    let two_n = population.two_n();
    let mutations = population.mutations();
    let counts = population.counts();

    let mut effects = BTreeMap::new();
    for index in population.segregating() {
        let m = &mutations[index as usize];
        if m.neutral {
            continue;
        }
        let s = m.selection_coefficient;
        effects.insert(
            Position(m.position),
            EwMutDetails {
                s,
                e: eyre_walker_effect(s, tau, sigma, rng),
                p: counts[index as usize] as f64 / two_n as f64,
            },
        );
    }
    effects
}

/// Per-diploid trait value: the sum of `e` over every selected mutation
/// copy carried. Sites missing from `effects` contribute nothing.
pub fn traits_from_effects(population: &Population, effects: &BTreeMap<Position, EwMutDetails>) -> Vec<f64> {
    let mutations = population.mutations();
    let site_effect = |index: u32| -> f64 {
        effects
            .get(&Position(mutations[index as usize].position))
            .map_or(0.0, |d| d.e)
    };

    population
        .diploids()
        .iter()
        .map(|diploid| {
            let (first, second) = population.gametes_of(diploid);
            first
                .selected()
                .iter()
                .chain(second.selected())
                .map(|&index| site_effect(index))
                .sum()
        })
        .collect()
}
