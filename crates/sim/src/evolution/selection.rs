//! Trait values and stabilizing selection.
//!
//! An individual's genetic value `G` is computed from the selected
//! mutations on its two gametes by a [`TraitModel`]. Its phenotype is
//! `P = G + E` with Gaussian noise `E`, and fitness is a function of the
//! distance between `P` and the current optimum.

use serde::{Deserialize, Serialize};

use crate::base::{FitnessValue, LogFitnessValue, Mutation};
use crate::errors::ConfigError;
use crate::genome::Gamete;

/// Maps a phenotype to fitness given the current optimum.
pub trait PhenotypeFitness {
    fn fitness(&self, phenotype: f64, optimum: f64) -> FitnessValue;
}

/// `w = exp(-(P - optimum)^2 / (2 vs))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianStabilizing {
    vs: f64,
}

impl GaussianStabilizing {
    /// # Errors
    /// `vs` must be finite and positive.
    pub fn new(vs: f64) -> Result<Self, ConfigError> {
        if !(vs.is_finite() && vs > 0.0) {
            return Err(ConfigError::NonPositive("vs", vs));
        }
        Ok(Self { vs })
    }

    pub fn vs(&self) -> f64 {
        self.vs
    }
}

impl Default for GaussianStabilizing {
    fn default() -> Self {
        Self { vs: 1.0 }
    }
}

impl PhenotypeFitness for GaussianStabilizing {
    fn fitness(&self, phenotype: f64, optimum: f64) -> FitnessValue {
        let deviation = phenotype - optimum;
        if !deviation.is_finite() {
            return FitnessValue::LETHAL;
        }
        LogFitnessValue::new(-(deviation * deviation) / (2.0 * self.vs)).exp()
    }
}

/// How selected mutations combine into the genetic value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitModel {
    /// Sum of effects over every carried copy.
    #[default]
    Additive,
    /// Geometric mean of the two per-gamete effect sums; zero unless both
    /// sums are positive.
    Gbr,
}

impl TraitModel {
    pub fn genetic_value(&self, first: &Gamete, second: &Gamete, mutations: &[Mutation]) -> f64 {
        let h1 = first.effect_sum(mutations);
        let h2 = second.effect_sum(mutations);
        match self {
            Self::Additive => h1 + h2,
            Self::Gbr => {
                if h1 > 0.0 && h2 > 0.0 {
                    (h1 * h2).sqrt()
                } else {
                    0.0
                }
            }
        }
    }
}
