//! New mutation input.
//!
//! Every generation the number of new neutral and selected mutations is
//! drawn from a Poisson distribution with mean `mu * 2N`, where `mu` is the
//! per-gamete rate of the class. Positions come from the class' landscape;
//! selected mutations also take their effect from the effect-size model
//! paired with the region they landed in.

use rand::Rng;
use rand_distr::{Distribution, Poisson};

use crate::base::Mutation;
use crate::errors::ConfigError;

use super::{EffectSizeModel, GenomicLandscape, Region, SelectedRegion};

#[derive(Debug, Clone)]
pub struct MutationModel {
    mu_neutral: f64,
    mu_selected: f64,
    neutral: GenomicLandscape,
    selected: GenomicLandscape,
    effects: Vec<EffectSizeModel>,
}

impl MutationModel {
    /// # Errors
    /// Returns an error for negative or non-finite rates, malformed
    /// landscapes, or invalid effect-size parameters.
    pub fn new(
        mu_neutral: f64,
        mu_selected: f64,
        neutral_regions: Vec<Region>,
        selected_regions: Vec<SelectedRegion>,
    ) -> Result<Self, ConfigError> {
        check_rate("mu_neutral", mu_neutral)?;
        check_rate("mu_selected", mu_selected)?;
        for region in &selected_regions {
            region.effects.validate()?;
        }

        let neutral = GenomicLandscape::new(neutral_regions)?;
        let selected = GenomicLandscape::new(selected_regions.iter().map(|r| r.region).collect())?;
        let effects = selected_regions.iter().map(|r| r.effects).collect();

        Ok(Self {
            mu_neutral,
            mu_selected,
            neutral,
            selected,
            effects,
        })
    }

    /// No new mutations of either class.
    pub fn none() -> Self {
        Self {
            mu_neutral: 0.0,
            mu_selected: 0.0,
            neutral: GenomicLandscape::empty(),
            selected: GenomicLandscape::empty(),
            effects: Vec::new(),
        }
    }

    pub fn mu_neutral(&self) -> f64 {
        self.mu_neutral
    }

    pub fn mu_selected(&self) -> f64 {
        self.mu_selected
    }

    pub fn neutral_count<R: Rng + ?Sized>(&self, two_n: u32, rng: &mut R) -> usize {
        if !self.neutral.is_active() {
            return 0;
        }
        poisson_count(self.mu_neutral * two_n as f64, rng)
    }

    pub fn selected_count<R: Rng + ?Sized>(&self, two_n: u32, rng: &mut R) -> usize {
        if !self.selected.is_active() {
            return 0;
        }
        poisson_count(self.mu_selected * two_n as f64, rng)
    }

    pub fn draw_neutral<R: Rng + ?Sized>(&self, generation: u32, rng: &mut R) -> Option<Mutation> {
        let position = self.neutral.sample_position(rng)?;
        Some(Mutation::neutral(position, generation))
    }

    pub fn draw_selected<R: Rng + ?Sized>(&self, generation: u32, rng: &mut R) -> Option<Mutation> {
        let region = self.selected.sample_region(rng)?;
        let position = self.selected.sample_in(region, rng);
        let (s, effect) = self.effects[region].sample_mutation(rng);
        Some(Mutation::selected(position, generation, s, effect))
    }
}

/// Poisson draw with the given mean; zero for a non-positive mean.
pub fn poisson_count<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> usize {
    if mean <= 0.0 {
        return 0;
    }
    match Poisson::new(mean) {
        Ok(poisson) => {
            let k: f64 = poisson.sample(rng);
            k as usize
        }
        Err(_) => 0,
    }
}

pub(crate) fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate(name, value))
    }
}
