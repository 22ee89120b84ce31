//! Validated per-run parameters.

use crate::errors::ConfigError;
use crate::evolution::{GaussianStabilizing, MutationModel, RecombinationModel, TraitModel};

use super::{EvolutionConfig, TrackingConfig};

/// Everything a generation step needs besides the population itself.
///
/// Shared read-only by every population of a batch.
#[derive(Debug, Clone)]
pub struct EvolveParams {
    pub mutation: MutationModel,
    pub recombination: RecombinationModel,
    pub selection: GaussianStabilizing,
    pub trait_model: TraitModel,
    /// Standard deviation of the environmental noise `E`.
    pub sigma_e: f64,
    pub optimum: f64,
    /// Probability `f` that an offspring is produced by selfing.
    pub selfing_rate: f64,
    /// Record trajectories of selected mutations.
    pub track: bool,
}

impl EvolveParams {
    pub fn from_config(config: &EvolutionConfig, tracking: &TrackingConfig) -> Result<Self, ConfigError> {
        let mutation = MutationModel::new(
            config.mutation.mu_neutral,
            config.mutation.mu_selected,
            config.mutation.neutral_regions.clone(),
            config.mutation.selected_regions.clone(),
        )?;
        let recombination =
            RecombinationModel::new(config.recombination.littler, config.recombination.regions.clone())?;

        let selection = &config.selection;
        let params = Self {
            mutation,
            recombination,
            selection: GaussianStabilizing::new(selection.vs)?,
            trait_model: selection.trait_model,
            sigma_e: selection.sigma_e,
            optimum: selection.optimum,
            selfing_rate: selection.selfing_rate,
            track: tracking.track,
        };
        params.validate()?;
        Ok(params)
    }

    /// Neutral evolution: no mutation, no recombination, `sigma_e = 1`.
    pub fn neutral() -> Self {
        Self {
            mutation: MutationModel::none(),
            recombination: RecombinationModel::none(),
            selection: GaussianStabilizing::default(),
            trait_model: TraitModel::Additive,
            sigma_e: 1.0,
            optimum: 0.0,
            selfing_rate: 0.0,
            track: false,
        }
    }

    /// Check the scalar settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sigma_e.is_finite() && self.sigma_e >= 0.0) {
            return Err(ConfigError::InvalidScale("sigma_e", self.sigma_e));
        }
        if !(0.0..=1.0).contains(&self.selfing_rate) {
            return Err(ConfigError::InvalidSelfingRate(self.selfing_rate));
        }
        if !self.optimum.is_finite() {
            return Err(ConfigError::InvalidOptimum(self.optimum));
        }
        Ok(())
    }

    pub fn with_optimum(mut self, optimum: f64) -> Self {
        self.optimum = optimum;
        self
    }
}
