//! Serializable run configuration.
//!
//! A [`Configuration`] fully describes a batch of simulations and can be
//! round-tripped through JSON. [`Configuration::validate`] rejects every
//! malformed setting before a single generation is simulated.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::evolution::{Region, SelectedRegion, TraitModel};

use super::EvolveParams;

/// The master configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub execution: ExecutionConfig,
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Number of independently evolving populations.
    #[serde(default = "default_num_populations")]
    pub num_populations: usize,
    pub schedule: CensusSchedule,
    /// Optional RNG seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_num_populations() -> usize {
    1
}

/// Census size of each simulated generation (the `Nvector`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CensusSchedule {
    /// `size` diploids for `generations` generations.
    Constant { size: u32, generations: usize },
    /// One census size per generation, with an optional cross-check on the
    /// number of generations.
    Explicit {
        sizes: Vec<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        generations: Option<usize>,
    },
}

impl CensusSchedule {
    pub fn constant(size: u32, generations: usize) -> Self {
        Self::Constant { size, generations }
    }

    pub fn explicit(sizes: Vec<u32>) -> Self {
        Self::Explicit {
            sizes,
            generations: None,
        }
    }

    /// Census size at generation 0, before any stepping.
    pub fn initial_size(&self) -> Option<u32> {
        match self {
            Self::Constant { size, .. } => Some(*size),
            Self::Explicit { sizes, .. } => sizes.first().copied(),
        }
    }

    /// The per-generation sizes, validated.
    pub fn sizes(&self) -> Result<Vec<u32>, ConfigError> {
        let sizes = match self {
            Self::Constant { size, generations } => vec![*size; *generations],
            Self::Explicit { sizes, generations } => {
                if let Some(expected) = generations {
                    if *expected != sizes.len() {
                        return Err(ConfigError::ScheduleLength {
                            expected: *expected,
                            actual: sizes.len(),
                        });
                    }
                }
                sizes.clone()
            }
        };
        validate_schedule(&sizes)?;
        Ok(sizes)
    }
}

/// Non-empty, no zero census sizes.
pub fn validate_schedule(sizes: &[u32]) -> Result<(), ConfigError> {
    if sizes.is_empty() {
        return Err(ConfigError::EmptySchedule);
    }
    if let Some(generation) = sizes.iter().position(|&n| n == 0) {
        return Err(ConfigError::ZeroCensusSize { generation });
    }
    Ok(())
}

/// Grouped evolutionary parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub mutation: MutationConfig,
    pub recombination: RecombinationConfig,
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Neutral mutation rate per gamete per generation.
    pub mu_neutral: f64,
    /// Selected mutation rate per gamete per generation.
    pub mu_selected: f64,
    #[serde(default = "unit_regions")]
    pub neutral_regions: Vec<Region>,
    #[serde(default)]
    pub selected_regions: Vec<SelectedRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecombinationConfig {
    /// Expected number of crossovers per meiosis.
    pub littler: f64,
    #[serde(default = "unit_regions")]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Standard deviation of the environmental noise.
    pub sigma_e: f64,
    pub optimum: f64,
    /// Width of the Gaussian fitness function.
    #[serde(default = "default_vs")]
    pub vs: f64,
    /// Probability `f` of selfing.
    #[serde(default)]
    pub selfing_rate: f64,
    #[serde(default)]
    pub trait_model: TraitModel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Record per-mutation frequency trajectories.
    pub track: bool,
}

fn unit_regions() -> Vec<Region> {
    vec![Region::new(0.0, 1.0, 1.0)]
}

fn default_vs() -> f64 {
    1.0
}

impl Configuration {
    /// Check every setting; returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.execution.num_populations == 0 {
            return Err(ConfigError::NoPopulations);
        }
        self.execution.schedule.sizes()?;
        EvolveParams::from_config(&self.evolution, &self.tracking)?;
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Failure to load a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            mutation: MutationConfig {
                mu_neutral: 0.0,
                mu_selected: 0.0,
                neutral_regions: unit_regions(),
                selected_regions: Vec::new(),
            },
            recombination: RecombinationConfig {
                littler: 0.0,
                regions: unit_regions(),
            },
            selection: SelectionConfig {
                sigma_e: 1.0,
                optimum: 0.0,
                vs: default_vs(),
                selfing_rate: 0.0,
                trait_model: TraitModel::Additive,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::EffectSizeModel;

    fn config() -> Configuration {
        Configuration {
            execution: ExecutionConfig {
                num_populations: 2,
                schedule: CensusSchedule::constant(100, 10),
                seed: Some(42),
            },
            evolution: EvolutionConfig::default(),
            tracking: TrackingConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut original = config();
        original.evolution.mutation.selected_regions = vec![SelectedRegion::new(
            0.0,
            1.0,
            1.0,
            EffectSizeModel::Gaussian { sd: 0.1 },
        )];
        let json = original.to_json().unwrap();
        let parsed = Configuration::from_json(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let json = r#"{
            "execution": {"schedule": {"constant": {"size": 50, "generations": 3}}},
            "evolution": {
                "mutation": {"mu_neutral": 0.001, "mu_selected": 0.0},
                "recombination": {"littler": 0.5},
                "selection": {"sigma_e": 1.0, "optimum": 0.0}
            }
        }"#;
        let parsed = Configuration::from_json(json).unwrap();
        assert_eq!(parsed.execution.num_populations, 1);
        assert_eq!(parsed.evolution.selection.vs, 1.0);
        assert_eq!(parsed.evolution.recombination.regions, unit_regions());
        assert!(!parsed.tracking.track);
    }

    #[test]
    fn test_rejects_bad_selfing_rate() {
        let mut c = config();
        c.evolution.selection.selfing_rate = 1.5;
        assert_eq!(c.validate(), Err(ConfigError::InvalidSelfingRate(1.5)));
    }

    #[test]
    fn test_rejects_negative_sigma_e() {
        let mut c = config();
        c.evolution.selection.sigma_e = -0.1;
        assert!(matches!(c.validate(), Err(ConfigError::InvalidScale("sigma_e", _))));
    }

    #[test]
    fn test_rejects_negative_mutation_rate() {
        let mut c = config();
        c.evolution.mutation.mu_selected = -1.0;
        assert_eq!(c.validate(), Err(ConfigError::InvalidRate("mu_selected", -1.0)));
    }

    #[test]
    fn test_rejects_bad_schedules() {
        let mut c = config();
        c.execution.schedule = CensusSchedule::explicit(vec![]);
        assert_eq!(c.validate(), Err(ConfigError::EmptySchedule));

        c.execution.schedule = CensusSchedule::explicit(vec![10, 0, 10]);
        assert_eq!(c.validate(), Err(ConfigError::ZeroCensusSize { generation: 1 }));

        c.execution.schedule = CensusSchedule::Explicit {
            sizes: vec![10, 10],
            generations: Some(3),
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::ScheduleLength { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn test_rejects_zero_populations() {
        let mut c = config();
        c.execution.num_populations = 0;
        assert_eq!(c.validate(), Err(ConfigError::NoPopulations));
    }

    #[test]
    fn test_malformed_landscape_is_rejected() {
        let mut c = config();
        c.evolution.recombination.regions = vec![Region::new(0.0, 1.0, -2.0)];
        assert!(matches!(c.validate(), Err(ConfigError::Landscape(_))));
    }
}
