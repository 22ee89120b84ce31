use thiserror::Error;

/// Violations of the mutation registry contract.
///
/// These are fatal: once returned, the population that produced them is in
/// an unspecified state and must not be advanced further.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// A mutation is carried by more gametes than exist in the population.
    #[error("mutation {index} has count {count}, which exceeds 2N = {two_n}")]
    CountExceedsPopulation { index: usize, count: u32, two_n: u32 },

    /// The count table and the mutation arena disagree in length.
    #[error("count table has {counts} entries but the arena holds {mutations} mutations")]
    CountTableMismatch { mutations: usize, counts: usize },

    /// A new mutation was placed at a position that is already occupied.
    #[error("position {position} is already occupied by a live mutation")]
    PositionCollision { position: f64 },

    /// Derived bookkeeping no longer agrees with the gametes.
    #[error("registry is inconsistent: {0}")]
    Inconsistent(String),
}

/// Malformed genomic landscape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandscapeError {
    #[error("region [{begin}, {end}) has negative weight {weight}")]
    NegativeWeight { begin: f64, end: f64, weight: f64 },

    #[error("region begins at {begin} but ends at {end}")]
    InvertedInterval { begin: f64, end: f64 },

    #[error("region contains a non-finite value")]
    NonFinite,
}

/// Invalid parameters for an effect-size distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffectSizeError {
    #[error("invalid {distribution} parameter `{parameter}`: {value}")]
    InvalidParameter {
        distribution: &'static str,
        parameter: &'static str,
        value: f64,
    },
}

/// Configuration rejected before any generation is simulated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("rate `{0}` must be finite and non-negative, got {1}")]
    InvalidRate(&'static str, f64),

    #[error("selfing rate must lie in [0, 1], got {0}")]
    InvalidSelfingRate(f64),

    #[error("`{0}` must be finite and non-negative, got {1}")]
    InvalidScale(&'static str, f64),

    #[error("`{0}` must be finite and positive, got {1}")]
    NonPositive(&'static str, f64),

    #[error("census schedule is empty")]
    EmptySchedule,

    #[error("census size at generation {generation} is zero")]
    ZeroCensusSize { generation: usize },

    #[error("census schedule has {actual} entries but {expected} generations were requested")]
    ScheduleLength { expected: usize, actual: usize },

    #[error("at least one population is required")]
    NoPopulations,

    #[error("optimum must be finite, got {0}")]
    InvalidOptimum(f64),

    #[error(transparent)]
    Landscape(#[from] LandscapeError),

    #[error(transparent)]
    EffectSize(#[from] EffectSizeError),
}

/// Errors returned while advancing populations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("population '{id}' failed at generation {generation}: {source}")]
    Population {
        id: String,
        generation: u32,
        #[source]
        source: RegistryError,
    },
}
