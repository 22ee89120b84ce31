//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use qtevo_sim::prelude::*;
//!
//! let pop = Population::new("pop0", 10);
//! assert_eq!(pop.two_n(), 20);
//! ```

pub use crate::base::{FitnessValue, LogFitnessValue, Mutation, MutationIndex, Position};
pub use crate::errors::{ConfigError, RegistryError, SimulationError};
pub use crate::evolution::{EffectSizeModel, GenomicLandscape, Region, SelectedRegion, TraitModel};
pub use crate::genome::{Diploid, Gamete};
pub use crate::registry::{FixationRecord, MutationRegistry};
pub use crate::simulation::{
    evolve_qtraits, CancelToken, Configuration, EvolveParams, Population, RunStatus, Simulation,
    SimulationBuilder,
};
