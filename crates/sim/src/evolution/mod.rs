//! Evolutionary processes acting on a population each generation.
//!
//! - **Landscapes**: weighted interval mixtures for placing mutations and
//!   crossover breakpoints
//! - **Mutation**: Poisson input of neutral and selected mutations
//! - **Effects**: effect-size distributions, including Eyre-Walker (2010)
//! - **Recombination**: crossover between the two gametes of a parent
//! - **Selection**: trait models and Gaussian stabilizing selection

pub mod effects;
pub mod ew2010;
pub mod landscape;
pub mod mutation;
pub mod recombination;
pub mod selection;

pub use effects::{eyre_walker_effect, EffectSizeModel, SelectedRegion};
pub use ew2010::{assign_effects, traits_from_effects, EwMutDetails};
pub use landscape::{GenomicLandscape, Region};
pub use mutation::{poisson_count, MutationModel};
pub use recombination::{recombine, RecombinationModel};
pub use selection::{GaussianStabilizing, PhenotypeFitness, TraitModel};
