//! qtevo: forward-time simulation of quantitative traits.
//!
//! Populations of diploids evolve under mutation, recombination, drift and
//! Gaussian stabilizing selection on an additive trait. This crate
//! re-exports the simulation core (`qtevo-sim`) and the sampling and
//! summary statistics (`qtevo-analysis`) under one roof.

pub use qtevo_sim::{base, errors, evolution, genome, registry, simulation};

pub use qtevo_analysis::analysis;

pub mod prelude;

pub use qtevo_sim::{Mutation, MutationIndex, Position};
