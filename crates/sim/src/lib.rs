//! # Simulation Crate
//!
//! The `sim` crate provides the core of a forward-time quantitative trait
//! simulator: mutation registries with slot recycling, copy-on-write
//! gametes, mutation and recombination landscapes, effect-size models,
//! Gaussian stabilizing selection and the Wright-Fisher generation loop.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod genome;
pub mod registry;
pub mod simulation;
pub mod prelude;

pub use base::{Mutation, MutationIndex, Position};
