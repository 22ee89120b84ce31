//! Base types shared by every part of the simulation.
//!
//! Mutation records, the ordered position key used for lookups and
//! fixation bookkeeping, and bounded fitness values.

mod fitness;
mod lookup;
mod mutation;

pub use fitness::{FitnessValue, LogFitnessValue};
pub use lookup::{PositionIndex, PositionLookup};
pub use mutation::{Mutation, MutationIndex, Position};
