//! Genome representation.
//!
//! Gametes are stored once per generation in a [`GameteArena`] and shared
//! between individuals by handle. A [`Diploid`] holds two handles and its
//! last evaluated phenotype.

mod arena;
mod diploid;
mod gamete;

pub use arena::{GameteArena, GameteId, GameteTransfer};
pub use diploid::Diploid;
pub use gamete::Gamete;
