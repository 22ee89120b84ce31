//! Simulation engine and population management.
//!
//! - [`Population`]: diploids, gametes and the mutation registry of one
//!   population.
//! - [`GenerationStepper`]: advances one population by one generation.
//! - [`evolve_qtraits`]: runs a batch of populations through a census
//!   schedule in parallel.
//! - [`Simulation`]: owns a batch and its RNG streams and steps it
//!   generation by generation.
//! - [`SimulationBuilder`]: fluent construction with validation.

pub mod builder;
pub mod configs;
pub mod engine;
pub mod parameters;
pub mod population;
pub mod stepper;
pub mod trajectory;

pub use builder::SimulationBuilder;
pub use configs::{
    validate_schedule, CensusSchedule, ConfigLoadError, Configuration, EvolutionConfig, ExecutionConfig,
    MutationConfig, RecombinationConfig, SelectionConfig, TrackingConfig,
};
pub use engine::{evolve_qtraits, CancelToken, RunStatus, Simulation};
pub use parameters::EvolveParams;
pub use population::Population;
pub use stepper::GenerationStepper;
pub use trajectory::{TraitTrajectoryRecord, TrajectoryRecorder};
