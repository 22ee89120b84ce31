//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use qtevo::prelude::*;
//!
//! let mut sim = SimulationBuilder::new()
//!     .population_size(20)
//!     .generations(5)
//!     .mutation_rates(0.01, 0.0)
//!     .seed(1)
//!     .build()
//!     .unwrap();
//! sim.run(None).unwrap();
//! let props = qtrait_pop_props(&sim.populations()[0]);
//! assert!(props.contains_key("wbar"));
//! ```

pub use qtevo_analysis::{
    get_qtrait_traj, qtrait_esize_freq, qtrait_pop_props, tajimas_d, take_sample, Sample, SampleError,
};
pub use qtevo_sim::prelude::*;
