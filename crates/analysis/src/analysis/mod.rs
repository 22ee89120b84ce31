//! Population genetics analysis tools for qtevo
//!
//! This module provides:
//! - Sampling of gametes without replacement (`sample`)
//! - Diversity metrics over a sample: pi, theta_W, Tajima's D (`diversity`)
//! - Quantitative-trait summaries over a population (`qtrait`)

pub mod diversity;
pub mod qtrait;
pub mod sample;
pub mod utils;

pub use diversity::{nucleotide_diversity, sample_size, segregating_sites, tajimas_d, wattersons_theta};
pub use qtrait::{get_qtrait_traj, qtrait_esize_freq, qtrait_pop_props};
pub use sample::{take_sample, take_sample_from_pops, take_sample_separate, Sample, SampleError, Site};
