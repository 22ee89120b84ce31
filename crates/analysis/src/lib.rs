//! # Analysis Crate
//!
//! Sampling and summary statistics over `qtevo_sim` populations: haplotype
//! samples in 0/1 site encoding, Tajima's D and related diversity
//! estimators, and quantitative-trait summaries.

pub mod analysis;

pub use analysis::{
    get_qtrait_traj, nucleotide_diversity, qtrait_esize_freq, qtrait_pop_props, segregating_sites,
    tajimas_d, take_sample, take_sample_from_pops, take_sample_separate, wattersons_theta, Sample,
    SampleError,
};
