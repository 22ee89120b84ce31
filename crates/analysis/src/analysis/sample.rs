//! Haplotype samples.
//!
//! A sample is a list of sites sorted by position. Each site carries a
//! string with one character per sampled gamete: `'1'` for the derived
//! allele, `'0'` for the ancestral one. Sites that are monomorphic within
//! the sample are dropped.

use std::collections::HashMap;

use qtevo_sim::base::MutationIndex;
use qtevo_sim::genome::Gamete;
use qtevo_sim::simulation::Population;
use rand::seq::index;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// `(position, genotype string)`
pub type Site = (f64, String);

pub type Sample = Vec<Site>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    #[error("cannot sample {nsam} gametes from a population with {two_n}")]
    SampleTooLarge { nsam: usize, two_n: u32 },
}

/// Sample `nsam` gametes without replacement and return the neutral sites
/// segregating among them.
///
/// # Errors
/// Returns [`SampleError::SampleTooLarge`] if `nsam > 2N`.
pub fn take_sample<R: Rng + ?Sized>(rng: &mut R, population: &Population, nsam: usize) -> Result<Sample, SampleError> {
    let slots = draw_slots(rng, population, nsam)?;
    Ok(build_sites(population, &slots, Gamete::neutral))
}

/// Like [`take_sample`], returning `(neutral, selected)` site lists from the
/// same sampled gametes.
pub fn take_sample_separate<R: Rng + ?Sized>(
    rng: &mut R,
    population: &Population,
    nsam: usize,
) -> Result<(Sample, Sample), SampleError> {
    let slots = draw_slots(rng, population, nsam)?;
    Ok((
        build_sites(population, &slots, Gamete::neutral),
        build_sites(population, &slots, Gamete::selected),
    ))
}

/// Apply [`take_sample`] to every population, in order, from one RNG.
pub fn take_sample_from_pops<R: Rng + ?Sized>(
    rng: &mut R,
    populations: &[Population],
    nsam: usize,
) -> Result<Vec<Sample>, SampleError> {
    populations.iter().map(|pop| take_sample(rng, pop, nsam)).collect()
}

fn draw_slots<R: Rng + ?Sized>(rng: &mut R, population: &Population, nsam: usize) -> Result<Vec<usize>, SampleError> {
    let two_n = population.two_n();
    if nsam > two_n as usize {
        return Err(SampleError::SampleTooLarge { nsam, two_n });
    }
    Ok(index::sample(rng, two_n as usize, nsam).into_vec())
}

fn build_sites(population: &Population, slots: &[usize], class: fn(&Gamete) -> &[MutationIndex]) -> Sample {
    let nsam = slots.len();
    let mut columns: HashMap<MutationIndex, Vec<u8>> = HashMap::new();
    for (j, &slot) in slots.iter().enumerate() {
        for &m in class(population.gamete_at(slot)) {
            columns.entry(m).or_insert_with(|| vec![b'0'; nsam])[j] = b'1';
        }
    }

    let mutations = population.mutations();
    let mut sites: Sample = columns
        .into_iter()
        .filter(|(_, column)| column.iter().any(|&c| c == b'0'))
        .map(|(m, column)| {
            let genotypes = column.into_iter().map(char::from).collect();
            (mutations[m as usize].position, genotypes)
        })
        .collect();
    sites.sort_by(|a, b| a.0.total_cmp(&b.0));

    debug!(population = population.id(), nsam, sites = sites.len(), "sampled gametes");
    sites
}
