//! Diversity metrics for population genetics
//!
//! Implements standard estimators over a haplotype sample:
//! - Number of segregating sites (S)
//! - Nucleotide diversity (π)
//! - Watterson's estimator (θ_W)
//! - Tajima's D
//!
//! Positions are continuous, so π and θ_W are per-region values, not per
//! site.

use super::sample::Site;
use super::utils::{harmonic_number, harmonic_number_sq};

/// Number of sampled haplotypes (length of the genotype strings).
pub fn sample_size(sample: &[Site]) -> usize {
    sample.first().map_or(0, |(_, genotypes)| genotypes.len())
}

fn derived_count(genotypes: &str) -> usize {
    genotypes.bytes().filter(|&b| b == b'1').count()
}

/// Count sites with at least one derived and one ancestral allele.
pub fn segregating_sites(sample: &[Site]) -> usize {
    let n = sample_size(sample);
    sample
        .iter()
        .filter(|(_, genotypes)| {
            let c = derived_count(genotypes);
            c > 0 && c < n
        })
        .count()
}

/// Calculate nucleotide diversity (π)
///
/// Mean number of pairwise differences between sampled haplotypes:
///
/// $$\pi = \sum_{sites} \frac{2 c (n - c)}{n (n - 1)}$$
///
/// where $c$ is the derived count at a site and $n$ the sample size.
/// Returns 0 for fewer than two haplotypes.
pub fn nucleotide_diversity(sample: &[Site]) -> f64 {
    let n = sample_size(sample);
    if n < 2 {
        return 0.0;
    }
    let pairs = (n * (n - 1)) as f64;
    sample
        .iter()
        .map(|(_, genotypes)| {
            let c = derived_count(genotypes);
            2.0 * (c * (n - c)) as f64 / pairs
        })
        .sum()
}

/// Calculate Watterson's estimator (θ_W)
///
/// $$\theta_W = \frac{S}{a_n}, \quad a_n = \sum_{i=1}^{n-1} \frac{1}{i}$$
pub fn wattersons_theta(sample: &[Site]) -> f64 {
    let s = segregating_sites(sample);
    if s == 0 {
        return 0.0;
    }
    s as f64 / harmonic_number(sample_size(sample))
}

/// Calculate Tajima's D statistic
///
/// $$D = \frac{\pi - \theta_W}{\sqrt{e_1 S + e_2 S (S - 1)}}$$
///
/// Returns `NaN` when the statistic is undefined: no segregating sites,
/// fewer than two haplotypes, or a non-positive variance.
///
/// # References
///
/// Tajima, F. (1989). Statistical method for testing the neutral mutation
/// hypothesis by DNA polymorphism. Genetics, 123(3), 585-595.
pub fn tajimas_d(sample: &[Site]) -> f64 {
    let n = sample_size(sample);
    let s = segregating_sites(sample);
    if n < 2 || s == 0 {
        return f64::NAN;
    }

    let n_f64 = n as f64;
    let a1 = harmonic_number(n);
    let a2 = harmonic_number_sq(n);

    let b1 = (n_f64 + 1.0) / (3.0 * (n_f64 - 1.0));
    let b2 = 2.0 * (n_f64 * n_f64 + n_f64 + 3.0) / (9.0 * n_f64 * (n_f64 - 1.0));

    let c1 = b1 - 1.0 / a1;
    let c2 = b2 - (n_f64 + 2.0) / (a1 * n_f64) + a2 / (a1 * a1);

    let e1 = c1 / a1;
    let e2 = c2 / (a1 * a1 + a2);

    let s = s as f64;
    let var = e1 * s + e2 * s * (s - 1.0);
    if var <= 0.0 {
        return f64::NAN;
    }

    (nucleotide_diversity(sample) - s / a1) / var.sqrt()
}
