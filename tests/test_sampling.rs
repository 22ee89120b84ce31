//! Sampling and summary statistics over evolved populations.

use std::collections::HashMap;

use qtevo::analysis::{get_qtrait_traj, qtrait_esize_freq, qtrait_pop_props, tajimas_d, take_sample};
use qtevo::evolution::{assign_effects, traits_from_effects};
use qtevo::simulation::{Population, SimulationBuilder};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn evolved(seed: u64, track: bool) -> Population {
    let mut sim = SimulationBuilder::new()
        .population_size(100)
        .generations(100)
        .mutation_rates(0.05, 0.02)
        .recombination_rate(1.0)
        .track(track)
        .seed(seed)
        .build()
        .unwrap();
    sim.run(None).unwrap();
    sim.into_populations().remove(0)
}

#[test]
fn test_sample_counts_are_subsample_of_population() {
    let pop = evolved(1, false);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(10);
    let sample = take_sample(&mut rng, &pop, 50).unwrap();
    assert!(!sample.is_empty());

    let counts: HashMap<u64, u32> = pop
        .mutations()
        .iter()
        .zip(pop.counts())
        .filter(|&(m, &c)| m.neutral && c > 0)
        .map(|(m, &c)| (m.position.to_bits(), c))
        .collect();
    for (position, genotypes) in &sample {
        let derived = genotypes.matches('1').count() as u32;
        let in_population = counts[&position.to_bits()];
        assert!(derived <= in_population);
        assert!(50 - derived <= pop.two_n() - in_population);
    }
}

#[test]
fn test_tajimas_d_defined_for_polymorphic_sample() {
    let pop = evolved(2, false);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
    let sample = take_sample(&mut rng, &pop, 30).unwrap();
    assert!(tajimas_d(&sample).is_finite());

    let fresh = Population::new("fresh", 50);
    let empty = take_sample(&mut rng, &fresh, 30).unwrap();
    assert!(tajimas_d(&empty).is_nan());
}

#[test]
fn test_ew2010_traits_match_genetic_values() {
    let pop = evolved(3, false);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(12);
    // tau = 1 and sigma = 0 reproduce the effects drawn during the run.
    let effects = assign_effects(&mut rng, &pop, 1.0, 0.0);
    let traits = traits_from_effects(&pop, &effects);

    let fixed: f64 = pop
        .mutations()
        .iter()
        .zip(pop.counts())
        .filter(|&(m, &c)| !m.neutral && c == pop.two_n())
        .map(|(m, _)| 2.0 * m.effect)
        .sum();
    for (diploid, t) in pop.diploids().iter().zip(&traits) {
        assert!((diploid.genetic_value - (t + fixed)).abs() < 1e-9);
    }
}

#[test]
fn test_summaries_agree() {
    let pop = evolved(4, true);
    let props = qtrait_pop_props(&pop);
    let esize = qtrait_esize_freq(&pop);

    let segregating = esize["frequency"].iter().filter(|&&f| f < 1.0).count();
    assert_eq!(props["segregating_selected"] as usize, segregating);
    assert!(props["wbar"] > 0.0 && props["wbar"] <= 1.0);
    assert!(props["VE"] > 0.0);

    let traj = get_qtrait_traj(&pop, 1, 0.0);
    let rows = traj["generation"].len();
    assert!(rows > 0);
    assert!(traj["generation"].iter().all(|&g| g >= 1.0 && g <= 100.0));
}
