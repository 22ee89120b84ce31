//! Reproducibility of batch runs with fixed seeds.

use qtevo::simulation::{Population, Simulation, SimulationBuilder};

fn build(seed: u64) -> Simulation {
    SimulationBuilder::new()
        .population_size(40)
        .generations(30)
        .populations(4)
        .mutation_rates(0.05, 0.02)
        .recombination_rate(1.0)
        .selfing_rate(0.2)
        .track(true)
        .seed(seed)
        .build()
        .unwrap()
}

fn run(seed: u64) -> Vec<Population> {
    let mut sim = build(seed);
    sim.run(None).unwrap();
    sim.into_populations()
}

fn same(a: &Population, b: &Population) -> bool {
    a.mutations() == b.mutations()
        && a.counts() == b.counts()
        && a.fixations() == b.fixations()
        && a.diploids() == b.diploids()
        && a.trajectories().map(|t| t.records()) == b.trajectories().map(|t| t.records())
}

#[test]
fn test_same_seed_same_result() {
    let first = run(42);
    let second = run(42);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert!(same(a, b), "population {} differs", a.id());
    }
}

#[test]
fn test_different_seeds_differ() {
    let first = run(42);
    let second = run(123);
    assert!(first.iter().zip(&second).any(|(a, b)| !same(a, b)));
}

#[test]
fn test_independent_of_thread_count() {
    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| run(7));
    let many = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
        .install(|| run(7));
    for (a, b) in single.iter().zip(&many) {
        assert!(same(a, b));
    }
}

#[test]
fn test_stepwise_equals_full_run() {
    let full = run(99);

    let mut sim = build(99);
    sim.run_for(10).unwrap();
    sim.run_for(5).unwrap();
    sim.run(None).unwrap();
    let stepped = sim.into_populations();

    for (a, b) in full.iter().zip(&stepped) {
        assert!(same(a, b));
    }
}

#[test]
fn test_populations_are_independent_streams() {
    let pops = run(5);
    assert!(!same(&pops[0], &pops[1]));
}
