use qtevo_sim::simulation::{GenerationStepper, Population, SimulationBuilder};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::Instant;

fn main() {
    let size = 5_000;
    let generations = 500;

    let sim = SimulationBuilder::new()
        .population_size(size)
        .generations(generations)
        .mutation_rates(0.01, 0.002)
        .recombination_rate(1.0)
        .build()
        .unwrap();
    let params = sim.params().clone();
    let stepper = GenerationStepper::new(&params);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let mut pop = Population::new("profile", size);

    println!("Evolving N = {size} for {generations} generations...");
    let start = Instant::now();
    for t in 1..=generations {
        stepper.advance(&mut pop, size, &mut rng).unwrap();
        if t % 100 == 0 {
            println!(
                "gen {t:>4}: {:?} elapsed, arena {} slots ({} recyclable), {} gametes, {} fixations",
                start.elapsed(),
                pop.mutations().len(),
                pop.registry().recyclable(),
                pop.gamete_arena().len(),
                pop.fixations().len(),
            );
        }
    }
    let per_generation = start.elapsed().as_secs_f64() / generations as f64;
    println!("Mean time per generation: {:.3} ms", per_generation * 1e3);
}
