use qtevo_sim::simulation::{CensusSchedule, Configuration};

pub fn print_parameters(config: &Configuration) {
    let execution = &config.execution;
    let mutation = &config.evolution.mutation;
    let recombination = &config.evolution.recombination;
    let selection = &config.evolution.selection;

    println!("\n📋 Simulation Configuration");
    match &execution.schedule {
        CensusSchedule::Constant { size, generations } => {
            println!("  • Population Size: {size} [-n, --population-size]");
            println!("  • Generations: {generations} [-g, --generations]");
        }
        CensusSchedule::Explicit { sizes, .. } => {
            println!("  • Census Schedule: {} generations (explicit)", sizes.len());
        }
    }
    println!("  • Populations: {} [-p, --populations]", execution.num_populations);
    match execution.seed {
        Some(seed) => println!("  • Random Seed: {seed} [--seed]"),
        None => println!("  • Random Seed: Random [--seed]"),
    }

    println!("\n⚡ Mutation Parameters");
    println!("  • Neutral Rate: {:.2e} /gamete/gen [--mu-neutral]", mutation.mu_neutral);
    println!("  • Selected Rate: {:.2e} /gamete/gen [--mu-selected]", mutation.mu_selected);
    println!(
        "  • Regions: {} neutral, {} selected",
        mutation.neutral_regions.len(),
        mutation.selected_regions.len()
    );

    println!("\n🔀 Recombination Parameters");
    println!("  • Crossovers per Meiosis: {:.3} [-r, --recombination-rate]", recombination.littler);

    println!("\n🎯 Selection Parameters");
    println!("  • Optimum: {} [--optimum]", selection.optimum);
    println!("  • Vs: {} [--vs]", selection.vs);
    println!("  • Environmental SD: {} [--sigma-e]", selection.sigma_e);
    println!("  • Selfing Rate: {} [-f, --selfing-rate]", selection.selfing_rate);
    println!("  • Trait Model: {:?}", selection.trait_model);
    println!("  • Tracking: {}", if config.tracking.track { "on" } else { "off" });
}
