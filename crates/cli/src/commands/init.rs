use anyhow::{Context, Result};
use qtevo_sim::simulation::{Configuration, SimulationBuilder};
use std::fs;

use crate::args::InitArgs;
use crate::printing::print_parameters;

pub fn init_simulation(args: &InitArgs) -> Result<()> {
    let config = build_config(args)?;

    print_parameters(&config);

    let json = config.to_json().context("Failed to serialize configuration")?;
    fs::write(&args.output, json)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("\n✓ Configuration written: {}", args.output.display());
    println!("\n💡 Use 'qtevo run --config {}' to start the simulation", args.output.display());
    Ok(())
}

pub fn build_config(args: &InitArgs) -> Result<Configuration> {
    let mut builder = SimulationBuilder::new()
        .population_size(args.population_size)
        .generations(args.generations)
        .populations(args.populations)
        .mutation_rates(args.mu_neutral, args.mu_selected)
        .recombination_rate(args.recombination_rate)
        .sigma_e(args.sigma_e)
        .optimum(args.optimum)
        .vs(args.vs)
        .selfing_rate(args.selfing_rate)
        .track(args.track);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    builder.configuration().context("Invalid simulation parameters")
}
