use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use qtevo_analysis::{qtrait_pop_props, tajimas_d, take_sample};
use qtevo_sim::simulation::{Configuration, Population, Simulation};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use tracing::info;

use crate::args::RunArgs;
use crate::printing::print_parameters;

#[derive(Debug, Serialize)]
pub struct PopulationSummary {
    pub id: String,
    pub generation: u32,
    pub size: usize,
    pub props: BTreeMap<&'static str, f64>,
    pub fixations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tajimas_d: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub generations: usize,
    pub populations: Vec<PopulationSummary>,
}

pub fn run_simulation(args: &RunArgs) -> Result<()> {
    let text = fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read {}. Did you run 'qtevo init' first?", args.config.display()))?;
    let mut config = Configuration::from_json(&text).context("Failed to load configuration")?;
    if let Some(seed) = args.seed {
        config.execution.seed = Some(seed);
    }

    // Stdout carries the JSON summary unless it goes to a file.
    if args.output.is_some() {
        println!("🧬 qtevo - Running Simulation");
        print_parameters(&config);
    }

    let mut sim = Simulation::from_config(&config).context("Failed to initialize simulation")?;
    let total = sim.remaining();

    let pb = if args.progress {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {per_sec}")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    while !sim.is_finished() {
        let generation = sim.generation() + 1;
        sim.step().with_context(|| format!("Generation {generation} failed"))?;
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }
    info!(generations = total, "simulation complete");

    let mut rng = match config.execution.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed.wrapping_add(1)),
        None => Xoshiro256PlusPlus::from_seed(rand::rng().random()),
    };
    let populations = sim
        .populations()
        .iter()
        .map(|pop| summarize(pop, args.nsam, &mut rng))
        .collect::<Result<Vec<_>>>()?;
    let summary = RunSummary {
        generations: sim.generation(),
        populations,
    };

    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Summary written: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn summarize(pop: &Population, nsam: Option<usize>, rng: &mut Xoshiro256PlusPlus) -> Result<PopulationSummary> {
    let tajimas_d = nsam
        .map(|n| take_sample(rng, pop, n).map(|sample| tajimas_d(&sample)))
        .transpose()
        .with_context(|| format!("Failed to sample population {}", pop.id()))?;

    Ok(PopulationSummary {
        id: pop.id().to_string(),
        generation: pop.generation(),
        size: pop.size(),
        props: qtrait_pop_props(pop),
        fixations: pop.fixations().len(),
        tajimas_d,
    })
}
