mod args;
mod commands;
mod printing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use args::{InitArgs, RunArgs};
use commands::{init, run};

/// qtevo: forward-time simulation of quantitative traits
///
/// Simulates populations of diploids evolving under mutation,
/// recombination, drift and Gaussian stabilizing selection on a trait.
#[derive(Parser, Debug)]
#[command(name = "qtevo")]
#[command(author, version, about = "Simulates quantitative trait evolution under stabilizing selection", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a new simulation configuration.
    ///
    /// Sets up the parameters for a new experiment (population size,
    /// mutation rates, selection) but does not run it yet.
    Init(Box<InitArgs>),

    /// Run a configured simulation and print a JSON summary.
    Run(RunArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Init(args) => init::init_simulation(&args)?,
        Commands::Run(args) => run::run_simulation(&args)?,
    }

    Ok(())
}
