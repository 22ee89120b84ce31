use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output configuration path (JSON)
    #[arg(short, long, default_value = "qtevo.json")]
    pub output: PathBuf,

    /// Number of diploids per population
    #[arg(short = 'n', long, default_value = "1000")]
    pub population_size: u32,

    /// Number of generations
    #[arg(short = 'g', long, default_value = "1000")]
    pub generations: usize,

    /// Neutral mutation rate per gamete per generation
    #[arg(long, default_value = "0.001")]
    pub mu_neutral: f64,

    /// Selected mutation rate per gamete per generation
    #[arg(long, default_value = "0.0")]
    pub mu_selected: f64,

    /// Expected number of crossovers per meiosis
    #[arg(short = 'r', long, default_value = "0.0")]
    pub recombination_rate: f64,

    /// Standard deviation of environmental noise
    #[arg(long, default_value = "1.0")]
    pub sigma_e: f64,

    /// Trait optimum
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    pub optimum: f64,

    /// Strength of stabilizing selection (larger is weaker)
    #[arg(long, default_value = "1.0")]
    pub vs: f64,

    /// Probability of selfing
    #[arg(short = 'f', long, default_value = "0.0")]
    pub selfing_rate: f64,

    /// Number of independent populations
    #[arg(short = 'p', long, default_value = "1")]
    pub populations: usize,

    /// Record trajectories of selected mutations
    #[arg(long)]
    pub track: bool,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Configuration written by `qtevo init`
    #[arg(short, long, default_value = "qtevo.json")]
    pub config: PathBuf,

    /// Override random seed (default: use configured seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sample this many gametes per population and report Tajima's D
    #[arg(long)]
    pub nsam: Option<usize>,

    /// Write the JSON summary here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,
}
