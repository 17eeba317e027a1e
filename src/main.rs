use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use estate_arena::engine::arena::run_trials;
use estate_arena::engine::config::SimConfig;

#[derive(Parser)]
#[command(
    name = "estate-arena",
    about = "Run seeded property-trading strategy experiments"
)]
struct Cli {
    /// Number of independent matches to play
    #[arg(long)]
    trials: Option<usize>,

    /// Base random seed; trial i plays on seed + i
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Round cap per match
    #[arg(long)]
    round_limit: Option<u32>,

    /// Path to a simulation config TOML (default: built-in catalog)
    #[arg(long, env = "ESTATE_ARENA_CONFIG")]
    config: Option<PathBuf>,

    /// Run trials across all cores
    #[arg(long)]
    parallel: bool,

    /// Emit the per-turn narrative log
    #[arg(long)]
    narrate: bool,

    /// Print the aggregate report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(trials) = cli.trials {
        config.trials = trials;
    }
    if let Some(round_limit) = cli.round_limit {
        config.round_limit = round_limit;
    }
    if cli.parallel {
        config.parallel = true;
    }

    let total = config.trials;
    let progress = move |done: usize, _total: usize| {
        eprint!("\r  [{}/{}] matches played", done, total);
    };

    let result = run_trials(&config, cli.seed, cli.narrate, Some(&progress))?;
    eprintln!("\r                                    ");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.summary());
    }

    Ok(())
}
