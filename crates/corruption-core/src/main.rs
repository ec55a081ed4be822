//! Corruption Simulation Runner
//!
//! Runs the model for a number of generations and prints one line per
//! generation. Diagnostics go to stderr through `tracing`.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use corruption_core::{Config, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "corruption_sim")]
#[command(about = "Simulate the evolution of corruption across generations")]
struct Args {
    /// TOML file with [model] and [run] tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of generations to simulate (overrides the config file)
    #[arg(long)]
    generations: Option<u64>,

    /// Print each generation report as a JSON line
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    let seed = args.seed.unwrap_or(config.run.seed);
    let generations = args.generations.unwrap_or(config.run.generations);

    tracing::info!(
        seed,
        generations,
        population = config.model.population,
        theta = config.model.theta,
        "configuration loaded"
    );

    let mut sim = Simulation::new(config.model, seed)?;
    for _ in 0..generations {
        let report = sim.step()?;
        if args.json {
            println!("{}", report.to_json()?);
        } else {
            let a = &report.aggregates;
            println!(
                "[Gen {:>4}] agents {:>6}  q {:>8.4}  capital {:>10.3}  income {:>10.3}",
                report.generation,
                a.population,
                a.corruption_index,
                a.total_capital,
                a.national_income
            );
        }
    }

    tracing::info!(
        generations = sim.generation(),
        population = sim.population_size(),
        "simulation complete"
    );
    Ok(())
}
