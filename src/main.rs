use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gridfit::{Dataset, SweepConfig};

/// Train the digit classifier across a hyperparameter grid and print the
/// per-epoch loss curves as JSON.
#[derive(Debug, Parser)]
#[command(name = "gridfit", version)]
struct Cli {
    /// TOML sweep config; defaults to the stock 3x4x3 grid
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of examples in the built-in separable toy dataset
    #[arg(long, default_value_t = 200)]
    examples: usize,

    /// Override the epoch budget
    #[arg(long)]
    epochs: Option<usize>,

    /// Override the initialization seed
    #[arg(long)]
    seed: Option<u64>,

    /// Train configurations concurrently
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gridfit=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => SweepConfig::load(path)
            .with_context(|| format!("loading sweep config {}", path.display()))?,
        None => SweepConfig::default(),
    };
    if let Some(epochs) = cli.epochs {
        cfg.epochs = epochs;
    }
    if let Some(seed) = cli.seed {
        cfg.seed = seed;
    }
    cfg.parallel |= cli.parallel;

    let runner = cfg.runner()?;
    let data = Dataset::separable_toy(cli.examples)?;
    let result = if cfg.parallel {
        runner.run_parallel(&data)?
    } else {
        runner.run(&data)?
    };

    println!("{}", result.to_json()?);
    Ok(())
}
