//! Latency comparison of ordered sample storage backends.
//!
//! For each dataset size, every selected backend runs the same stage
//! sequence (prepare, bulk, insert, findOne, range, remove) and the
//! timings are printed as one table per stage.

mod cli;
mod datagen;
mod report;
mod utils;

use anyhow::Context;
use clap::Parser;
use sample_store_core::aggregate::ResultAggregator;
use sample_store_core::backend;
use sample_store_core::config::BenchConfig;
use sample_store_core::runner::{BenchmarkRunner, Dataset};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::datagen::SampleGenerator;

/// Loads the configuration file, if any, and applies command-line overrides.
fn build_config(cli: &Cli) -> anyhow::Result<BenchConfig> {
    let mut config = match &cli.config {
        Some(path) => BenchConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BenchConfig::default(),
    };

    if let Some(sizes) = &cli.sizes {
        config.sizes = utils::parse_comma_separated(sizes)?;
    }
    if let Some(points) = cli.points {
        config.query_points = points;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(backends) = &cli.backends {
        config.backends = utils::parse_names(backends);
    }
    if cli.stage_timeout_ms.is_some() {
        config.stage_timeout_ms = cli.stage_timeout_ms;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so CSV/JSON output stays clean
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&cli)?;
    let backends = backend::create_all(&config.backends)?;
    let runner = BenchmarkRunner::new(&config);

    let mut generator = SampleGenerator::new(&config);
    let points = generator.query_points(config.query_points);
    let mut aggregator = ResultAggregator::new();

    for &times in &config.sizes {
        let seed = generator.seed_set(times);
        let dataset = Dataset::new(
            seed,
            points.clone(),
            config.lower_bound,
            config.upper_bound,
        );
        tracing::info!(
            "Size x{}: {} seed records, {} backends",
            times,
            dataset.seed().len(),
            backends.len()
        );
        let records = runner.run_all(&backends, &dataset).await;
        for record in records.iter().filter(|record| record.is_degraded()) {
            tracing::warn!("{} produced no timings at size x{}", record.name, times);
        }
        aggregator.record(times, records);
    }

    println!("{}", report::render(&aggregator.table(), cli.format)?);
    Ok(())
}
