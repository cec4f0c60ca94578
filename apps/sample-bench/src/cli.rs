use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for the result table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table per stage
    Table,
    /// One CSV block per stage
    Csv,
    /// Whole result table as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dataset size multipliers (comma-separated)
    #[arg(short, long)]
    pub sizes: Option<String>,

    /// Number of query points for the point-wise stages
    #[arg(short, long)]
    pub points: Option<usize>,

    /// Seed for data generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Backends to compare (comma-separated)
    #[arg(short, long)]
    pub backends: Option<String>,

    /// Per-stage timeout in milliseconds
    #[arg(long)]
    pub stage_timeout_ms: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
