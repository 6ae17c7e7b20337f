use std::path::PathBuf;

use clap::Parser;

/// Simulates a concert ticket on-sale and prints a sales report.
#[derive(Debug, Clone, Parser)]
#[command(name = "encore", version)]
pub struct Cli {
    /// Directory holding layered config files (default/{RUN_MODE}/local)
    #[arg(short = 'c', long, default_value = "config")]
    pub config_dir: PathBuf,

    /// Number of tickets in the pool
    #[arg(long)]
    pub tickets: Option<u32>,

    /// Flat ticket price in whole pesos; skips the random draw between
    /// the configured price bounds
    #[arg(long)]
    pub price: Option<i64>,

    /// Venue capacity
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Payment gateway success probability in [0, 1]
    #[arg(long)]
    pub success_rate: Option<f64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
