// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "scoretree", version, about = "Historical compliance-score rollup reporter")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = "scoretree.toml")]
    pub config: PathBuf,

    /// Optional allow-list of organizations and projects to fetch
    #[arg(long, value_name = "FILE")]
    pub includes: Option<PathBuf>,

    /// Username override (otherwise taken from the config file)
    #[arg(long, short)]
    pub username: Option<String>,

    /// Password override (otherwise taken from the config file)
    #[arg(long, short)]
    pub password: Option<String>,

    /// Maximum requests per throttle window
    #[arg(long, short, default_value_t = 5)]
    pub requests: usize,

    /// Throttle window length in milliseconds
    #[arg(long, short, default_value_t = 5000)]
    pub milliseconds: u64,

    /// Include the current month/day as the newest reporting period
    #[arg(long)]
    pub current: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}
