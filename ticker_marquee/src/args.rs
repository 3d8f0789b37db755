//! Command-line arguments for the ticker host.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strum_macros::Display;
use ticker_common::seed::SeedParser;
use ticker_common::{Result, SeedEntry, TickerConfig};

/// How rendered strips are written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// One line per render.
    Text,
    /// Animated marquee on a single terminal line.
    Scroll,
    /// Standalone HTML page per render.
    Html,
    /// One JSON object per render.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON config file with `seed`, `interval_ms` and `max_delta`.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Seed file with one `SYMBOL,PRICE` per line. Overrides the config seed.
    #[clap(long)]
    pub seed_file: Option<PathBuf>,

    /// Tick interval in milliseconds.
    #[clap(long)]
    pub interval_ms: Option<u64>,

    /// Largest absolute per-tick price delta.
    #[clap(long)]
    pub max_delta: Option<f64>,

    /// Seed for the random delta source, for reproducible runs.
    #[clap(long)]
    pub rng_seed: Option<u64>,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// File rewritten on every render (html format only).
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Unmount after this many renders, the initial one included.
    #[clap(long)]
    pub renders: Option<usize>,

    /// Host loop cadence in milliseconds; one scroll step per frame.
    #[clap(long, default_value_t = 150)]
    pub frame_ms: u64,

    /// Visible width of the scrolling marquee in characters.
    #[clap(long, default_value_t = 80)]
    pub width: usize,
}

impl Args {
    /// Build the mount configuration: config file or defaults, then CLI overrides.
    pub fn resolve_config(&self) -> Result<TickerConfig> {
        let mut config = match &self.config {
            Some(path) => TickerConfig::from_path(path)?,
            None => TickerConfig::default(),
        };
        if let Some(path) = &self.seed_file {
            let file = File::open(path)?;
            config.seed = SeedEntry::parse_seed(BufReader::new(file))?;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
        if let Some(max_delta) = self.max_delta {
            config.max_delta = max_delta;
        }
        Ok(config)
    }
}
