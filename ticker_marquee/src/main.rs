//! Ticker host: mounts the stock ticker marquee and draws it to stdout.
//!
//! The host stands in for the page that embeds the ticker: it resolves the mount
//! configuration from a JSON file, a seed file and flags, mounts the marquee on
//! the chosen output sink, drives the render loop, and unmounts on Ctrl+C or
//! once the requested number of renders has been drawn.
//!
//! Usage example (CLI):
//! ```bash
//! ticker --format scroll --interval-ms 1000 --width 100
//! ticker --seed-file ./seed.txt --format html --output ticker.html --renders 10
//! ```
//!
//! Logs go to stderr (`RUST_LOG` overrides the `info` default); stdout carries
//! rendered output only.
#![warn(missing_docs)]
mod args;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};
use ticker_common::{Result, TickerError};
use ticker_feed::UniformDelta;
use ticker_marquee::sink::{HtmlFileSink, HtmlSink, JsonSink, LineSink, ScrollSink};
use ticker_marquee::{Marquee, RenderSink};

use crate::args::{Args, OutputFormat};

fn main() -> Result<(), TickerError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            info!("Ctrl+C received. Unmounting ticker...");
            shutdown.store(true, Ordering::SeqCst);
        }) {
            warn!("Ctrl+C handler unavailable: {}", e);
        }
    }

    match (args.format, &args.output) {
        (OutputFormat::Text, _) => host(&args, LineSink::new(io::stdout()), &shutdown),
        (OutputFormat::Scroll, _) => {
            host(&args, ScrollSink::new(io::stdout(), args.width), &shutdown)
        }
        (OutputFormat::Html, Some(path)) => host(&args, HtmlFileSink::new(path.clone()), &shutdown),
        (OutputFormat::Html, None) => host(&args, HtmlSink::new(io::stdout()), &shutdown),
        (OutputFormat::Json, _) => host(&args, JsonSink::new(io::stdout()), &shutdown),
    }
}

/// Resolve the configuration and mount on `sink`.
///
/// Configuration errors, from the config or seed file as much as from the
/// resolved values, leave a placeholder marquee carrying the fault.
fn mount<S: RenderSink>(args: &Args, sink: S) -> Result<Marquee<S>, TickerError> {
    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) if e.is_configuration() => return Marquee::placeholder(e, sink),
        Err(e) => return Err(e),
    };
    info!(
        "Ticker config: {} instruments, interval {} ms, max delta {}",
        config.seed.len(),
        config.interval_ms,
        config.max_delta
    );

    match args.rng_seed {
        Some(seed) => match UniformDelta::from_seed(config.max_delta, seed) {
            Ok(deltas) => Marquee::mount_with(&config, Box::new(deltas), sink),
            Err(e) => Marquee::placeholder(e, sink),
        },
        None => Marquee::mount(&config, sink),
    }
}

/// Mount on `sink`, run until shutdown or the render limit, then unmount.
///
/// A placeholder marquee is drawn once and the host exits cleanly.
fn host<S: RenderSink>(args: &Args, sink: S, shutdown: &AtomicBool) -> Result<(), TickerError> {
    let mut marquee = mount(args, sink)?;
    if marquee.fault().is_some() {
        marquee.unmount();
        return marquee.sink_mut().finish();
    }

    let frame = Duration::from_millis(args.frame_ms.max(1));
    let result = marquee.run_until(shutdown, frame, args.renders);
    if let Err(e) = &result {
        error!("Ticker stopped: {}", e);
    }
    marquee.sink_mut().finish()?;
    result
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use ticker_marquee::Strip;

    #[derive(Default)]
    struct Recorder {
        strips: Vec<Strip>,
        finished: bool,
    }

    impl RenderSink for Recorder {
        fn draw(&mut self, strip: &Strip) -> Result<()> {
            self.strips.push(strip.clone());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn seed_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ticker-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    fn args_with_seed(path: &Path) -> Args {
        Args::parse_from([
            String::from("ticker"),
            String::from("--seed-file"),
            path.display().to_string(),
        ])
    }

    #[test]
    fn malformed_seed_file_mounts_placeholder() {
        let path = seed_file("malformed.txt", "AAPL 170.12\n");
        let marquee = mount(&args_with_seed(&path), Recorder::default()).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(matches!(
            marquee.fault(),
            Some(TickerError::InvalidSeedLine { line: 1, .. })
        ));
        assert_eq!(marquee.sink().strips, vec![Strip::placeholder()]);
    }

    #[test]
    fn malformed_config_file_mounts_placeholder() {
        let path = seed_file("config.json", "{\"interval_ms\": \"fast\"}");
        let args = Args::parse_from([
            String::from("ticker"),
            String::from("--config"),
            path.display().to_string(),
        ]);
        let marquee = mount(&args, Recorder::default()).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(matches!(marquee.fault(), Some(TickerError::InvalidConfig(_))));
        assert_eq!(marquee.sink().strips, vec![Strip::placeholder()]);
    }

    #[test]
    fn duplicate_symbols_exit_cleanly_after_placeholder() {
        let path = seed_file("duplicate.txt", "AAPL,170.12\nAAPL,171.00\n");
        let args = args_with_seed(&path);
        let shutdown = AtomicBool::new(false);
        let result = host(&args, Recorder::default(), &shutdown);
        fs::remove_file(&path).unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn missing_seed_file_is_still_an_error() {
        let args = Args::parse_from(["ticker", "--seed-file", "/nonexistent/seed.txt"]);
        assert!(matches!(
            mount(&args, Recorder::default()),
            Err(TickerError::Io(_))
        ));
    }
}
