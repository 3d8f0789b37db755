//! Error types shared by the simulator and the marquee.
//!
//! The `TickerError` enum unifies configuration failures detected at mount time,
//! the fatal render invariant violation, and the I/O and JSON failures of the
//! config layer and output sinks, allowing crates to propagate a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by the simulator and the marquee.
#[derive(Error, Debug)]
pub enum TickerError {
    /// The seed list contains no instruments.
    #[error("Configuration error: seed list is empty")]
    EmptySeed,

    /// The same symbol appears more than once in the seed list.
    #[error("Configuration error: duplicate symbol in seed: {0}")]
    DuplicateSymbol(String),

    /// A seed entry is unusable (blank symbol, non-finite or non-positive price).
    #[error("Configuration error: invalid seed entry: {0}")]
    InvalidSeed(String),

    /// A line of a seed file could not be parsed.
    #[error("Configuration error: seed file line {line}: {reason}")]
    InvalidSeedLine {
        /// One-based line number in the seed file.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// A config file could not be decoded.
    #[error("Configuration error: invalid config file: {0}")]
    InvalidConfig(String),

    /// Tick interval must be strictly positive.
    #[error("Configuration error: tick interval must be greater than zero")]
    InvalidInterval,

    /// Delta range must be a finite positive number.
    #[error("Configuration error: invalid delta range: {0}")]
    InvalidDeltaRange(f64),

    /// The random source could not be seeded.
    #[error("Configuration error: random source unavailable: {0}")]
    RandomSource(String),

    /// Snapshot length or symbol order drifted between ticks.
    #[error("Render inconsistency: {0}")]
    RenderInconsistency(String),

    /// I/O error from config files, seed files or output sinks.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl TickerError {
    /// Returns `true` for errors that stop the simulator from starting.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TickerError::EmptySeed
                | TickerError::DuplicateSymbol(_)
                | TickerError::InvalidSeed(_)
                | TickerError::InvalidSeedLine { .. }
                | TickerError::InvalidConfig(_)
                | TickerError::InvalidInterval
                | TickerError::InvalidDeltaRange(_)
                | TickerError::RandomSource(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_grouped() {
        assert!(TickerError::EmptySeed.is_configuration());
        assert!(TickerError::DuplicateSymbol("AAPL".into()).is_configuration());
        assert!(TickerError::InvalidDeltaRange(0.0).is_configuration());
        assert!(TickerError::InvalidConfig("eof".into()).is_configuration());
        assert!(!TickerError::RenderInconsistency("len".into()).is_configuration());
    }

    #[test]
    fn seed_line_error_names_the_line() {
        let err = TickerError::InvalidSeedLine {
            line: 3,
            reason: "missing price".into(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: seed file line 3: missing price"
        );
    }
}
