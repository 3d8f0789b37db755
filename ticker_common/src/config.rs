//! Mount configuration for the ticker component.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the reference twelve instrument set ticking every two seconds with
//! deltas drawn from `[-2.50, +2.50]`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::TickerError;
use crate::seed::{SeedEntry, reference_seed, validate_seed};

/// Default tick cadence in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 2000;
/// Default bound of the per-tick delta.
pub const DEFAULT_MAX_DELTA: f64 = 2.5;

/// Static configuration supplied by the hosting page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Instruments in render order.
    #[serde(default = "reference_seed")]
    pub seed: Vec<SeedEntry>,
    /// Tick cadence in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Deltas are drawn uniformly from `[-max_delta, +max_delta]`.
    #[serde(default = "default_max_delta")]
    pub max_delta: f64,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

fn default_max_delta() -> f64 {
    DEFAULT_MAX_DELTA
}

impl Default for TickerConfig {
    fn default() -> Self {
        TickerConfig {
            seed: reference_seed(),
            interval_ms: DEFAULT_INTERVAL_MS,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }
}

impl TickerConfig {
    /// Decode a config from JSON. Malformed input is a configuration error.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, TickerError> {
        serde_json::from_reader(reader).map_err(|e| TickerError::InvalidConfig(e.to_string()))
    }

    /// Load a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, TickerError> {
        debug!("Loading ticker config from {}", path.display());
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Tick cadence as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Validate the seed, the interval and the delta range.
    pub fn validate(&self) -> Result<(), TickerError> {
        validate_seed(&self.seed)?;
        if self.interval_ms == 0 {
            return Err(TickerError::InvalidInterval);
        }
        if !self.max_delta.is_finite() || self.max_delta <= 0.0 {
            return Err(TickerError::InvalidDeltaRange(self.max_delta));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_object_yields_defaults() {
        let config = TickerConfig::from_json_reader("{}".as_bytes()).unwrap();
        assert_eq!(config, TickerConfig::default());
        assert_eq!(config.interval(), Duration::from_millis(2000));
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let json = r#"{"seed":[{"symbol":"AAPL","price":170.12}],"interval_ms":500}"#;
        let config = TickerConfig::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(config.seed, vec![SeedEntry::new("AAPL", 170.12)]);
        assert_eq!(config.interval_ms, 500);
        assert_eq!(config.max_delta, DEFAULT_MAX_DELTA);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = TickerConfig {
            interval_ms: 0,
            ..TickerConfig::default()
        };
        assert!(matches!(config.validate(), Err(TickerError::InvalidInterval)));
    }

    #[test]
    fn bad_delta_range_is_rejected() {
        for max_delta in [0.0, -1.0, f64::INFINITY] {
            let config = TickerConfig {
                max_delta,
                ..TickerConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(TickerError::InvalidDeltaRange(_))
            ));
        }
    }

    #[test]
    fn malformed_json_is_a_configuration_error() {
        let err = TickerConfig::from_json_reader("{\"interval_ms\":\"fast\"}".as_bytes())
            .unwrap_err();
        assert!(matches!(err, TickerError::InvalidConfig(_)));
        assert!(err.is_configuration());
    }
}
