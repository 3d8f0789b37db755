//! Per-tick price delta providers.
//!
//! The simulator never touches a random number generator directly; it asks a
//! `DeltaSource` for the next raw delta and rounds it to cents itself. Tests and
//! golden scenarios substitute `FixedDeltas` for `UniformDelta`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ticker_common::TickerError;

/// Source of raw price deltas, one per instrument per tick.
pub trait DeltaSource {
    /// Next raw delta. The simulator rounds it to two decimals.
    fn next_delta(&mut self) -> f64;
}

/// Uniform random deltas in `[-max_delta, +max_delta]`.
pub struct UniformDelta {
    rng: StdRng,
    max_delta: f64,
}

impl UniformDelta {
    /// Seed the generator from the operating system.
    ///
    /// Fails with a configuration error when the OS random source is
    /// unavailable or the range is not a finite positive number.
    pub fn from_os(max_delta: f64) -> Result<Self, TickerError> {
        check_range(max_delta)?;
        let rng =
            StdRng::try_from_os_rng().map_err(|e| TickerError::RandomSource(e.to_string()))?;
        Ok(UniformDelta { rng, max_delta })
    }

    /// Deterministic generator for reproducible runs.
    pub fn from_seed(max_delta: f64, seed: u64) -> Result<Self, TickerError> {
        check_range(max_delta)?;
        Ok(UniformDelta {
            rng: StdRng::seed_from_u64(seed),
            max_delta,
        })
    }
}

fn check_range(max_delta: f64) -> Result<(), TickerError> {
    if max_delta.is_finite() && max_delta > 0.0 {
        Ok(())
    } else {
        Err(TickerError::InvalidDeltaRange(max_delta))
    }
}

impl DeltaSource for UniformDelta {
    fn next_delta(&mut self) -> f64 {
        self.rng.random_range(-self.max_delta..=self.max_delta)
    }
}

/// Replays a fixed delta sequence, starting over when exhausted.
pub struct FixedDeltas {
    deltas: Vec<f64>,
    position: usize,
}

impl FixedDeltas {
    /// Creates a replaying source. An empty sequence yields zero deltas.
    pub fn new(deltas: Vec<f64>) -> Self {
        FixedDeltas {
            deltas,
            position: 0,
        }
    }
}

impl DeltaSource for FixedDeltas {
    fn next_delta(&mut self) -> f64 {
        if self.deltas.is_empty() {
            return 0.0;
        }
        let delta = self.deltas[self.position];
        self.position = (self.position + 1) % self.deltas.len();
        delta
    }
}
