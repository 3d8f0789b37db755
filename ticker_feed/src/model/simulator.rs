//! The quote simulator: Initialize and Tick.
//!
//! Prices follow an additive random walk: every tick each instrument receives a
//! delta rounded to cents, and its `change` shows that delta only. Nothing
//! accumulates apart from the price itself.

use std::sync::Arc;

use log::debug;
use ticker_common::Result;
use ticker_common::config::TickerConfig;
use ticker_common::instrument::{Instrument, Snapshot, format_change, round_cents};
use ticker_common::seed::{SeedEntry, validate_seed};

use crate::model::delta::DeltaSource;

/// Owns the current snapshot and the delta provider that advances it.
pub struct QuoteSimulator {
    current: Arc<Snapshot>,
    deltas: Box<dyn DeltaSource + Send>,
}

impl QuoteSimulator {
    /// Initialize from an ordered seed list.
    ///
    /// The seed must be non-empty with unique symbols; every instrument starts
    /// with the neutral change `+0.00`.
    pub fn new(seed: &[SeedEntry], deltas: Box<dyn DeltaSource + Send>) -> Result<Self> {
        validate_seed(seed)?;
        let instruments = seed.iter().map(Instrument::from_seed).collect();
        Ok(QuoteSimulator {
            current: Arc::new(Snapshot::new(0, instruments)),
            deltas,
        })
    }

    /// Initialize from a full mount configuration, validating interval and range too.
    pub fn from_config(
        config: &TickerConfig,
        deltas: Box<dyn DeltaSource + Send>,
    ) -> Result<Self> {
        config.validate()?;
        Self::new(&config.seed, deltas)
    }

    /// The most recently produced snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    /// Produce the snapshot that follows `previous`. `previous` is left untouched.
    pub fn tick(&mut self, previous: &Snapshot) -> Snapshot {
        let deltas = &mut self.deltas;
        let instruments = previous
            .instruments()
            .iter()
            .map(|instrument| {
                let delta = round_cents(deltas.next_delta());
                Instrument {
                    symbol: instrument.symbol.clone(),
                    price: instrument.price + delta,
                    change: format_change(delta),
                }
            })
            .collect();
        Snapshot::new(previous.sequence + 1, instruments)
    }

    /// Tick the current snapshot and make the result current.
    pub fn advance(&mut self) -> Arc<Snapshot> {
        let previous = Arc::clone(&self.current);
        let next = Arc::new(self.tick(&previous));
        debug!("Tick {}: {} instruments advanced", next.sequence, next.len());
        self.current = Arc::clone(&next);
        next
    }
}

impl std::fmt::Debug for QuoteSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteSimulator")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
