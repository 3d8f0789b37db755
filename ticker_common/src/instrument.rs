//! Instrument quotes and immutable snapshots.
//!
//! A `Snapshot` is the ordered set of all instruments at one point in time. The
//! order defines the horizontal render order of the marquee and never changes
//! between ticks. Snapshots are shared behind an `Arc` and replaced wholesale on
//! every tick; consumers detect change by pointer identity.

use chrono::Utc;
use serde::Serialize;

use crate::error::TickerError;
use crate::seed::SeedEntry;

/// Change string carried by every instrument before its first tick.
pub const NEUTRAL_CHANGE: &str = "+0.00";

/// Round a value to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a per-tick delta as a signed, two-decimal string.
///
/// Zero, including a negative zero produced by rounding, is rendered as `+0.00`.
pub fn format_change(delta: f64) -> String {
    let cents = round_cents(delta);
    if cents >= 0.0 {
        format!("+{:.2}", cents.abs())
    } else {
        format!("-{:.2}", cents.abs())
    }
}

/// One row of the ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instrument {
    /// Display symbol, unique within a snapshot.
    pub symbol: String,
    /// Current simulated price.
    pub price: f64,
    /// Signed delta applied on the most recent tick, e.g. `+1.25`.
    pub change: String,
}

impl Instrument {
    /// Creates an instrument from a seed entry with the neutral change.
    pub fn from_seed(entry: &SeedEntry) -> Self {
        Instrument {
            symbol: entry.symbol.clone(),
            price: entry.price,
            change: String::from(NEUTRAL_CHANGE),
        }
    }
}

/// Ordered, immutable set of instrument quotes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Zero for the initial snapshot, incremented by one per tick.
    pub sequence: u64,
    /// UTC timestamp in milliseconds since Unix epoch.
    pub timestamp: u64,
    instruments: Vec<Instrument>,
}

impl Snapshot {
    /// Builds a snapshot stamped with the current time.
    pub fn new(sequence: u64, instruments: Vec<Instrument>) -> Self {
        Snapshot {
            sequence,
            timestamp: Utc::now().timestamp_millis() as u64,
            instruments,
        }
    }

    /// Instruments in render order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Number of instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// True when the snapshot holds no instruments.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Symbols in render order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.instruments.iter().map(|i| i.symbol.as_str())
    }

    /// Check that `next` has the same length and symbol order as `self`.
    pub fn ensure_same_shape(&self, next: &Snapshot) -> Result<(), TickerError> {
        if self.len() != next.len() {
            return Err(TickerError::RenderInconsistency(format!(
                "snapshot {} has {} instruments, snapshot {} has {}",
                self.sequence,
                self.len(),
                next.sequence,
                next.len()
            )));
        }
        for (position, (before, after)) in self.symbols().zip(next.symbols()).enumerate() {
            if before != after {
                return Err(TickerError::RenderInconsistency(format!(
                    "symbol at position {} changed from {} to {}",
                    position, before, after
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument(symbol: &str, price: f64) -> Instrument {
        Instrument::from_seed(&SeedEntry::new(symbol, price))
    }

    #[test]
    fn change_is_signed_with_two_decimals() {
        assert_eq!(format_change(1.25), "+1.25");
        assert_eq!(format_change(-0.3), "-0.30");
        assert_eq!(format_change(2.5), "+2.50");
        assert_eq!(format_change(0.0), "+0.00");
    }

    #[test]
    fn negative_zero_is_formatted_as_positive() {
        assert_eq!(format_change(-0.0), "+0.00");
        assert_eq!(format_change(-0.004), "+0.00");
    }

    #[test]
    fn seeded_instrument_starts_neutral() {
        let aapl = instrument("AAPL", 170.12);
        assert_eq!(aapl.change, NEUTRAL_CHANGE);
        assert_eq!(aapl.price, 170.12);
    }

    #[test]
    fn shape_check_detects_length_drift() {
        let a = Snapshot::new(0, vec![instrument("AAPL", 1.0), instrument("MSFT", 2.0)]);
        let b = Snapshot::new(1, vec![instrument("AAPL", 1.0)]);
        assert!(matches!(
            a.ensure_same_shape(&b),
            Err(TickerError::RenderInconsistency(_))
        ));
    }

    #[test]
    fn shape_check_detects_reordering() {
        let a = Snapshot::new(0, vec![instrument("AAPL", 1.0), instrument("MSFT", 2.0)]);
        let b = Snapshot::new(1, vec![instrument("MSFT", 2.0), instrument("AAPL", 1.0)]);
        assert!(a.ensure_same_shape(&b).is_err());
        assert!(a.ensure_same_shape(&a.clone()).is_ok());
    }
}
