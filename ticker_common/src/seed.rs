//! Seed instruments used to bootstrap the simulator.

use std::collections::HashSet;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::TickerError;

/// Largest accepted seed price. Cent-sized deltas stay exact in an `f64` well
/// past this value.
pub const MAX_SEED_PRICE: f64 = 1e12;

/// Initial configuration of a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedEntry {
    /// Display symbol.
    pub symbol: String,
    /// Opening price.
    pub price: f64,
}

impl SeedEntry {
    /// Creates a new seed entry.
    pub fn new(symbol: &str, price: f64) -> Self {
        SeedEntry {
            symbol: String::from(symbol),
            price,
        }
    }
}

/// The baked-in twelve instrument reference set.
pub fn reference_seed() -> Vec<SeedEntry> {
    [
        ("AAPL", 170.12),
        ("MSFT", 370.95),
        ("GOOGL", 133.45),
        ("AMZN", 145.80),
        ("NVDA", 475.69),
        ("TSLA", 240.02),
        ("META", 330.17),
        ("S&P 500", 4783.83),
        ("NASDAQ", 15099.18),
        ("DOW 30", 37557.92),
        ("NIKKEI 225", 33219.39),
        ("FTSE 100", 7614.48),
    ]
    .iter()
    .map(|(symbol, price)| SeedEntry::new(symbol, *price))
    .collect()
}

/// Check that a seed list is usable: non-empty, unique non-blank symbols,
/// finite positive prices no larger than `MAX_SEED_PRICE`.
pub fn validate_seed(seed: &[SeedEntry]) -> Result<(), TickerError> {
    if seed.is_empty() {
        return Err(TickerError::EmptySeed);
    }
    let mut seen = HashSet::with_capacity(seed.len());
    for entry in seed {
        if entry.symbol.trim().is_empty() {
            return Err(TickerError::InvalidSeed(String::from("blank symbol")));
        }
        if !entry.price.is_finite() || entry.price <= 0.0 || entry.price > MAX_SEED_PRICE {
            return Err(TickerError::InvalidSeed(format!(
                "{} has price {}",
                entry.symbol, entry.price
            )));
        }
        if !seen.insert(entry.symbol.as_str()) {
            return Err(TickerError::DuplicateSymbol(entry.symbol.clone()));
        }
    }
    Ok(())
}

/// Trait providing file parsing for seed lists.
pub trait SeedParser {
    /// Parses seed entries from a buffered reader.
    ///
    /// Each non-empty line holds `SYMBOL,PRICE`. Lines starting with `#` are
    /// comments. Returns an error naming the first line that cannot be parsed.
    fn parse_seed<R: BufRead>(reader: R) -> Result<Vec<SeedEntry>, TickerError>;
}

impl SeedParser for SeedEntry {
    fn parse_seed<R: BufRead>(reader: R) -> Result<Vec<Self>, TickerError> {
        let mut entries = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            let (symbol, price) =
                trimmed_line
                    .rsplit_once(',')
                    .ok_or_else(|| TickerError::InvalidSeedLine {
                        line: index + 1,
                        reason: String::from("expected SYMBOL,PRICE"),
                    })?;
            let price: f64 = price
                .trim()
                .parse()
                .map_err(|e| TickerError::InvalidSeedLine {
                    line: index + 1,
                    reason: format!("bad price {:?}: {}", price.trim(), e),
                })?;
            entries.push(SeedEntry::new(symbol.trim(), price));
        }
        Ok(entries)
    }
}
