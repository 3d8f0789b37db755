//! Pure rendering of a snapshot into a seamlessly looping strip.
//!
//! The strip holds the snapshot's instruments twice, end to end. Translating it
//! horizontally by exactly one sequence-width then lands on a frame identical to
//! the starting one, so the scroll can repeat without a visible seam.

use serde::Serialize;
use strum_macros::Display;
use ticker_common::{Instrument, Snapshot};

/// Style classification of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    /// Change starts with `+`.
    Positive,
    /// Anything else.
    Negative,
}

impl Trend {
    /// Classify a raw change string.
    pub fn of(change: &str) -> Self {
        if change.starts_with('+') {
            Trend::Positive
        } else {
            Trend::Negative
        }
    }
}

/// One rendered instrument cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripItem {
    /// Instrument symbol.
    pub symbol: String,
    /// Price with two decimals.
    pub price: String,
    /// Raw signed change string.
    pub change: String,
    /// Styling class derived from `change`.
    pub trend: Trend,
}

impl From<&Instrument> for StripItem {
    fn from(instrument: &Instrument) -> Self {
        StripItem {
            symbol: instrument.symbol.clone(),
            price: format!("{:.2}", instrument.price),
            change: instrument.change.clone(),
            trend: Trend::of(&instrument.change),
        }
    }
}

/// The visual strip: one snapshot laid out twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Strip {
    items: Vec<StripItem>,
}

impl Strip {
    /// Empty strip shown when the ticker could not start.
    pub fn placeholder() -> Self {
        Strip::default()
    }

    /// All cells, both copies.
    pub fn items(&self) -> &[StripItem] {
        &self.items
    }

    /// A single copy of the sequence, the width one scroll period covers.
    pub fn sequence(&self) -> &[StripItem] {
        &self.items[..self.items.len() / 2]
    }

    /// Number of cells, both copies.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True for the placeholder.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Concatenate a sequence with itself, preserving order.
pub fn duplicate_for_loop<T: Clone>(sequence: &[T]) -> Vec<T> {
    let mut doubled = Vec::with_capacity(sequence.len() * 2);
    doubled.extend_from_slice(sequence);
    doubled.extend_from_slice(sequence);
    doubled
}

/// Render a snapshot into its looping strip.
pub fn render(snapshot: &Snapshot) -> Strip {
    let cells: Vec<StripItem> = snapshot.instruments().iter().map(StripItem::from).collect();
    Strip {
        items: duplicate_for_loop(&cells),
    }
}
