//!
//! Common types shared by the quote simulator and the marquee renderer.
//!
//! This crate aggregates:
//! - `error`: unified error type `TickerError` used across the workspace.
//! - `result`: handy `Result<T, TickerError>` alias.
//! - `instrument`: `Instrument` rows and immutable `Snapshot`s.
//! - `seed`: seed entries, the reference instrument set and seed file parsing.
//! - `config`: mount configuration for the ticker component.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod instrument;
pub mod result;
pub mod seed;

pub use config::TickerConfig;
pub use error::TickerError;
pub use instrument::{Instrument, Snapshot};
pub use result::Result;
pub use seed::SeedEntry;
