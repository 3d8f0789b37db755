//! Quote simulator for the stock ticker marquee.
//!
//! This crate wires together the building blocks that advance the ticker:
//!
//! - `DeltaSource`: pluggable provider of per-tick price deltas. `UniformDelta`
//!   draws from `rand`, `FixedDeltas` replays a fixed sequence for golden tests.
//! - `QuoteSimulator`: owns the current `Snapshot` and produces a wholly new
//!   one on every tick, keeping symbol order and count intact.
//! - `Schedule`: runs the simulator on a timer thread and publishes each new
//!   snapshot, either to a callback or as `FeedEvent`s on a crossbeam channel.
//!   The returned `ScheduleHandle` cancels deterministically.
#![warn(missing_docs)]
pub mod model;
pub mod scheduler;

pub use model::delta::{DeltaSource, FixedDeltas, UniformDelta};
pub use model::simulator::QuoteSimulator;
pub use scheduler::{FeedEvent, Schedule, ScheduleHandle};
