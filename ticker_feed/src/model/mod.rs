//! Simulation model.
//!
//! - `delta`: random and fixed per-tick delta providers.
//! - `simulator`: `QuoteSimulator`, the Initialize and Tick operations.

pub mod delta;
pub mod simulator;
