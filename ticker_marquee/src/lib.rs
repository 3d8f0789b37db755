//! Marquee renderer for the stock ticker.
//!
//! - `strip`: pure rendering: duplicate-for-seamless-loop, price formatting, trend
//!   classification.
//! - `html`: markup and the looping CSS animation for embedding in a page.
//! - `terminal`: plain-text line and scrolling viewport.
//! - `sink`: `RenderSink` trait and its text, scroll, HTML and JSON targets.
//! - `marquee`: the mounted component that subscribes to the quote simulator.
#![warn(missing_docs)]
pub mod html;
pub mod marquee;
pub mod sink;
pub mod strip;
pub mod terminal;

pub use marquee::{Marquee, MarqueeState};
pub use sink::RenderSink;
pub use strip::{Strip, StripItem, Trend, duplicate_for_loop, render};
