//! Output targets for rendered strips.
//!
//! A `RenderSink` receives every newly rendered strip. Sinks that animate
//! (`ScrollSink`) also receive a `frame` call on every cadence step of the
//! host loop, whether or not a new strip arrived.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use log::debug;
use ticker_common::Result;

use crate::html::document;
use crate::strip::Strip;
use crate::terminal::{render_line, viewport};

/// Destination of rendered strips.
pub trait RenderSink {
    /// Present a freshly rendered strip.
    fn draw(&mut self, strip: &Strip) -> Result<()>;

    /// Advance animation by one step.
    fn frame(&mut self) -> Result<()> {
        Ok(())
    }

    /// Flush any trailing output once the marquee is gone.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one text line per render holding a single copy of the sequence.
pub struct LineSink<W: Write> {
    out: W,
}

impl<W: Write> LineSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        LineSink { out }
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> RenderSink for LineSink<W> {
    fn draw(&mut self, strip: &Strip) -> Result<()> {
        writeln!(self.out, "{}", render_line(strip.sequence()).trim_end())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Terminal marquee: redraws a fixed-width window over the doubled strip,
/// moving one character per frame.
pub struct ScrollSink<W: Write> {
    out: W,
    line: String,
    offset: usize,
    width: usize,
}

impl<W: Write> ScrollSink<W> {
    /// Wrap a writer; `width` is the visible window in characters.
    pub fn new(out: W, width: usize) -> Self {
        ScrollSink {
            out,
            line: String::new(),
            offset: 0,
            width,
        }
    }

    /// Current scroll position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn paint(&mut self) -> Result<()> {
        write!(self.out, "\r{}", viewport(&self.line, self.offset, self.width))?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> RenderSink for ScrollSink<W> {
    fn draw(&mut self, strip: &Strip) -> Result<()> {
        // Scroll position survives price updates.
        self.line = render_line(strip.items());
        self.paint()
    }

    fn frame(&mut self) -> Result<()> {
        self.offset = self.offset.wrapping_add(1);
        self.paint()
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }
}

/// Writes a full HTML document per render.
pub struct HtmlSink<W: Write> {
    out: W,
}

impl<W: Write> HtmlSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        HtmlSink { out }
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> RenderSink for HtmlSink<W> {
    fn draw(&mut self, strip: &Strip) -> Result<()> {
        self.out.write_all(document(strip).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Rewrites an HTML file on every render.
pub struct HtmlFileSink {
    path: PathBuf,
}

impl HtmlFileSink {
    /// Target file; created or truncated on every render.
    pub fn new(path: PathBuf) -> Self {
        HtmlFileSink { path }
    }
}

impl RenderSink for HtmlFileSink {
    fn draw(&mut self, strip: &Strip) -> Result<()> {
        fs::write(&self.path, document(strip))?;
        debug!("Wrote {} cells to {}", strip.len(), self.path.display());
        Ok(())
    }
}

/// Writes each strip as one JSON line.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        JsonSink { out }
    }

    /// The wrapped writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

impl<W: Write> RenderSink for JsonSink<W> {
    fn draw(&mut self, strip: &Strip) -> Result<()> {
        serde_json::to_writer(&mut self.out, strip)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::render;
    use ticker_common::{Instrument, Snapshot};

    fn strip() -> Strip {
        render(&Snapshot::new(
            1,
            vec![
                Instrument {
                    symbol: "AAPL".into(),
                    price: 171.37,
                    change: "+1.25".into(),
                },
                Instrument {
                    symbol: "MSFT".into(),
                    price: 370.65,
                    change: "-0.30".into(),
                },
            ],
        ))
    }

    #[test]
    fn line_sink_prints_one_copy() {
        let mut sink = LineSink::new(Vec::new());
        sink.draw(&strip()).unwrap();
        let text = String::from_utf8(sink.get_ref().clone()).unwrap();
        assert_eq!(text, "AAPL 171.37 +1.25   MSFT 370.65 -0.30\n");
    }

    #[test]
    fn scroll_sink_advances_one_character_per_frame() {
        let mut sink = ScrollSink::new(Vec::new(), 4);
        sink.draw(&strip()).unwrap();
        sink.frame().unwrap();
        sink.frame().unwrap();
        assert_eq!(sink.offset(), 2);
        let text = String::from_utf8(sink.get_ref().clone()).unwrap();
        assert_eq!(text, "\rAAPL\rAPL \rPL 1");
    }

    #[test]
    fn json_sink_emits_cells() {
        let mut sink = JsonSink::new(Vec::new());
        sink.draw(&strip()).unwrap();
        let text = String::from_utf8(sink.get_ref().clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        let items = value["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[1]["trend"], "negative");
        assert_eq!(items[2]["symbol"], "AAPL");
    }

    #[test]
    fn html_sink_writes_a_document() {
        let mut sink = HtmlSink::new(Vec::new());
        sink.draw(&strip()).unwrap();
        let text = String::from_utf8(sink.get_ref().clone()).unwrap();
        assert!(text.contains("<span class=\"stock-price\">370.65</span>"));
    }
}
