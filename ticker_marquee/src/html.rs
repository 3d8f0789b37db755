//! HTML markup and CSS for embedding the strip in a page.
//!
//! The markup keeps the class names of the hosting page's stylesheet:
//! `stock-ticker-container` > `stock-ticker` > `stock-item`, each item holding
//! `stock-symbol`, `stock-price` and `stock-change positive|negative` spans.

use crate::strip::Strip;

/// Marquee stylesheet. The strip moves by `-50%`, exactly one sequence-width.
pub const MARQUEE_CSS: &str = "\
.stock-ticker-container { width: 100%; overflow: hidden; white-space: nowrap; }
.stock-ticker {
  display: inline-flex;
  animation: stock-ticker-scroll 40s linear infinite;
}
.stock-item { display: inline-flex; gap: 0.5rem; padding: 0 1.5rem; font-family: monospace; }
.stock-symbol { font-weight: 600; }
.stock-change.positive { color: #16a34a; }
.stock-change.negative { color: #dc2626; }
@keyframes stock-ticker-scroll {
  from { transform: translateX(0); }
  to { transform: translateX(-50%); }
}
";

/// Escape text for use inside an element or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for the ticker region. An empty strip yields an empty container.
pub fn render_html(strip: &Strip) -> String {
    let mut html = String::from("<div class=\"stock-ticker-container\">\n");
    html.push_str("  <div class=\"stock-ticker\">\n");
    for item in strip.items() {
        html.push_str("    <div class=\"stock-item\">");
        html.push_str(&format!("<span class=\"stock-symbol\">{}</span>", escape(&item.symbol)));
        html.push_str(&format!("<span class=\"stock-price\">{}</span>", escape(&item.price)));
        html.push_str(&format!(
            "<span class=\"stock-change {}\">{}</span>",
            item.trend,
            escape(&item.change)
        ));
        html.push_str("</div>\n");
    }
    html.push_str("  </div>\n</div>");
    html
}

/// Standalone page holding the stylesheet and the ticker region.
pub fn document(strip: &Strip) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <style>\n{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        MARQUEE_CSS,
        render_html(strip)
    )
}
