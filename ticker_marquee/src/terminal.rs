//! Plain-text forms of the strip for terminals.

use crate::strip::StripItem;

/// Gap between cells. Also trails the last cell so two copies join seamlessly.
pub const CELL_GAP: &str = "   ";

/// One line with a `SYMBOL PRICE CHANGE` cell per item.
pub fn render_line(items: &[StripItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} {} {}{}", item.symbol, item.price, item.change, CELL_GAP))
        .collect()
}

/// Window of `width` characters into a doubled line, starting `offset`
/// characters in. The offset wraps every half line, so consecutive offsets
/// scroll forever without a seam.
pub fn viewport(line: &str, offset: usize, width: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return " ".repeat(width);
    }
    let period = (chars.len() / 2).max(1);
    chars
        .iter()
        .cycle()
        .skip(offset % period)
        .take(width)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::Trend;

    fn items() -> Vec<StripItem> {
        let cell = |symbol: &str, price: &str, change: &str| StripItem {
            symbol: symbol.into(),
            price: price.into(),
            change: change.into(),
            trend: Trend::of(change),
        };
        vec![cell("AAPL", "171.37", "+1.25"), cell("MSFT", "370.65", "-0.30")]
    }

    #[test]
    fn line_lists_cells_in_order() {
        assert_eq!(
            render_line(&items()),
            "AAPL 171.37 +1.25   MSFT 370.65 -0.30   "
        );
    }

    #[test]
    fn viewport_wraps_on_one_sequence_width() {
        let single = render_line(&items());
        let doubled = format!("{}{}", single, single);
        let period = single.chars().count();
        assert_eq!(viewport(&doubled, 0, 12), viewport(&doubled, period, 12));
        assert_eq!(viewport(&doubled, 3, 12), viewport(&doubled, period + 3, 12));
        assert_eq!(viewport(&doubled, 0, 4), "AAPL");
        assert_eq!(viewport(&doubled, 5, 6), "171.37");
    }

    #[test]
    fn viewport_of_empty_line_is_blank() {
        assert_eq!(viewport("", 7, 3), "   ");
    }
}
