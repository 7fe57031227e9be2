use crate::dashboard::Snapshot;
use std::fmt;

/// Format a price for display. Sub-unit prices keep more decimals.
pub fn format_price(price: f64) -> String {
    if price.abs() >= 1.0 {
        format!("{:.2}", price)
    } else {
        format!("{:.6}", price)
    }
}

/// Render a snapshot as a fixed-width text table followed by its notices.
/// Missing cells are left blank.
pub fn render_text(snapshot: &Snapshot) -> String {
    TextTable(snapshot).to_string()
}

struct TextTable<'a>(&'a Snapshot);

impl fmt::Display for TextTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let table = &snapshot.table;

        writeln!(f, "{}", snapshot.title)?;
        writeln!(f, "Updated {}", snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f)?;

        if table.is_empty() {
            writeln!(f, "(no prices available)")?;
        } else {
            let label_width = table
                .rows
                .iter()
                .map(|p| p.as_str().len())
                .chain(std::iter::once("Pair".len()))
                .max()
                .unwrap_or(4);
            let widths: Vec<usize> = table
                .columns
                .iter()
                .enumerate()
                .map(|(col, name)| {
                    table
                        .cells
                        .iter()
                        .filter_map(|row| row.get(col).copied().flatten())
                        .map(|p| format_price(p).len())
                        .chain(std::iter::once(name.len()))
                        .max()
                        .unwrap_or(name.len())
                })
                .collect();

            write!(f, "{:<label_width$}", "Pair")?;
            for (name, width) in table.columns.iter().zip(&widths) {
                write!(f, "  {:>width$}", name, width = *width)?;
            }
            writeln!(f)?;

            for (pair, row) in table.rows.iter().zip(&table.cells) {
                write!(f, "{:<label_width$}", pair.as_str())?;
                for (cell, width) in row.iter().zip(&widths) {
                    let text = cell.map(format_price).unwrap_or_default();
                    write!(f, "  {:>width$}", text, width = *width)?;
                }
                writeln!(f)?;
            }
        }

        if !snapshot.notices.is_empty() {
            writeln!(f)?;
            for notice in &snapshot.notices {
                writeln!(f, "! {}", notice)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptocharger_core::testing::pair;
    use chrono::{TimeZone, Utc};
    use cryptocharger_core::{Notice, PriceTable};

    fn snapshot() -> Snapshot {
        Snapshot {
            title: "Prices".to_string(),
            fetched_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            table: PriceTable {
                rows: vec![pair("BTC/USD"), pair("XRP/USD")],
                columns: vec!["Binance".into(), "Kraken".into()],
                cells: vec![vec![Some(67000.5), Some(67001.0)], vec![Some(0.5234), None]],
            },
            notices: vec![Notice::error("Kraken", "HTTP status 404 (XRP/USD)")],
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(67000.5), "67000.50");
        assert_eq!(format_price(0.5234), "0.523400");
    }

    #[test]
    fn test_render_text_layout() {
        let text = render_text(&snapshot());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Prices");
        assert_eq!(lines[1], "Updated 2024-05-01 12:00:00 UTC");
        assert_eq!(lines[3], "Pair      Binance    Kraken");
        assert_eq!(lines[4], "BTC/USD  67000.50  67001.00");
        assert_eq!(lines[5], "XRP/USD  0.523400          ");
        assert_eq!(lines[7], "! Kraken: HTTP status 404 (XRP/USD)");
    }

    #[test]
    fn test_render_empty_table() {
        let mut snap = snapshot();
        snap.table = PriceTable::default();
        assert!(render_text(&snap).contains("(no prices available)"));
    }

    #[test]
    fn test_render_ragged_table() {
        let mut snap = snapshot();
        snap.table.cells = vec![vec![Some(1.5)]];
        snap.notices.clear();
        let text = render_text(&snap);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "Pair     Binance  Kraken");
        assert_eq!(lines[4], "BTC/USD     1.50");
        assert_eq!(lines.len(), 5);
    }
}
