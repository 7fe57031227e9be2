//! The HTML dashboard page.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Html};
use cryptocharger_core::NoticeLevel;
use cryptocharger_engine::{format_price, Snapshot};
use std::fmt;
use std::sync::Arc;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse}\
th,td{border:1px solid #ccc;padding:.35rem .7rem;text-align:right}\
th:first-child,td:first-child{text-align:left}\
.notice{margin:.2rem 0}.warning{color:#a36a00}.error{color:#b00020}\
.muted{color:#777}";

/// Every request refetches, so a browser reload is the refresh button.
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> (StatusCode, Html<String>) {
    match state.dashboard.refresh().await {
        Ok(snapshot) => (StatusCode::OK, Html(render_page(&snapshot))),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build price table");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<h1>Error</h1><p>{}</p>", escape(&e.to_string()))),
            )
        }
    }
}

pub fn render_page(snapshot: &Snapshot) -> String {
    Page(snapshot).to_string()
}

struct Page<'a>(&'a Snapshot);

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let table = &snapshot.table;
        let title = escape(&snapshot.title);

        write!(
            f,
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
             <style>{STYLE}</style></head><body><h1>{title}</h1>"
        )?;
        write!(
            f,
            "<p class=\"muted\">Updated {}</p>",
            snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        if table.is_empty() {
            f.write_str("<p>No prices available.</p>")?;
        } else {
            f.write_str("<table><thead><tr><th>Pair</th>")?;
            for exchange in &table.columns {
                write!(f, "<th>{}</th>", escape(exchange))?;
            }
            f.write_str("<th>Spread</th></tr></thead><tbody>")?;

            for (pair, row) in table.rows.iter().zip(&table.cells) {
                write!(f, "<tr><td>{}</td>", escape(pair.as_str()))?;
                for cell in row {
                    let text = cell.map(format_price).unwrap_or_default();
                    write!(f, "<td>{}</td>", text)?;
                }
                match table.spread(pair) {
                    Some(s) => write!(
                        f,
                        "<td title=\"buy {} / sell {}\">{:.3}%</td>",
                        escape(&s.low_exchange),
                        escape(&s.high_exchange),
                        s.percent()
                    )?,
                    None => f.write_str("<td></td>")?,
                }
                f.write_str("</tr>")?;
            }
            f.write_str("</tbody></table>")?;
        }

        for notice in &snapshot.notices {
            let class = match notice.level {
                NoticeLevel::Warning => "warning",
                NoticeLevel::Error => "error",
            };
            write!(f, "<p class=\"notice {class}\">{}</p>", escape(&notice.to_string()))?;
        }

        f.write_str("</body></html>")
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cryptocharger_core::{Notice, Pair, PriceTable};

    fn snapshot() -> Snapshot {
        let btc = Pair::parse("BTC/USD").unwrap();
        let eth = Pair::parse("ETH/USD").unwrap();
        Snapshot {
            title: "Crypto <Arbitrage>".to_string(),
            fetched_at: Utc::now(),
            table: PriceTable {
                rows: vec![btc, eth],
                columns: vec!["Binance".into(), "Coinbase".into()],
                cells: vec![vec![Some(100.0), Some(101.0)], vec![Some(10.0), None]],
            },
            notices: vec![Notice::error("Coinbase", "HTTP status 503 (ETH/USD)")],
        }
    }

    #[test]
    fn test_page_contains_title_table_and_notices() {
        let html = render_page(&snapshot());
        assert!(html.contains("<h1>Crypto &lt;Arbitrage&gt;</h1>"));
        assert!(html.contains("<th>Binance</th><th>Coinbase</th>"));
        assert!(html.contains("<tr><td>ETH/USD</td><td>10.00</td><td></td><td></td></tr>"));
        assert!(html.contains("1.000%"));
        assert!(html.contains("<p class=\"notice error\">Coinbase: HTTP status 503 (ETH/USD)</p>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn test_page_empty_table_is_complete_document() {
        let mut snap = snapshot();
        snap.table = PriceTable::default();
        snap.notices.clear();
        let html = render_page(&snap);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p>No prices available.</p>"));
        assert!(!html.contains("<table>"));
        assert!(html.ends_with("</body></html>"));
    }
}
