use cryptocharger_core::{ExchangeAdapter, ExchangeError, Pair};
use serde_json::Value;

use crate::json;

const BASE_URL: &str = "https://api.kraken.com/0/public/Ticker";

/// Kraken public ticker.
///
/// Kraken keys its result by its own resolved pair name (`XXBTZUSD` for a
/// request of `XBTUSD`), so the key is discovered from the response rather
/// than derived from the request.
#[derive(Debug, Clone, Default)]
pub struct Kraken;

impl Kraken {
    pub fn new() -> Self {
        Self
    }

    /// BTC/USD -> XBTUSD
    pub fn to_symbol(pair: &Pair) -> String {
        pair.as_str().replace("BTC", "XBT").replace('/', "")
    }

    /// First element of the close array (`c`) of the single result entry.
    ///
    /// Zero or several entries are rejected instead of guessing which one
    /// was meant.
    pub fn parse_price(body: &Value) -> Result<f64, ExchangeError> {
        if let Some(errors) = body.get("error").and_then(Value::as_array) {
            if !errors.is_empty() {
                let joined: Vec<String> = errors
                    .iter()
                    .map(|e| e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string()))
                    .collect();
                return Err(ExchangeError::Upstream(joined.join("; ")));
            }
        }

        let result = json::field(body, &["result"])?
            .as_object()
            .ok_or_else(|| ExchangeError::Malformed("result is not an object".into()))?;

        let mut entries = result.iter();
        let (key, ticker) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            (None, _) => return Err(ExchangeError::Malformed("result is empty".into())),
            (Some(_), Some(_)) => {
                return Err(ExchangeError::Malformed(format!(
                    "result has {} entries, expected one",
                    result.len()
                )))
            }
        };

        let close = ticker
            .get("c")
            .and_then(Value::as_array)
            .and_then(|c| c.first())
            .ok_or_else(|| ExchangeError::Malformed(format!("missing close price for {}", key)))?;
        json::number(close).ok_or_else(|| {
            ExchangeError::Malformed(format!("close price for {} is not a number: {}", key, close))
        })
    }
}

impl ExchangeAdapter for Kraken {
    fn name(&self) -> &str {
        "Kraken"
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }

    fn symbol(&self, pair: &Pair) -> String {
        Self::to_symbol(pair)
    }

    fn request_url(&self, symbol: &str) -> String {
        format!("{}?pair={}", BASE_URL, symbol)
    }

    fn extract_price(&self, body: &Value, _pair: &Pair) -> Result<f64, ExchangeError> {
        Self::parse_price(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptocharger_core::testing::{pair, CannedTransport};
    use serde_json::json;

    #[test]
    fn test_symbol() {
        assert_eq!(Kraken::to_symbol(&pair("BTC/USD")), "XBTUSD");
        assert_eq!(Kraken::to_symbol(&pair("ETH/USD")), "ETHUSD");
        assert_eq!(Kraken::to_symbol(&pair("ETH/BTC")), "ETHXBT");
    }

    #[test]
    fn test_parse_discovers_result_key() {
        let body = json!({
            "error": [],
            "result": {
                "XXBTZUSD": {
                    "a": ["67001.00000", "1", "1.000"],
                    "b": ["67000.90000", "2", "2.000"],
                    "c": ["67000.50000", "0.00100000"]
                }
            }
        });
        assert_eq!(Kraken::parse_price(&body).unwrap(), 67000.5);
    }

    #[test]
    fn test_parse_rejects_zero_or_many_entries() {
        let empty = json!({"error": [], "result": {}});
        assert!(matches!(Kraken::parse_price(&empty), Err(ExchangeError::Malformed(_))));

        let many = json!({"error": [], "result": {
            "XXBTZUSD": {"c": ["1.0", "1"]},
            "XETHZUSD": {"c": ["2.0", "1"]}
        }});
        match Kraken::parse_price(&many) {
            Err(ExchangeError::Malformed(msg)) => assert!(msg.contains("2 entries")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_reports_upstream_errors() {
        let body = json!({"error": ["EQuery:Unknown asset pair"]});
        match Kraken::parse_price(&body) {
            Err(ExchangeError::Upstream(msg)) => assert_eq!(msg, "EQuery:Unknown asset pair"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_missing_close() {
        let body = json!({"error": [], "result": {"XXBTZUSD": {"c": []}}});
        assert!(Kraken::parse_price(&body).is_err());
    }

    #[tokio::test]
    async fn test_get_price_end_to_end() {
        let transport = CannedTransport::new().with(
            "https://api.kraken.com/0/public/Ticker?pair=XBTUSD",
            200,
            r#"{"error":[],"result":{"XXBTZUSD":{"c":["64000.1","0.1"]}}}"#,
        );
        let mut notices = Vec::new();
        let price = Kraken.get_price(&transport, &pair("BTC/USD"), &mut notices).await;
        assert_eq!(price, Some(64000.1));
        assert!(notices.is_empty());
    }
}
