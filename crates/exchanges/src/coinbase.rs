use cryptocharger_core::{ExchangeAdapter, ExchangeError, Pair};
use serde_json::Value;

use crate::json;

const BASE_URL: &str = "https://api.coinbase.com/v2/prices";

/// Coinbase spot price endpoint.
#[derive(Debug, Clone, Default)]
pub struct Coinbase;

impl Coinbase {
    pub fn new() -> Self {
        Self
    }

    /// BTC/USD -> BTC-USD
    pub fn to_symbol(pair: &Pair) -> String {
        pair.as_str().replace('/', "-")
    }

    /// `{"data": {"amount": "..."}}`
    pub fn parse_price(body: &Value) -> Result<f64, ExchangeError> {
        json::price_at(body, &["data", "amount"])
    }
}

impl ExchangeAdapter for Coinbase {
    fn name(&self) -> &str {
        "Coinbase"
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }

    fn symbol(&self, pair: &Pair) -> String {
        Self::to_symbol(pair)
    }

    fn request_url(&self, symbol: &str) -> String {
        format!("{}/{}/spot", BASE_URL, symbol)
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
    fn test_symbol_and_url() {
        assert_eq!(Coinbase::to_symbol(&pair("ETH/USD")), "ETH-USD");
        assert_eq!(
            Coinbase.request_url("ETH-USD"),
            "https://api.coinbase.com/v2/prices/ETH-USD/spot"
        );
    }

    #[test]
    fn test_parse_price() {
        let body = json!({"data": {"amount": "3456.78", "base": "ETH", "currency": "USD"}});
        assert_eq!(Coinbase::parse_price(&body).unwrap(), 3456.78);
        assert!(Coinbase::parse_price(&json!({"errors": [{"id": "not_found"}]})).is_err());
    }

    #[tokio::test]
    async fn test_non_200_yields_one_error() {
        let transport = CannedTransport::new().with(
            "https://api.coinbase.com/v2/prices/XRP-USD/spot",
            404,
            r#"{"errors":[{"id":"not_found","message":"Invalid currency"}]}"#,
        );
        let mut notices = Vec::new();
        let price = Coinbase.get_price(&transport, &pair("XRP/USD"), &mut notices).await;
        assert_eq!(price, None);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].exchange, "Coinbase");
        assert!(notices[0].message.contains("404"));
    }
}
