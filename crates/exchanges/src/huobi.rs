use cryptocharger_core::{ExchangeAdapter, ExchangeError, Pair};
use serde_json::Value;

use crate::json;

const BASE_URL: &str = "https://api.huobi.pro/market/detail/merged";

/// Huobi (HTX) merged market detail.
#[derive(Debug, Clone, Default)]
pub struct Huobi;

impl Huobi {
    pub fn new() -> Self {
        Self
    }

    /// BTC/USD -> btcusd
    pub fn to_symbol(pair: &Pair) -> String {
        pair.as_str().replace('/', "").to_lowercase()
    }

    /// `{"status": "ok", "tick": {"close": ...}}`
    pub fn parse_price(body: &Value) -> Result<f64, ExchangeError> {
        if body.get("status").and_then(Value::as_str) == Some("error") {
            let msg = body
                .get("err-msg")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(ExchangeError::Upstream(msg.to_string()));
        }
        json::price_at(body, &["tick", "close"])
    }
}

impl ExchangeAdapter for Huobi {
    fn name(&self) -> &str {
        "Huobi"
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }

    fn symbol(&self, pair: &Pair) -> String {
        Self::to_symbol(pair)
    }

    fn request_url(&self, symbol: &str) -> String {
        format!("{}?symbol={}", BASE_URL, symbol)
    }

    fn extract_price(&self, body: &Value, _pair: &Pair) -> Result<f64, ExchangeError> {
        Self::parse_price(body)
    }
}
