use cryptocharger_core::{ExchangeAdapter, ExchangeError, Pair};
use serde_json::Value;

use crate::json;

const BASE_URL: &str = "https://api.binance.com/api/v3/ticker/price";
/// Used when binance.com answers 451 for the caller's region.
const US_BASE_URL: &str = "https://api.binance.us/api/v3/ticker/price";
const STATUS_REGION_RESTRICTED: u16 = 451;

/// Binance spot ticker.
#[derive(Debug, Clone, Default)]
pub struct Binance;

impl Binance {
    pub fn new() -> Self {
        Self
    }

    /// BTC/USD -> BTCUSD
    pub fn to_symbol(pair: &Pair) -> String {
        pair.as_str().replace('/', "").to_uppercase()
    }

    /// Price lives in the top-level `price` field.
    pub fn parse_price(body: &Value) -> Result<f64, ExchangeError> {
        json::price_at(body, &["price"])
    }
}

impl ExchangeAdapter for Binance {
    fn name(&self) -> &str {
        "Binance"
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

    fn fallback_url(&self, status: u16, symbol: &str) -> Option<String> {
        (status == STATUS_REGION_RESTRICTED).then(|| format!("{}?symbol={}", US_BASE_URL, symbol))
    }

    fn extract_price(&self, body: &Value, _pair: &Pair) -> Result<f64, ExchangeError> {
        Self::parse_price(body)
    }
}
