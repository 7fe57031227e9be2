use cryptocharger_core::{ExchangeAdapter, ExchangeError, Pair};
use serde_json::Value;

use crate::json;

const BASE_URL: &str = "https://api.bitfinex.com/v2/ticker/";
/// Prefix for trading (as opposed to funding) symbols.
const TRADING_PREFIX: char = 't';
/// Position of LAST_PRICE in the v2 ticker array.
const LAST_PRICE_INDEX: usize = 6;

/// Bitfinex ticker.
#[derive(Debug, Clone, Default)]
pub struct Bitfinex;

impl Bitfinex {
    pub fn new() -> Self {
        Self
    }

    /// BTC/USD -> tBTCUSD
    pub fn to_symbol(pair: &Pair) -> String {
        format!("{}{}", TRADING_PREFIX, pair.as_str().replace('/', "").to_uppercase())
    }

    /// The v2 endpoint answers with a positional array:
    /// `[BID, BID_SIZE, ASK, ASK_SIZE, DAILY_CHANGE, DAILY_CHANGE_RELATIVE, LAST_PRICE, ...]`.
    /// The older v1 shape is an object with a `last_price` field.
    pub fn parse_price(body: &Value) -> Result<f64, ExchangeError> {
        match body {
            Value::Array(fields) => {
                let raw = fields.get(LAST_PRICE_INDEX).ok_or_else(|| {
                    ExchangeError::Malformed(format!(
                        "ticker has {} fields, expected more than {}",
                        fields.len(),
                        LAST_PRICE_INDEX
                    ))
                })?;
                json::number(raw).ok_or_else(|| {
                    ExchangeError::Malformed(format!("last price is not a number: {}", raw))
                })
            }
            Value::Object(_) => json::price_at(body, &["last_price"]),
            other => Err(ExchangeError::Malformed(format!("unexpected ticker: {}", other))),
        }
    }
}

impl ExchangeAdapter for Bitfinex {
    fn name(&self) -> &str {
        "Bitfinex"
    }

    fn base_url(&self) -> &str {
        BASE_URL
    }

    fn symbol(&self, pair: &Pair) -> String {
        Self::to_symbol(pair)
    }

    fn request_url(&self, symbol: &str) -> String {
        format!("{}{}", BASE_URL, symbol)
    }

    fn extract_price(&self, body: &Value, _pair: &Pair) -> Result<f64, ExchangeError> {
        Self::parse_price(body)
    }
}
