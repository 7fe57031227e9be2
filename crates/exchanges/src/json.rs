//! Shape helpers shared by the exchange extractors.

use cryptocharger_core::ExchangeError;
use serde_json::Value;

/// Read a JSON number, or a string holding one. Exchanges disagree on which
/// they send for prices.
pub fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|p| p.is_finite())
}

/// Walk a chain of object keys.
pub fn field<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value, ExchangeError> {
    let mut current = value;
    for (depth, key) in path.iter().enumerate() {
        current = current.get(key).ok_or_else(|| {
            ExchangeError::Malformed(format!("missing key {}", path[..=depth].join(".")))
        })?;
    }
    Ok(current)
}

/// Walk a chain of keys and read the price found there.
pub fn price_at(value: &Value, path: &[&str]) -> Result<f64, ExchangeError> {
    let raw = field(value, path)?;
    number(raw).ok_or_else(|| {
        ExchangeError::Malformed(format!("{} is not a number: {}", path.join("."), raw))
    })
}
