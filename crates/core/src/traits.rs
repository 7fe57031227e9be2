use crate::models::*;
use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

// ---------------------------------------------------------------------------
// HTTP Transport
// ---------------------------------------------------------------------------

/// Errors that can occur while fetching a price from an exchange.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("Connection failed: {0}")]
    Transport(String),
    #[error("HTTP status {status}")]
    Status { status: u16 },
    #[error("Invalid JSON: {0}")]
    Decode(String),
    #[error("Unexpected response: {0}")]
    Malformed(String),
    #[error("Exchange reported: {0}")]
    Upstream(String),
}

/// Raw response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP GET. Only transport-level failures are errors;
/// any status code is returned as a response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, ExchangeError>;
}

// ---------------------------------------------------------------------------
// Exchange Adapter
// ---------------------------------------------------------------------------

/// Per-exchange fetch-and-parse contract.
///
/// Implementors only describe the exchange: symbol convention, endpoint and
/// response shape. The provided methods drive the request and turn every
/// failure into a [`Notice`].
#[async_trait]
pub trait ExchangeAdapter: Send + Sync {
    /// Human-readable name, used as the table column label.
    fn name(&self) -> &str;

    fn base_url(&self) -> &str;

    /// Translate a canonical pair into the exchange's symbol.
    fn symbol(&self, pair: &Pair) -> String;

    /// Primary endpoint for a symbol.
    fn request_url(&self, symbol: &str) -> String;

    /// Alternate endpoint to try once when the primary returns `status`.
    fn fallback_url(&self, _status: u16, _symbol: &str) -> Option<String> {
        None
    }

    /// Pull the price out of a decoded response body.
    fn extract_price(&self, body: &Value, pair: &Pair) -> Result<f64, ExchangeError>;

    /// Fetch a price, propagating any failure.
    async fn fetch_price(
        &self,
        transport: &dyn HttpTransport,
        pair: &Pair,
    ) -> Result<f64, ExchangeError> {
        let symbol = self.symbol(pair);
        let mut response = transport.get(&self.request_url(&symbol)).await?;

        if let Some(url) = self.fallback_url(response.status, &symbol) {
            tracing::info!(
                exchange = self.name(),
                status = response.status,
                url = %url,
                "Retrying against fallback endpoint"
            );
            response = transport.get(&url).await?;
        }

        if !response.is_success() {
            return Err(ExchangeError::Status {
                status: response.status,
            });
        }

        let body: Value = serde_json::from_str(&response.body)
            .map_err(|e| ExchangeError::Decode(e.to_string()))?;
        self.extract_price(&body, pair)
    }

    /// Fetch a price. Failures never escape: each one is recorded as exactly
    /// one notice naming this exchange, and `None` is returned.
    async fn get_price(
        &self,
        transport: &dyn HttpTransport,
        pair: &Pair,
        notices: &mut Vec<Notice>,
    ) -> Option<f64> {
        match self.fetch_price(transport, pair).await {
            Ok(price) => Some(price),
            Err(err) => {
                warn!(exchange = self.name(), pair = %pair, error = %err, "Price fetch failed");
                let message = format!("{} ({})", err, pair);
                let notice = match err {
                    ExchangeError::Transport(_) | ExchangeError::Status { .. } => {
                        Notice::error(self.name(), message)
                    }
                    _ => Notice::warning(self.name(), message),
                };
                notices.push(notice);
                None
            }
        }
    }
}
