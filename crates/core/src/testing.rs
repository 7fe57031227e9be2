//! In-memory upstreams for tests. Enabled with the `testing` feature.

use crate::models::Pair;
use crate::traits::{ExchangeError, HttpResponse, HttpTransport};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Parse a pair, panicking on bad input.
pub fn pair(s: &str) -> Pair {
    Pair::parse(s).expect("valid pair")
}

/// Serves fixed responses by URL and records every request.
/// Unknown URLs fail like a refused connection.
#[derive(Debug, Default)]
pub struct CannedTransport {
    responses: HashMap<String, HttpResponse>,
    calls: Mutex<Vec<String>>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            HttpResponse {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// URLs requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for CannedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, ExchangeError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| ExchangeError::Transport(format!("connection refused: {url}")))
    }
}
