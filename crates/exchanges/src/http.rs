use async_trait::async_trait;
use cryptocharger_core::{ExchangeError, HttpConfig, HttpResponse, HttpTransport};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// [`HttpTransport`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    retries: u32,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ExchangeError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            retries: config.retries,
        })
    }

    async fn attempt(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, ExchangeError> {
        let mut attempt = 0;
        loop {
            debug!(url = %url, attempt, "GET");
            match self.attempt(url).await {
                Ok(response) => return Ok(response),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    warn!(url = %url, attempt, error = %e, "Request failed, retrying");
                }
                Err(e) => return Err(ExchangeError::Transport(e.to_string())),
            }
        }
    }
}
