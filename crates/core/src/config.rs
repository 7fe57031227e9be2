use crate::models::Pair;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading the dashboard configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// The exchanges an adapter can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeKind {
    Binance,
    Coinbase,
    Kraken,
    Bitfinex,
    Huobi,
}

impl ExchangeKind {
    pub const ALL: [ExchangeKind; 5] = [
        ExchangeKind::Binance,
        ExchangeKind::Coinbase,
        ExchangeKind::Kraken,
        ExchangeKind::Bitfinex,
        ExchangeKind::Huobi,
    ];
}

/// HTTP client settings shared by all adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Extra attempts after a transport failure. Status errors are never retried.
    pub retries: u32,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            retries: 0,
            user_agent: concat!("cryptocharger/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8501".to_string(),
        }
    }
}

/// Everything the dashboard needs: which pairs to query on which exchanges,
/// plus the page title and transport knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub pairs: Vec<Pair>,
    pub exchanges: Vec<ExchangeKind>,
    pub http: HttpConfig,
    pub server: ServerConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Crypto Arbitrage in Real Time".to_string(),
            pairs: ["BTC/USD", "ETH/USD", "XRP/USD"]
                .iter()
                .filter_map(|p| Pair::parse(p).ok())
                .collect(),
            exchanges: ExchangeKind::ALL.to_vec(),
            http: HttpConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(
            path = %path.display(),
            pairs = config.pairs.len(),
            exchanges = config.exchanges.len(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid("http.timeout_secs must be > 0".into()));
        }
        for (i, pair) in self.pairs.iter().enumerate() {
            if self.pairs[..i].contains(pair) {
                return Err(ConfigError::Invalid(format!("duplicate pair {pair}")));
            }
        }
        for (i, kind) in self.exchanges.iter().enumerate() {
            if self.exchanges[..i].contains(kind) {
                return Err(ConfigError::Invalid(format!("duplicate exchange {kind:?}")));
            }
        }
        Ok(())
    }
}
