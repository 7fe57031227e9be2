//! Exchange adapters.
//!
//! One [`ExchangeAdapter`] per exchange, each a pure symbol mapping plus a
//! JSON-shape extractor. Network I/O goes through [`ReqwestTransport`].

pub mod binance;
pub mod bitfinex;
pub mod coinbase;
pub mod http;
pub mod huobi;
pub mod json;
pub mod kraken;

pub use binance::Binance;
pub use bitfinex::Bitfinex;
pub use coinbase::Coinbase;
pub use http::ReqwestTransport;
pub use huobi::Huobi;
pub use kraken::Kraken;

use cryptocharger_core::{ExchangeAdapter, ExchangeKind};

/// Build the adapter for an exchange.
pub fn build_adapter(kind: ExchangeKind) -> Box<dyn ExchangeAdapter> {
    match kind {
        ExchangeKind::Binance => Box::new(Binance::new()),
        ExchangeKind::Coinbase => Box::new(Coinbase::new()),
        ExchangeKind::Kraken => Box::new(Kraken::new()),
        ExchangeKind::Bitfinex => Box::new(Bitfinex::new()),
        ExchangeKind::Huobi => Box::new(Huobi::new()),
    }
}

/// Build adapters in the given order.
pub fn build_adapters(kinds: &[ExchangeKind]) -> Vec<Box<dyn ExchangeAdapter>> {
    kinds.iter().copied().map(build_adapter).collect()
}

/// All supported exchanges.
pub fn default_adapters() -> Vec<Box<dyn ExchangeAdapter>> {
    build_adapters(&ExchangeKind::ALL)
}
