use cryptocharger_core::*;
use tracing::{debug, info};

/// Query every adapter for every pair, one call at a time, adapter-major.
///
/// Only successful fetches produce an observation; each failure leaves exactly
/// one notice instead.
pub async fn collect_observations(
    adapters: &[Box<dyn ExchangeAdapter>],
    pairs: &[Pair],
    transport: &dyn HttpTransport,
) -> (Vec<PriceObservation>, Vec<Notice>) {
    let mut observations = Vec::with_capacity(adapters.len() * pairs.len());
    let mut notices = Vec::new();

    for adapter in adapters {
        for pair in pairs {
            if let Some(price) = adapter.get_price(transport, pair, &mut notices).await {
                debug!(exchange = adapter.name(), pair = %pair, price, "Observed price");
                observations.push(PriceObservation {
                    exchange: adapter.name().to_string(),
                    pair: pair.clone(),
                    price,
                });
            }
        }
    }

    info!(
        observations = observations.len(),
        failures = notices.len(),
        "Fetched prices from {} exchanges for {} pairs",
        adapters.len(),
        pairs.len()
    );
    (observations, notices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryptocharger_core::testing::{pair, CannedTransport};
    use cryptocharger_exchanges::{Binance, Coinbase};

    #[tokio::test]
    async fn test_adapter_major_order_and_failures_skipped() {
        let transport = CannedTransport::new()
            .with("https://api.binance.com/api/v3/ticker/price?symbol=BTCUSD", 200, r#"{"price":"100"}"#)
            .with("https://api.binance.com/api/v3/ticker/price?symbol=ETHUSD", 200, r#"{"price":"10"}"#)
            .with("https://api.coinbase.com/v2/prices/BTC-USD/spot", 200, r#"{"data":{"amount":"101"}}"#)
            .with("https://api.coinbase.com/v2/prices/ETH-USD/spot", 500, "");
        let adapters: Vec<Box<dyn ExchangeAdapter>> = vec![Box::new(Binance), Box::new(Coinbase)];
        let pairs = [pair("BTC/USD"), pair("ETH/USD")];

        let (observations, notices) = collect_observations(&adapters, &pairs, &transport).await;

        let seen: Vec<(&str, &str)> = observations
            .iter()
            .map(|o| (o.exchange.as_str(), o.pair.as_str()))
            .collect();
        assert_eq!(
            seen,
            [("Binance", "BTC/USD"), ("Binance", "ETH/USD"), ("Coinbase", "BTC/USD")]
        );
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].exchange, "Coinbase");
        assert_eq!(transport.calls().len(), 4);
    }
}
