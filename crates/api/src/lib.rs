pub mod page;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use cryptocharger_engine::Dashboard;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the Axum application router.
pub fn build_router(dashboard: Dashboard) -> Router {
    let app_state = Arc::new(state::AppState::new(dashboard));

    Router::new()
        .route("/", get(page::dashboard_page))
        .nest("/api", routes::api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the dashboard server.
pub async fn start_server(dashboard: Dashboard, bind_addr: &str) -> anyhow::Result<()> {
    let app = build_router(dashboard);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Dashboard listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use cryptocharger_core::{ExchangeError, HttpResponse, HttpTransport, Pair};
    use cryptocharger_exchanges::{Binance, Kraken};
    use tower::ServiceExt;

    /// Answers every URL with the same response.
    struct FixedTransport(u16, &'static str);

    #[async_trait]
    impl HttpTransport for FixedTransport {
        async fn get(&self, _url: &str) -> Result<HttpResponse, ExchangeError> {
            Ok(HttpResponse {
                status: self.0,
                body: self.1.to_string(),
            })
        }
    }

    fn app(transport: FixedTransport) -> Router {
        build_router(Dashboard::new(
            "Crypto Arbitrage",
            vec![Box::new(Binance), Box::new(Kraken)],
            vec![Pair::parse("BTC/USD").unwrap()],
            Arc::new(transport),
        ))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(app(FixedTransport(200, "{}")), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn test_prices_json() {
        // Binance parses `price`; the Kraken shape is missing so it warns.
        let (status, body) = get(app(FixedTransport(200, r#"{"price":"42.5"}"#)), "/api/prices").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["title"], "Crypto Arbitrage");
        assert_eq!(json["table"]["rows"], serde_json::json!(["BTC/USD"]));
        assert_eq!(json["table"]["columns"], serde_json::json!(["Binance"]));
        assert_eq!(json["table"]["cells"][0][0], 42.5);
        assert_eq!(json["notices"].as_array().unwrap().len(), 1);
        assert_eq!(json["notices"][0]["exchange"], "Kraken");
    }

    #[tokio::test]
    async fn test_exchanges_listing() {
        let (status, body) = get(app(FixedTransport(200, "{}")), "/api/exchanges").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["exchanges"][0]["name"], "Binance");
        assert_eq!(json["exchanges"][1]["name"], "Kraken");
        assert_eq!(json["pairs"], serde_json::json!(["BTC/USD"]));
    }

    #[tokio::test]
    async fn test_page_shows_notices_when_everything_fails() {
        let (status, body) = get(app(FixedTransport(503, "")), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Crypto Arbitrage</h1>"));
        assert!(body.contains("No prices available."));
        assert!(body.contains("Binance: HTTP status 503 (BTC/USD)"));
        assert!(body.contains("Kraken: HTTP status 503 (BTC/USD)"));
    }
}
