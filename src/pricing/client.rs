//! HTTP copper price client.

use async_trait::async_trait;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

use crate::error::PriceError;
use crate::metrics;

use super::source::PriceSource;
use super::types::PriceQuote;

/// Reads the latest price from a dashboard endpoint returning a JSON object.
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    /// HTTP client for price requests.
    http: reqwest::Client,
    /// Price endpoint.
    url: String,
}

impl HttpPriceSource {
    /// Create a client for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PriceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_millis(500))
            .tcp_nodelay(true)
            .build()?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Get the price endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn latest_price(&self) -> Result<PriceQuote, PriceError> {
        let start = Instant::now();

        let response = self.http.get(&self.url).send().await?;
        metrics::record_price_fetch_latency(start);

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Price endpoint returned error status");
            return Err(PriceError::FetchFailed {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| PriceError::Parse(format!("price response is not JSON: {}", e)))?;

        let quote = PriceQuote::from_payload(&payload)?;
        debug!(price = ?quote.price, "Fetched copper price");

        Ok(quote)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tokio::net::TcpListener;

    /// Serve canned price payloads on an ephemeral port, returning its base URL.
    async fn spawn_price_server() -> String {
        let app = Router::new()
            .route("/number", get(|| async { Json(json!({"price": 4.5, "unit": "USD/lb"})) }))
            .route("/string", get(|| async { Json(json!({"price": "4.2512"})) }))
            .route("/null", get(|| async { Json(json!({"price": null})) }))
            .route("/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .route("/garbage", get(|| async { "copper is up today" }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    async fn fetch(base: &str, path: &str) -> Result<PriceQuote, PriceError> {
        HttpPriceSource::new(format!("{}{}", base, path), Duration::from_secs(2))
            .unwrap()
            .latest_price()
            .await
    }

    #[tokio::test]
    async fn numeric_price_becomes_a_quote() {
        let base = spawn_price_server().await;
        let quote = fetch(&base, "/number").await.unwrap();
        assert_eq!(quote.price, Some(dec!(4.5)));
    }

    #[tokio::test]
    async fn numeric_string_price_is_accepted() {
        let base = spawn_price_server().await;
        let quote = fetch(&base, "/string").await.unwrap();
        assert_eq!(quote.price, Some(dec!(4.2512)));
    }

    #[tokio::test]
    async fn null_price_yields_quote_without_price() {
        let base = spawn_price_server().await;
        let quote = fetch(&base, "/null").await.unwrap();
        assert_eq!(quote.price, None);
    }

    #[tokio::test]
    async fn error_status_is_fetch_failed() {
        let base = spawn_price_server().await;
        let result = fetch(&base, "/down").await;
        assert!(
            matches!(result, Err(PriceError::FetchFailed { status: 503, .. })),
            "{:?}",
            result
        );
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error() {
        let base = spawn_price_server().await;
        let result = fetch(&base, "/garbage").await;
        assert!(matches!(result, Err(PriceError::Parse(_))), "{:?}", result);
    }

    #[test]
    fn client_creation_works() {
        let source =
            HttpPriceSource::new("http://localhost:5000/api/copper/latest", Duration::from_secs(2))
                .unwrap();
        assert_eq!(source.url(), "http://localhost:5000/api/copper/latest");
        assert_eq!(source.name(), "http");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_http_error() {
        // Port 9 (discard) is not expected to serve HTTP locally.
        let source =
            HttpPriceSource::new("http://127.0.0.1:9/price", Duration::from_millis(200)).unwrap();
        let result = source.latest_price().await;
        assert!(matches!(result, Err(PriceError::Http(_))));
    }
}
