//! Mock price source for unit testing.
//!
//! This module provides a source that can be used in tests without making
//! real network requests.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::PriceError;

use super::source::PriceSource;
use super::types::PriceQuote;

/// Configuration for mock source behavior.
#[derive(Debug, Clone, Default)]
pub struct MockPriceConfig {
    /// Price to report; `None` reports a quote without a price.
    pub price: Option<Decimal>,
    /// Whether to fail every request.
    pub fail: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

/// Mock price source for testing.
#[derive(Debug, Clone, Default)]
pub struct MockPriceSource {
    /// Mock configuration.
    config: MockPriceConfig,
    /// Number of quotes requested so far.
    calls: Arc<AtomicU64>,
}

impl MockPriceSource {
    /// Source reporting a fixed price.
    pub fn with_price(price: Decimal) -> Self {
        Self::with_config(MockPriceConfig {
            price: Some(price),
            ..Default::default()
        })
    }

    /// Source whose quotes carry no price.
    pub fn missing_price() -> Self {
        Self::default()
    }

    /// Source that fails every request.
    pub fn failing() -> Self {
        Self::with_config(MockPriceConfig {
            fail: true,
            ..Default::default()
        })
    }

    /// Create a mock source with custom configuration.
    pub fn with_config(config: MockPriceConfig) -> Self {
        Self {
            config,
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of quotes requested so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    async fn latest_price(&self) -> Result<PriceQuote, PriceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if self.config.fail {
            return Err(PriceError::Unavailable("Mock price failure".to_string()));
        }

        Ok(match self.config.price {
            Some(price) => PriceQuote::new(price),
            None => PriceQuote::missing(),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn mock_source_price() {
        let source = MockPriceSource::with_price(dec!(5.50));
        let quote = source.latest_price().await.unwrap();
        assert_eq!(quote.price, Some(dec!(5.50)));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn mock_source_missing_price() {
        let quote = MockPriceSource::missing_price().latest_price().await.unwrap();
        assert_eq!(quote.price, None);
    }

    #[tokio::test]
    async fn mock_source_failure_mode() {
        let source = MockPriceSource::failing();
        assert!(source.latest_price().await.is_err());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn mock_source_simulates_latency() {
        let source = MockPriceSource::with_config(MockPriceConfig {
            price: Some(dec!(5.84)),
            latency_ms: 250,
            ..Default::default()
        });

        let start = tokio::time::Instant::now();
        let quote = source.latest_price().await.unwrap();
        assert!(start.elapsed() >= std::time::Duration::from_millis(250));
        assert_eq!(quote.price, Some(dec!(5.84)));
    }

    #[tokio::test]
    async fn clones_share_call_counter() {
        let source = MockPriceSource::with_price(dec!(5.84));
        let clone = source.clone();
        clone.latest_price().await.unwrap();
        assert_eq!(source.calls(), 1);
    }
}
