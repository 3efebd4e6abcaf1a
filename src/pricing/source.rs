//! The price accessor seam and its static implementation.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::PriceError;

use super::client::HttpPriceSource;
use super::types::PriceQuote;

/// Supplier of the latest copper price.
#[async_trait]
pub trait PriceSource: Send + Sync + std::fmt::Debug {
    /// Read the latest quote.
    async fn latest_price(&self) -> Result<PriceQuote, PriceError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// Source that always reports the same (possibly absent) price.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    price: Option<Decimal>,
}

impl StaticPriceSource {
    /// Create a source reporting `price`.
    pub fn new(price: Option<Decimal>) -> Self {
        Self { price }
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn latest_price(&self) -> Result<PriceQuote, PriceError> {
        Ok(match self.price {
            Some(price) => PriceQuote::new(price),
            None => PriceQuote::missing(),
        })
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Pick the price source described by the configuration.
///
/// A configured URL wins over a static price.
pub fn source_from_config(config: &Config) -> Result<Arc<dyn PriceSource>, PriceError> {
    match &config.copper_price_url {
        Some(url) => {
            info!(url = %url, "Using HTTP copper price source");
            Ok(Arc::new(HttpPriceSource::new(url.clone(), config.http_timeout())?))
        }
        None => {
            info!(price = ?config.copper_price, "Using static copper price source");
            Ok(Arc::new(StaticPriceSource::new(config.copper_price)))
        }
    }
}
