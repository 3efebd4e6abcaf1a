//! Application configuration loaded from environment variables.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port for the pipeline API.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    // === Price Source ===
    /// Endpoint returning the latest copper price as a JSON object.
    #[serde(default)]
    pub copper_price_url: Option<String>,

    /// Static copper price, used when no URL is configured.
    #[serde(default)]
    pub copper_price: Option<Decimal>,

    /// Price used when a quote carries no price.
    #[serde(default = "default_fallback_price")]
    pub fallback_price: Decimal,

    /// Timeout for price fetches in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    // === Pipeline Simulation ===
    /// Simulated retraining duration in milliseconds.
    #[serde(default = "default_retrain_delay_ms")]
    pub retrain_delay_ms: u64,

    // === Metrics ===
    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fallback_price() -> Decimal {
    crate::pipeline::FALLBACK_COPPER_PRICE
}

fn default_http_timeout_ms() -> u64 {
    2000
}

fn default_retrain_delay_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            rust_log: default_log_level(),
            copper_price_url: None,
            copper_price: None,
            fallback_price: default_fallback_price(),
            http_timeout_ms: default_http_timeout_ms(),
            retrain_delay_ms: default_retrain_delay_ms(),
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.fallback_price <= Decimal::ZERO {
            return Err("FALLBACK_PRICE must be positive".to_string());
        }

        if let Some(price) = self.copper_price {
            if price <= Decimal::ZERO {
                return Err("COPPER_PRICE must be positive".to_string());
            }
        }

        if let Some(raw) = &self.copper_price_url {
            let parsed = url::Url::parse(raw)
                .map_err(|e| format!("COPPER_PRICE_URL is not a valid URL: {}", e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err("COPPER_PRICE_URL must use http or https".to_string());
            }
        }

        if self.http_timeout_ms == 0 {
            return Err("HTTP_TIMEOUT_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Simulated retraining duration.
    pub fn retrain_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.retrain_delay_ms)
    }

    /// Price fetch timeout.
    pub fn http_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.http_timeout_ms)
    }
}
