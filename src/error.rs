//! Unified error types for the pipeline service.

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the pipeline service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading the latest copper price.
#[derive(Error, Debug)]
pub enum PriceError {
    /// The price endpoint answered with a non-success status.
    #[error("price fetch from {url} failed with status {status}")]
    FetchFailed {
        /// Endpoint that was queried.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },

    /// The price payload could not be interpreted.
    #[error("failed to parse price data: {0}")]
    Parse(String),

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The source could not produce a quote at all.
    #[error("price source unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while building a pipeline response.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Reading the current price failed.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// The current price cannot be used as a divisor.
    #[error("current price must be positive, got {0}")]
    InvalidPrice(Decimal),

    /// Anything else that went wrong inside a handler.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
