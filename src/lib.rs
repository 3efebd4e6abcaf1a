//! ML pipeline API for the CopperFlow copper price dashboard.
//!
//! The service reports pipeline status, performance metrics and next-price
//! predictions. It is a façade: values are constants or uniform random draws
//! around them, and only the current copper price comes from outside.
//!
//! ```text
//! current price:  5.84   (price source, or fallback)
//! offset:        +0.0731 (uniform in [-0.15, 0.20])
//! ──────────────────────
//! prediction:     5.9131
//! change:        +0.0731 (+1.25%)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`pricing`]: Copper price sources
//! - [`pipeline`]: Status, retraining, performance and prediction payloads
//! - [`api`]: HTTP API
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod pricing;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
