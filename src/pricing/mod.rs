//! Copper price access.
//!
//! This module handles:
//! - Price quote types and payload parsing
//! - The `PriceSource` seam used by the prediction endpoint
//! - HTTP and static sources
//! - Mock source for testing

pub mod client;
pub mod mock;
pub mod source;
pub mod types;

pub use client::HttpPriceSource;
pub use mock::{MockPriceConfig, MockPriceSource};
pub use source::{source_from_config, PriceSource, StaticPriceSource};
pub use types::PriceQuote;
