//! Copper price quote types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::PriceError;

/// One reading from a price source.
///
/// The price itself is optional: upstream feeds are allowed to answer without
/// one, and callers decide what to fall back to.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    /// Latest copper price in USD/lb, if the source reported one.
    pub price: Option<Decimal>,
    /// When the quote was taken.
    pub fetched_at: OffsetDateTime,
}

impl PriceQuote {
    /// Quote carrying a price.
    pub fn new(price: Decimal) -> Self {
        Self {
            price: Some(price),
            fetched_at: OffsetDateTime::now_utc(),
        }
    }

    /// Quote with no price field.
    pub fn missing() -> Self {
        Self {
            price: None,
            fetched_at: OffsetDateTime::now_utc(),
        }
    }

    /// Price from the quote, or `fallback` when the source had none.
    pub fn price_or(&self, fallback: Decimal) -> Decimal {
        self.price.unwrap_or(fallback)
    }

    /// Build a quote from a JSON object with an optional `price` field.
    ///
    /// `price` may be a number or a numeric string. A missing or `null` field
    /// yields a quote without a price.
    pub fn from_payload(payload: &Value) -> Result<Self, PriceError> {
        let object = payload
            .as_object()
            .ok_or_else(|| PriceError::Parse("expected a JSON object".to_string()))?;

        let price = match object.get("price") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(parse_decimal(&n.to_string())?),
            Some(Value::String(s)) => Some(parse_decimal(s.trim())?),
            Some(other) => {
                return Err(PriceError::Parse(format!(
                    "unexpected price value: {}",
                    other
                )))
            }
        };

        Ok(Self {
            price,
            fetched_at: OffsetDateTime::now_utc(),
        })
    }
}

fn parse_decimal(raw: &str) -> Result<Decimal, PriceError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| PriceError::Parse(format!("invalid price {:?}: {}", raw, e)))
}
