//! Price prediction around the latest copper quote.

use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::debug;

use crate::error::PipelineError;
use crate::pricing::PriceQuote;

use super::types::PredictionResult;
use super::MODEL_VERSION;

/// Feature names reported with every prediction.
pub const FEATURES_USED: [&str; 4] = ["price", "volume", "technical_indicators", "market_sentiment"];

// Bounds of the uniform offset added to the current price (USD/lb).
const OFFSET_LOW: f64 = -0.15;
const OFFSET_HIGH: f64 = 0.20;

// Bounds of the uniform confidence score.
const CONFIDENCE_LOW: f64 = 0.75;
const CONFIDENCE_HIGH: f64 = 0.92;

/// Predict the next copper price.
///
/// Uses the quoted price, or `fallback` when the quote has none. The
/// prediction is rounded to 4 decimal places and the change fields are
/// derived from the rounded prediction, so
/// `predicted_change == prediction - current_price` holds exactly.
pub fn predict<R: Rng + ?Sized>(
    quote: &PriceQuote,
    fallback: Decimal,
    rng: &mut R,
    now: OffsetDateTime,
) -> Result<PredictionResult, PipelineError> {
    let current_price = quote.price_or(fallback);
    if current_price <= Decimal::ZERO {
        return Err(PipelineError::InvalidPrice(current_price));
    }

    let raw_offset = rng.random_range(OFFSET_LOW..=OFFSET_HIGH);
    let offset = Decimal::from_f64(raw_offset)
        .ok_or_else(|| PipelineError::Internal(format!("offset {} is not finite", raw_offset)))?;

    let overflow =
        || PipelineError::Internal(format!("prediction overflows for price {}", current_price));

    let prediction = current_price.checked_add(offset).ok_or_else(overflow)?.round_dp(4);
    let change = prediction.checked_sub(current_price).ok_or_else(overflow)?;
    let change_percent = change
        .checked_div(current_price)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(overflow)?
        .round_dp(2);

    let confidence = round_to(rng.random_range(CONFIDENCE_LOW..=CONFIDENCE_HIGH), 3);

    debug!(%current_price, %prediction, confidence, "Generated prediction");

    Ok(PredictionResult {
        prediction,
        confidence,
        current_price,
        predicted_change: change.round_dp(4),
        predicted_change_percent: change_percent,
        model_version: MODEL_VERSION.to_string(),
        timestamp: now,
        features_used: FEATURES_USED.iter().map(|f| f.to_string()).collect(),
    })
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FALLBACK_COPPER_PRICE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn predict_with_seed(quote: &PriceQuote, seed: u64) -> PredictionResult {
        let mut rng = StdRng::seed_from_u64(seed);
        predict(quote, FALLBACK_COPPER_PRICE, &mut rng, OffsetDateTime::now_utc()).unwrap()
    }

    #[test]
    fn change_fields_match_prediction() {
        for (seed, price) in [dec!(5.84), dec!(4.1234), dec!(0.5), dec!(12.99999)]
            .into_iter()
            .enumerate()
        {
            let result = predict_with_seed(&PriceQuote::new(price), seed as u64);

            let change = result.prediction - result.current_price;
            assert_eq!(result.predicted_change, change.round_dp(4));
            assert_eq!(
                result.predicted_change_percent,
                (change / result.current_price * Decimal::ONE_HUNDRED).round_dp(2)
            );
        }
    }

    #[test]
    fn prediction_stays_within_offset_band() {
        for seed in 0..100 {
            let result = predict_with_seed(&PriceQuote::new(dec!(5.84)), seed);

            assert!(result.prediction >= dec!(5.69), "prediction {}", result.prediction);
            assert!(result.prediction <= dec!(6.04), "prediction {}", result.prediction);
            assert!(result.prediction.scale() <= 4);
        }
    }

    #[test]
    fn confidence_is_rounded_and_bounded() {
        for seed in 0..100 {
            let result = predict_with_seed(&PriceQuote::new(dec!(5.84)), seed);

            assert!((0.75..=0.92).contains(&result.confidence));
            assert_eq!(result.confidence, round_to(result.confidence, 3));
        }
    }

    #[test]
    fn missing_price_falls_back_to_5_84() {
        let result = predict_with_seed(&PriceQuote::missing(), 9);
        assert_eq!(result.current_price, dec!(5.84));
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = predict(
            &PriceQuote::new(Decimal::ZERO),
            FALLBACK_COPPER_PRICE,
            &mut rng,
            OffsetDateTime::now_utc(),
        );
        assert!(matches!(result, Err(PipelineError::InvalidPrice(_))));
    }

    #[test]
    fn tiny_price_overflowing_the_percentage_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = predict(
            &PriceQuote::new(dec!(0.0000000000000000000000000001)),
            FALLBACK_COPPER_PRICE,
            &mut rng,
            OffsetDateTime::now_utc(),
        );
        assert!(matches!(result, Err(PipelineError::Internal(_))), "{:?}", result);
    }

    #[test]
    fn extreme_prices_never_panic() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = predict(
                &PriceQuote::new(Decimal::MAX),
                FALLBACK_COPPER_PRICE,
                &mut rng,
                OffsetDateTime::now_utc(),
            );
            assert!(
                matches!(result, Ok(_) | Err(PipelineError::Internal(_))),
                "{:?}",
                result
            );
        }
    }

    #[test]
    fn reports_model_version_and_features() {
        let result = predict_with_seed(&PriceQuote::new(dec!(5.84)), 1);

        assert_eq!(result.model_version, "v2.1.0");
        assert_eq!(
            result.features_used,
            vec!["price", "volume", "technical_indicators", "market_sentiment"]
        );
    }

    #[test]
    fn round_to_works() {
        assert_eq!(round_to(0.81234, 3), 0.812);
        assert_eq!(round_to(0.8125, 2), 0.81);
    }
}
