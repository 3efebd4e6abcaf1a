//! The ML pipeline façade.
//!
//! Builds the status, retraining, performance and prediction payloads served
//! by the API. Values are literal constants or uniform random draws around
//! them; nothing here trains or evaluates a model.
//!
//! - [`status`]: fixed status report, dashboard summary, startup hook
//! - [`retrain`]: simulated retraining run
//! - [`performance`]: current metrics plus noisy hourly history
//! - [`prediction`]: price prediction around the latest copper quote

pub mod performance;
pub mod prediction;
pub mod retrain;
pub mod status;
pub mod types;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::datetime;
use time::OffsetDateTime;

pub use performance::{performance_snapshot, HISTORY_LEN};
pub use prediction::{predict, FEATURES_USED};
pub use retrain::retrain;
pub use status::{initialize, pipeline_status, summary};
pub use types::{
    CurrentPerformance, DriftStatus, HistoryPoint, PerformanceSnapshot, PipelineState,
    PipelineSummary, PredictionResult, RetrainOutcome, StatusReport, SystemHealth,
    TrainingStatus,
};

/// Version of the deployed model.
pub const MODEL_VERSION: &str = "v2.1.0";

/// Version reported after a retraining run.
pub const RETRAINED_MODEL_VERSION: &str = "v2.1.1";

/// When the deployed model was trained.
pub const LAST_TRAINING: OffsetDateTime = datetime!(2025-08-25 05:00 UTC);

/// Next scheduled training run.
pub const NEXT_SCHEDULED_TRAINING: OffsetDateTime = datetime!(2025-08-26 05:00 UTC);

/// Predictions served by the deployed model.
pub const PREDICTION_COUNT: u64 = 15_432;

/// Accuracy of the deployed model.
pub const BASELINE_ACCURACY: f64 = 0.732;

/// Copper price (USD/lb) used when the price source reports none.
pub const FALLBACK_COPPER_PRICE: Decimal = dec!(5.84);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_price_is_5_84() {
        assert_eq!(FALLBACK_COPPER_PRICE, dec!(5.84));
    }

    #[test]
    fn training_schedule_is_one_day_apart() {
        assert_eq!(NEXT_SCHEDULED_TRAINING - LAST_TRAINING, time::Duration::days(1));
    }
}
