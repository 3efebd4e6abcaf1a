//! Response records produced by the pipeline façade.
//!
//! Every record is built for a single request, serialized and dropped.

use rust_decimal::Decimal;
use serde::Serialize;
use strum::{Display, EnumString};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Lifecycle label of the pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PipelineState {
    /// Serving predictions.
    #[default]
    Active,
    /// Not serving predictions.
    Inactive,
}

/// Outcome of the most recent training run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrainingStatus {
    /// Finished successfully.
    #[default]
    Completed,
    /// Currently running.
    Running,
    /// Finished with an error.
    Failed,
}

/// Coarse health label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SystemHealth {
    /// All good.
    #[default]
    Healthy,
    /// Working with reduced quality.
    Degraded,
    /// Not working.
    Unhealthy,
}

/// Pipeline status as reported by `GET /api/ml_pipeline/status`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatusReport {
    /// Pipeline lifecycle label.
    pub pipeline_status: PipelineState,
    /// Deployed model version.
    pub model_version: String,
    /// When the deployed model was trained.
    #[serde(with = "time::serde::rfc3339")]
    pub last_training: OffsetDateTime,
    /// Next scheduled training run.
    #[serde(with = "time::serde::rfc3339")]
    pub next_scheduled_training: OffsetDateTime,
    /// Outcome of the last training run.
    pub training_status: TrainingStatus,
    /// Predictions served by the deployed model.
    pub prediction_count: u64,
    /// Model accuracy.
    pub accuracy: f64,
    /// Whether input drift was flagged.
    pub data_drift_detected: bool,
    /// Health label.
    pub system_health: SystemHealth,
}

/// Result of a (simulated) retraining run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RetrainOutcome {
    /// Human readable result.
    pub message: String,
    /// Version produced by the run.
    pub new_version: String,
    /// Reported training duration.
    pub training_time: String,
    /// Reported accuracy delta.
    pub accuracy_improvement: String,
}

/// Current model quality metrics.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentPerformance {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub r2_score: f64,
    pub rmse: f64,
    pub mae: f64,
    /// Seconds per prediction.
    pub processing_time: f64,
}

/// One hourly entry of the performance history.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HistoryPoint {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Static drift record. No statistical comparison backs it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DriftStatus {
    pub reference_samples: u32,
    pub current_samples: u32,
    pub threshold: f64,
    pub drift_score: f64,
    pub drift_detected: bool,
}

/// Body of `GET /api/ml_pipeline/performance`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PerformanceSnapshot {
    pub current_performance: CurrentPerformance,
    /// Newest first.
    pub performance_history: Vec<HistoryPoint>,
    pub drift_status: DriftStatus,
}

/// Body of `POST /api/ml_pipeline/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PredictionResult {
    /// Predicted copper price, 4 decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub prediction: Decimal,
    /// Confidence score, 3 decimal places.
    pub confidence: f64,
    /// Price the prediction is based on.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub current_price: Decimal,
    /// `prediction - current_price`, 4 decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub predicted_change: Decimal,
    /// Change relative to the current price in percent, 2 decimal places.
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub predicted_change_percent: Decimal,
    pub model_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub features_used: Vec<String>,
}

/// Condensed status for embedding in the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PipelineSummary {
    pub status: PipelineState,
    pub model_version: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_training: OffsetDateTime,
    /// Accuracy formatted as a percentage, e.g. `"73.2%"`.
    pub accuracy: String,
    pub predictions_made: u64,
    pub system_health: SystemHealth,
}
