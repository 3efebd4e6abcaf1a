//! HTTP API handlers.

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::PipelineError;
use crate::metrics::{self, RequestTimer};
use crate::pipeline::{
    self, PerformanceSnapshot, PipelineSummary, PredictionResult, RetrainOutcome, StatusReport,
};
use crate::pricing::PriceSource;

use super::error::{ApiError, ErrorResponse};

const STATUS: &str = "status";
const RETRAIN: &str = "retrain";
const PERFORMANCE: &str = "performance";
const PREDICT: &str = "predict";
const SUMMARY: &str = "summary";

/// Application state shared with handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Supplier of the latest copper price.
    pub price_source: Arc<dyn PriceSource>,
    /// Price used when a quote carries none.
    pub fallback_price: Decimal,
    /// Simulated retraining duration.
    pub retrain_delay: Duration,
    /// Prometheus handle, when metrics are enabled.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state around a price source, with default settings.
    pub fn new(price_source: Arc<dyn PriceSource>) -> Self {
        Self::from_config(&Config::default(), price_source)
    }

    /// Create state from configuration.
    pub fn from_config(config: &Config, price_source: Arc<dyn PriceSource>) -> Self {
        Self {
            price_source,
            fallback_price: config.fallback_price,
            retrain_delay: config.retrain_delay(),
            prometheus: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// Override the simulated retraining duration.
    pub fn with_retrain_delay(mut self, delay: Duration) -> Self {
        self.retrain_delay = delay;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("price_source", &self.price_source.name())
            .field("fallback_price", &self.fallback_price)
            .field("retrain_delay", &self.retrain_delay)
            .field("prometheus", &self.prometheus.is_some())
            .finish()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

/// Status endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub success: bool,
    pub status: StatusReport,
}

/// Retrain endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RetrainResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: RetrainOutcome,
}

/// Performance endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PerformanceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub snapshot: PerformanceSnapshot,
}

/// Predict endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: PredictionResult,
}

/// Summary endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: PipelineSummary,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Prometheus exposition, 404 when metrics are disabled.
pub async fn metrics_export(State(state): State<AppState>) -> impl IntoResponse {
    match &state.prometheus {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}

/// Current pipeline status.
#[utoipa::path(
    get,
    path = "/api/ml_pipeline/status",
    tag = "ml_pipeline",
    responses(
        (status = 200, description = "Pipeline status", body = StatusResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_status() -> Result<Json<StatusResponse>, ApiError> {
    let _timer = RequestTimer::new(STATUS);

    Ok(Json(StatusResponse {
        success: true,
        status: pipeline::pipeline_status(),
    }))
}

/// Trigger a (simulated) retraining run. The request body is ignored.
#[utoipa::path(
    post,
    path = "/api/ml_pipeline/retrain",
    tag = "ml_pipeline",
    responses(
        (status = 200, description = "Retraining finished", body = RetrainResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn trigger_retrain(
    State(state): State<AppState>,
) -> Result<Json<RetrainResponse>, ApiError> {
    let _timer = RequestTimer::new(RETRAIN);

    let outcome = pipeline::retrain(state.retrain_delay).await;
    metrics::inc_retrains_triggered();

    Ok(Json(RetrainResponse {
        success: true,
        outcome,
    }))
}

/// Current metrics, 20 hourly history points and drift status.
#[utoipa::path(
    get,
    path = "/api/ml_pipeline/performance",
    tag = "ml_pipeline",
    responses(
        (status = 200, description = "Performance metrics", body = PerformanceResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_performance() -> Result<Json<PerformanceResponse>, ApiError> {
    let _timer = RequestTimer::new(PERFORMANCE);

    let snapshot = pipeline::performance_snapshot(&mut rand::rng(), OffsetDateTime::now_utc());

    Ok(Json(PerformanceResponse {
        success: true,
        snapshot,
    }))
}

/// Predict the next copper price from the latest quote.
///
/// An optional JSON body is accepted and otherwise ignored; malformed bodies
/// are ignored too.
#[utoipa::path(
    post,
    path = "/api/ml_pipeline/predict",
    tag = "ml_pipeline",
    request_body(
        content = String,
        description = "Optional JSON body, ignored",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Prediction", body = PredictResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn make_prediction(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let _timer = RequestTimer::new(PREDICT);

    let request = parse_optional_body(&body);
    debug!(
        has_body = request.is_some(),
        source = state.price_source.name(),
        "Prediction requested"
    );

    let result = run_prediction(&state).await.map_err(ApiError::at(PREDICT))?;
    metrics::inc_predictions_served();

    Ok(Json(PredictResponse {
        success: true,
        result,
    }))
}

/// Condensed status for embedding in the dashboard.
#[utoipa::path(
    get,
    path = "/api/ml_pipeline/summary",
    tag = "ml_pipeline",
    responses(
        (status = 200, description = "Pipeline summary", body = SummaryResponse),
        (status = 500, description = "Internal failure", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_summary() -> Result<Json<SummaryResponse>, ApiError> {
    let _timer = RequestTimer::new(SUMMARY);

    Ok(Json(SummaryResponse {
        success: true,
        summary: pipeline::summary(),
    }))
}

async fn run_prediction(state: &AppState) -> Result<PredictionResult, PipelineError> {
    let quote = state.price_source.latest_price().await?;
    if quote.price.is_none() {
        debug!(fallback = %state.fallback_price, "Quote has no price, using fallback");
        metrics::inc_price_fallbacks();
    }

    pipeline::predict(
        &quote,
        state.fallback_price,
        &mut rand::rng(),
        OffsetDateTime::now_utc(),
    )
}

fn parse_optional_body(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(body).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::MockPriceSource;
    use rust_decimal_macros::dec;

    #[test]
    fn optional_body_parsing_is_best_effort() {
        assert_eq!(parse_optional_body(b""), None);
        assert_eq!(parse_optional_body(b"  \n"), None);
        assert_eq!(parse_optional_body(b"{not json"), None);
        assert_eq!(
            parse_optional_body(br#"{"horizon": 1}"#),
            Some(serde_json::json!({"horizon": 1}))
        );
    }

    #[tokio::test]
    async fn run_prediction_uses_quoted_price() {
        let state = AppState::new(Arc::new(MockPriceSource::with_price(dec!(4.75))));
        let result = run_prediction(&state).await.unwrap();
        assert_eq!(result.current_price, dec!(4.75));
    }

    #[tokio::test]
    async fn run_prediction_propagates_price_failures() {
        let state = AppState::new(Arc::new(MockPriceSource::failing()));
        let result = run_prediction(&state).await;
        assert!(matches!(result, Err(PipelineError::Price(_))));
    }

    #[test]
    fn app_state_defaults_follow_config() {
        let state = AppState::new(Arc::new(MockPriceSource::missing_price()));
        assert_eq!(state.fallback_price, dec!(5.84));
        assert_eq!(state.retrain_delay, Duration::from_secs(1));
        assert!(state.prometheus.is_none());

        let state = state.with_retrain_delay(Duration::ZERO);
        assert_eq!(state.retrain_delay, Duration::ZERO);
    }
}
