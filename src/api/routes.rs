//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use super::docs::openapi_json;
use super::error::handle_panic;
use super::handlers::{
    get_performance, get_status, get_summary, health, make_prediction, metrics_export,
    trigger_retrain, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Health and observability
        .route("/health", get(health))
        .route("/metrics", get(metrics_export))
        .route("/api-docs/openapi.json", get(openapi_json))
        // Pipeline endpoints
        .route("/api/ml_pipeline/status", get(get_status))
        .route("/api/ml_pipeline/retrain", post(trigger_retrain))
        .route("/api/ml_pipeline/performance", get(get_performance))
        .route("/api/ml_pipeline/predict", post(make_prediction))
        .route("/api/ml_pipeline/summary", get(get_summary))
        .with_state(state);

    with_layers(router)
}

/// Panic capture, CORS for the dashboard origin, request tracing.
fn with_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
