//! OpenAPI document for the pipeline endpoints.

use axum::Json;
use utoipa::OpenApi;

use super::error::ErrorResponse;
use super::handlers::{
    self, PerformanceResponse, PredictResponse, RetrainResponse, StatusResponse, SummaryResponse,
};

/// OpenAPI description of `/api/ml_pipeline/*`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CopperFlow ML pipeline API",
        description = "Pipeline status, performance metrics and copper price predictions"
    ),
    paths(
        handlers::get_status,
        handlers::trigger_retrain,
        handlers::get_performance,
        handlers::make_prediction,
        handlers::get_summary
    ),
    components(schemas(
        StatusResponse,
        RetrainResponse,
        PerformanceResponse,
        PredictResponse,
        SummaryResponse,
        ErrorResponse
    )),
    tags((name = "ml_pipeline", description = "Simulated ML pipeline"))
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_pipeline_path() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for path in [
            "/api/ml_pipeline/status",
            "/api/ml_pipeline/retrain",
            "/api/ml_pipeline/performance",
            "/api/ml_pipeline/predict",
            "/api/ml_pipeline/summary",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == path), "missing {}", path);
        }
    }

    #[test]
    fn predict_documents_its_optional_body() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let predict = &doc["paths"]["/api/ml_pipeline/predict"]["post"];

        assert!(predict["requestBody"]["content"]["application/json"].is_object());
        assert!(predict["responses"]["500"].is_object());
    }
}
