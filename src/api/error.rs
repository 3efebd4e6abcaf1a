//! Handler error type and its HTTP rendering.
//!
//! Every pipeline endpoint reports failure the same way: HTTP 500 with
//! `{"success": false, "error": "<message>"}`. There is no client error class.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::error::PipelineError;
use crate::metrics;

/// Failure body shared by all pipeline endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Stringified error.
    pub error: String,
}

/// A pipeline failure caught at a handler boundary.
#[derive(Debug)]
pub struct ApiError {
    /// Endpoint label for logs and metrics.
    endpoint: &'static str,
    /// Underlying failure.
    source: PipelineError,
}

impl ApiError {
    /// Wrap `source` raised while serving `endpoint`.
    pub fn new(endpoint: &'static str, source: PipelineError) -> Self {
        Self { endpoint, source }
    }

    /// Closure form for `map_err`.
    pub fn at(endpoint: &'static str) -> impl FnOnce(PipelineError) -> Self {
        move |source| Self::new(endpoint, source)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(endpoint = self.endpoint, error = %self.source, "Pipeline request failed");
        metrics::inc_pipeline_errors(self.endpoint);
        internal_error(self.source.to_string())
    }
}

/// Convert a handler panic into the standard failure body.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    error!(panic = %message, "Handler panicked");
    metrics::inc_pipeline_errors("panic");
    internal_error(format!("internal error: {}", message))
}

fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PriceError;

    #[test]
    fn api_error_renders_500() {
        let err = ApiError::new(
            "predict",
            PipelineError::Price(PriceError::Unavailable("down".to_string())),
        );
        assert_eq!(err.endpoint, "predict");
        assert_eq!(err.to_string(), "price source unavailable: down");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn panic_payloads_become_500() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
