use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

pub const MODEL_NOT_LOADED: &str = "Model not loaded. Please train the model first.";
pub const INTERNAL_PREDICTION_ERROR: &str = "Internal server error during prediction.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Client sent a missing, blank, or malformed `text`.
    #[error("{0}")]
    Validation(String),

    #[error("{MODEL_NOT_LOADED}")]
    ModelUnavailable,

    /// Carries the detail for the log; the caller only sees a generic message.
    #[error("{INTERNAL_PREDICTION_ERROR}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(detail) => {
                error!(detail = %detail, "prediction error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
