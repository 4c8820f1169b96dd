use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use newsguard_core::Label;

use crate::error::ApiError;
use crate::state::{AppState, ModelState};

pub const INFO_MESSAGE: &str = "Fake News Detector ML API is running.";

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub input_text: String,
    pub prediction: Label,
}

pub async fn home() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok".to_string(), message: INFO_MESSAGE.to_string() })
}

/// A degraded service answers 500 before looking at the body. Otherwise the
/// body is parsed as JSON whatever the `Content-Type` says.
pub async fn predict(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<PredictResponse>, ApiError> {
    let predictor = match &state.model {
        ModelState::Loaded(p) => Arc::clone(p),
        ModelState::Degraded { reason } => {
            warn!(%reason, "prediction requested but no model is loaded");
            return Err(ApiError::ModelUnavailable);
        }
    };

    let request: PredictRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {e}")))?;
    let text = request.text.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ApiError::Validation("Missing 'text' in request body.".to_string()));
    }

    let input = text.to_string();
    // A panic inside the model surfaces as a JoinError instead of tearing down the connection.
    let prediction = tokio::task::spawn_blocking(move || predictor.predict(&input))
        .await
        .map_err(|e| ApiError::Internal(format!("prediction task failed: {e}")))?
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(PredictResponse { input_text: text.to_string(), prediction }))
}
