use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use newsguard_core::traits::Predictor;
use newsguard_model::FakeNewsModel;

/// Outcome of the startup load. Fixed for the life of the process.
#[derive(Clone)]
pub enum ModelState {
    Loaded(Arc<dyn Predictor>),
    Degraded { reason: String },
}

impl ModelState {
    /// Load both artifacts; any failure yields `Degraded` rather than an error.
    pub fn load(vectorizer_path: &Path, model_path: &Path) -> Self {
        info!(vectorizer = %vectorizer_path.display(), model = %model_path.display(), "loading model artifacts");
        match FakeNewsModel::load(vectorizer_path, model_path) {
            Ok(model) => {
                info!("model and vectorizer loaded");
                ModelState::Loaded(Arc::new(model))
            }
            Err(e) => {
                error!(error = %e, "model artifacts unavailable; run newsguard-train to generate them");
                ModelState::Degraded { reason: e.to_string() }
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelState::Loaded(_))
    }

    /// Why the startup load failed, if it did.
    pub fn degraded_reason(&self) -> Option<&str> {
        match self {
            ModelState::Loaded(_) => None,
            ModelState::Degraded { reason } => Some(reason),
        }
    }
}

pub struct AppState {
    pub model: ModelState,
}

impl AppState {
    pub fn new(model: ModelState) -> Self {
        Self { model }
    }

    pub fn with_predictor(predictor: Arc<dyn Predictor>) -> Self {
        Self::new(ModelState::Loaded(predictor))
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        Self::new(ModelState::Degraded { reason: reason.into() })
    }
}
