#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! newsguard-service
//!
//! HTTP surface over a loaded `Predictor`: `GET /` for liveness and
//! `POST /predict` for classification.

pub mod error;
pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use newsguard_core::Config;

pub use error::ApiError;
pub use state::{AppState, ModelState};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/predict", post(handlers::predict))
        .with_state(state)
        // whole articles can run past axum's 2 MB default; bodies are uncapped
        .layer(DefaultBodyLimit::disable())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!("http_request", method = %request.method(), path = %request.uri().path())
            }),
        )
}

/// Load artifacts once, then serve until Ctrl-C.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let model = ModelState::load(&config.vectorizer_path(), &config.model_path());
    let state = Arc::new(AppState::new(model));
    let app = router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("newsguard ML service listening on http://{addr}");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
