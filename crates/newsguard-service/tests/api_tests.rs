use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use newsguard_core::traits::Predictor;
use newsguard_core::{Config, Error, Label, Sample};
use newsguard_model::Trainer;
use newsguard_service::{router, AppState, ModelState};

struct Always(Label);

impl Predictor for Always {
    fn predict(&self, _text: &str) -> newsguard_core::Result<Label> {
        Ok(self.0)
    }
}

struct Failing;

impl Predictor for Failing {
    fn predict(&self, _text: &str) -> newsguard_core::Result<Label> {
        Err(Error::InvalidConfig("vectorizer exploded".into()))
    }
}

struct Panicking;

impl Predictor for Panicking {
    fn predict(&self, _text: &str) -> newsguard_core::Result<Label> {
        panic!("model bug")
    }
}

async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let resp = router(Arc::new(state)).oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn post_predict(body: &str) -> Request<Body> {
    Request::post("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn home_reports_running_in_both_states() {
    for state in [AppState::with_predictor(Arc::new(Always(Label::Real))), AppState::degraded("no artifacts")] {
        let (status, json) = send(state, Request::get("/").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "Fake News Detector ML API is running.");
    }
}

#[tokio::test]
async fn predict_echoes_trimmed_text_and_label() {
    let state = AppState::with_predictor(Arc::new(Always(Label::Fake)));
    let (status, json) = send(state, post_predict(r#"{"text": "  Aliens Built The Pyramids  "}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["input_text"], "Aliens Built The Pyramids");
    assert_eq!(json["prediction"], "FAKE");
}

#[tokio::test]
async fn blank_or_missing_text_is_rejected() {
    for body in [r#"{}"#, r#"{"text": ""}"#, r#"{"text": "   \n\t"}"#, r#"{"text": null}"#] {
        let state = AppState::with_predictor(Arc::new(Always(Label::Real)));
        let (status, json) = send(state, post_predict(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json["error"], "Missing 'text' in request body.");
    }
}

#[tokio::test]
async fn degraded_service_rejects_every_body() {
    for body in [r#"{"text": " "}"#, r#"{}"#, "{not json", ""] {
        let (status, json) = send(AppState::degraded("missing"), post_predict(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body: {body}");
        assert_eq!(json["error"], "Model not loaded. Please train the model first.");
    }
}

#[tokio::test]
async fn large_articles_are_accepted() {
    let article = "word ".repeat(500_000);
    let body = serde_json::json!({ "text": article }).to_string();
    assert!(body.len() > 2 * 1024 * 1024);
    let state = AppState::with_predictor(Arc::new(Always(Label::Real)));
    let (status, json) = send(state, post_predict(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["prediction"], "REAL");
    assert_eq!(json["input_text"].as_str().map(str::len), Some(article.trim().len()));
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let state = AppState::with_predictor(Arc::new(Always(Label::Real)));
    let (status, json) = send(state, post_predict("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn body_is_parsed_without_content_type() {
    let state = AppState::with_predictor(Arc::new(Always(Label::Real)));
    let request = Request::post("/predict").body(Body::from(r#"{"text":"budget"}"#)).unwrap();
    let (status, json) = send(state, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["prediction"], "REAL");
}

#[tokio::test]
async fn degraded_service_reports_missing_model() {
    let (status, json) = send(AppState::degraded("missing"), post_predict(r#"{"text": "hello"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Model not loaded. Please train the model first.");
}

#[tokio::test]
async fn predictor_failures_return_generic_message() {
    let states = [AppState::with_predictor(Arc::new(Failing)), AppState::with_predictor(Arc::new(Panicking))];
    for state in states {
        let (status, json) = send(state, post_predict(r#"{"text": "hello"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal server error during prediction.");
    }
}

#[tokio::test]
async fn missing_artifacts_load_as_degraded() {
    let tmp = tempfile::TempDir::new().unwrap();
    let state = ModelState::load(&tmp.path().join("vectorizer.json"), &tmp.path().join("model.json"));
    assert!(!state.is_loaded());
    assert!(state.degraded_reason().is_some_and(|r| r.contains("vectorizer.json")), "{:?}", state.degraded_reason());
}

#[tokio::test]
async fn trained_model_serves_predictions() {
    let fake = ["shocking hoax exposed", "aliens miracle cure secret", "viral conspiracy bombshell"];
    let real = ["senate passes budget", "minister statement to parliament", "treasury quarterly report"];
    let samples: Vec<Sample> = (0..10)
        .flat_map(|_| {
            fake.iter()
                .map(|t| Sample::new(*t, Label::Fake))
                .chain(real.iter().map(|t| Sample::new(*t, Label::Real)))
        })
        .collect();

    let tmp = tempfile::TempDir::new().unwrap();
    let vectorizer_path = tmp.path().join("vectorizer.json");
    let model_path = tmp.path().join("model.json");
    let outcome = Trainer::new(Config::default()).train(&samples).unwrap();
    outcome.model.save(&vectorizer_path, &model_path).unwrap();

    let model = ModelState::load(&vectorizer_path, &model_path);
    assert!(model.is_loaded());
    assert_eq!(model.degraded_reason(), None);
    let (status, json) = send(AppState::new(model), post_predict(r#"{"text": "Senate budget statement"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let label = json["prediction"].as_str().unwrap();
    assert!(label == "FAKE" || label == "REAL");
}
