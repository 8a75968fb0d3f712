//! Verification handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use smartcaptcha_core::Decision;

use crate::{AppResult, AppState};

/// Classify one telemetry sample
///
/// The body stays untyped here; the engine validates it so a missing or
/// malformed field comes back as a 400 naming that field.
pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<Decision>> {
    let Json(payload) = payload?;
    let decision = state.engine.verify(&payload)?;

    tracing::debug!(
        decision = %decision.decision,
        confidence = decision.confidence,
        mode = %decision.mode,
        "Sample verified"
    );

    Ok(Json(decision))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use smartcaptcha_core::logic::model::{
        load_or_fallback, Classifier, InferenceError, ModelFormat, ModelMetadata,
    };
    use smartcaptcha_core::{DecisionEngine, FeatureVector};
    use tower::ServiceExt;

    use crate::{config::Config, create_router, AppState};

    struct Broken {
        metadata: ModelMetadata,
    }

    impl Classifier for Broken {
        fn predict_human(&self, _vector: &FeatureVector) -> Result<f64, InferenceError> {
            Err(InferenceError::MissingOutput("probabilities".to_string()))
        }

        fn metadata(&self) -> &ModelMetadata {
            &self.metadata
        }
    }

    fn app(classifier: Option<Arc<dyn Classifier>>) -> axum::Router {
        create_router(AppState {
            engine: Arc::new(DecisionEngine::with_classifier(classifier)),
            config: Config::default(),
        })
    }

    async fn post_verify(app: axum::Router, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/verify")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        send(app, request).await
    }

    async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn scenario_a() -> Value {
        json!({
            "avg_mouse_speed": 3.5,
            "mouse_path_entropy": 0.02,
            "click_delay": 0.05,
            "task_completion_time": 0.3,
            "idle_time": 0
        })
    }

    fn scenario_b() -> Value {
        json!({
            "avg_mouse_speed": 0.5,
            "mouse_path_entropy": 0.3,
            "click_delay": 1.0,
            "task_completion_time": 2.0,
            "idle_time": 1.0
        })
    }

    #[tokio::test]
    async fn test_rule_blocked_sample() {
        let (status, body) = post_verify(app(None), scenario_a().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"decision": "bot", "confidence": 0.0, "mode": "rule-blocked"}));
    }

    #[tokio::test]
    async fn test_fallback_without_model_file() {
        let classifier = load_or_fallback("/nonexistent/captcha_model.onnx");
        let (status, body) = post_verify(app(classifier), scenario_b().to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"decision": "human", "confidence": 0.5, "mode": "fallback"}));
    }

    #[tokio::test]
    async fn test_forest_model_decides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("captcha_model.json");
        std::fs::write(
            &path,
            json!({
                "trees": [{
                    "children_left": [1, -1, -1],
                    "children_right": [2, -1, -1],
                    "feature": [1, -2, -2],
                    "threshold": [0.15, -2.0, -2.0],
                    "value": [[300.0, 500.0], [290.0, 10.0], [10.0, 490.0]]
                }]
            })
            .to_string(),
        )
        .unwrap();

        let classifier = load_or_fallback(&path);
        assert!(classifier.is_some());

        let (status, body) = post_verify(app(classifier), scenario_b().to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"decision": "human", "confidence": 0.98, "mode": "ml-enabled"}));
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let mut payload = scenario_b();
        payload.as_object_mut().unwrap().remove("idle_time");

        let (status, body) = post_verify(app(None), payload.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(body["error"].as_str().unwrap().contains("idle_time"));
    }

    #[tokio::test]
    async fn test_non_numeric_field_is_bad_request() {
        let mut payload = scenario_b();
        payload["click_delay"] = json!("soon");

        let (status, body) = post_verify(app(None), payload.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("click_delay"));
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_shape() {
        let (status, body) = post_verify(app(None), "{ not json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_uses_error_shape() {
        let request = Request::builder()
            .method("POST")
            .uri("/verify")
            .body(Body::from(scenario_b().to_string()))
            .unwrap();

        let (status, body) = send(app(None), request).await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["status"], 415);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_inference_failure_is_server_error() {
        let classifier: Arc<dyn Classifier> = Arc::new(Broken {
            metadata: ModelMetadata::new("<broken>", ModelFormat::Onnx),
        });

        let (status, body) = post_verify(app(Some(classifier)), scenario_b().to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn test_root_and_status() {
        let (status, body) = get(app(None), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "SmartCAPTCHA backend alive");

        let (status, body) = get(app(None), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = get(app(None), "/api/v1/engine/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model_loaded"], false);
        assert_eq!(body["policy"], "strict");
        assert_eq!(body["layout"]["feature_count"], 5);
    }
}
