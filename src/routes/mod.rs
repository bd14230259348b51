//! Router assembly: HTTP endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/catalog", get(http::http_get_catalog))
        .route("/api/v1/exams", post(http::http_post_exam))
        .route("/api/v1/exams/:id/submit", post(http::http_post_exam_submit))
        .route("/api/v1/coding/problems", post(http::http_post_coding_problem))
        .route("/api/v1/coding/problems/:id/submit", post(http::http_post_coding_submit))
        .route("/api/v1/run", post(http::http_post_run))
        .route("/api/v1/attempts", get(http::http_get_attempts))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::{AppConfig, SandboxCfg};
    use crate::store::InMemoryStore;

    fn app() -> Router {
        let cfg = AppConfig {
            sandbox: SandboxCfg {
                interpreter: "sh".into(),
                interpreter_args: vec![],
                source_file_name: "main.sh".into(),
                ..SandboxCfg::default()
            },
            ..AppConfig::default()
        };
        let state = AppState::from_parts(cfg, None, Arc::new(InMemoryStore::new())).unwrap();
        build_router(Arc::new(state))
    }

    async fn call(app: &Router, method: &str, uri: &str, owner: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri).header(http::OWNER_HEADER, owner);
        let body = match body {
            Some(v) => {
                req = req.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    #[tokio::test]
    async fn health_and_catalog() {
        let app = app();
        let (status, body) = call(&app, "GET", "/api/v1/health", "u", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);

        let (status, body) = call(&app, "GET", "/api/v1/catalog", "u", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["problems"].as_array().unwrap().len(), 3);
        assert_eq!(body["self_test"]["failed"], 0);
        assert_eq!(body["self_test"]["errored"], 0);
    }

    #[tokio::test]
    async fn exam_is_generated_hidden_and_graded() {
        let app = app();
        let (status, exam) = call(
            &app,
            "POST",
            "/api/v1/exams",
            "alice",
            Some(json!({"topic": "Rust", "subject": "Programming", "count": 4, "difficulty": "hard"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exam["source"], "template");
        let questions = exam["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 4);
        assert!(questions[0].get("correct_answer").is_none());
        assert!(questions[0].get("explanation").is_none());

        let id = exam["id"].as_str().unwrap();
        let uri = format!("/api/v1/exams/{id}/submit");
        let (status, report) = call(&app, "POST", &uri, "alice", Some(json!({"answers": {"0": "A"}}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["total"], 4);
        assert_eq!(report["details"].as_array().unwrap().len(), 4);

        let (_, attempts) = call(&app, "GET", "/api/v1/attempts", "alice", None).await;
        assert_eq!(attempts["attempts"].as_array().unwrap().len(), 1);
        let (_, attempts) = call(&app, "GET", "/api/v1/attempts", "bob", None).await;
        assert!(attempts["attempts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn exam_request_validation() {
        let app = app();
        let (status, body) = call(&app, "POST", "/api/v1/exams", "u", Some(json!({"topic": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("topic"));

        let (status, _) = call(&app, "POST", "/api/v1/exams", "u", Some(json!({"topic": "x", "count": 0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = call(&app, "POST", "/api/v1/exams", "u", Some(json!({"topic": "x", "count": 101}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn coding_problem_is_graded_against_stored_tests() {
        let app = app();
        let (status, out) = call(
            &app,
            "POST",
            "/api/v1/coding/problems",
            "alice",
            Some(json!({"topic": "arrays", "difficulty": "easy"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let total = out["problem"]["test_cases"].as_array().unwrap().len();
        assert!(total > 0);

        let uri = format!("/api/v1/coding/problems/{}/submit", out["id"].as_str().unwrap());
        let (status, report) = call(&app, "POST", &uri, "alice", Some(json!({"code": "echo __nope__"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["total"], total);
        assert_eq!(report["passed"], 0);
        assert_eq!(report["per_test"][0]["verdict"], "wrong_answer");
    }

    #[tokio::test]
    async fn sets_are_scoped_to_their_owner() {
        let app = app();
        let (_, out) = call(&app, "POST", "/api/v1/coding/problems", "alice", Some(json!({"topic": ""}))).await;
        let uri = format!("/api/v1/coding/problems/{}/submit", out["id"].as_str().unwrap());

        let (status, _) = call(&app, "POST", &uri, "mallory", Some(json!({"code": "echo 1"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(&app, "POST", "/api/v1/exams/missing/submit", "alice", Some(json!({"answers": {}}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // A coding set id cannot be graded as an exam.
        let exam_uri = format!("/api/v1/exams/{}/submit", out["id"].as_str().unwrap());
        let (status, _) = call(&app, "POST", &exam_uri, "alice", Some(json!({"answers": {}}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn run_endpoint_executes_code() {
        let app = app();
        let (status, out) = call(
            &app,
            "POST",
            "/api/v1/run",
            "u",
            Some(json!({"code": "read x; echo \"hi $x\"", "stdin": "there\n"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(out["stdout"], "hi there\n");
        assert_eq!(out["exit_code"], 0);
        assert_eq!(out["timed_out"], false);
    }
}
