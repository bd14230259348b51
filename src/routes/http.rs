//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs identifiers and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::{HeaderMap, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use tracing::{error, info, instrument};

use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

/// Caller identity as resolved by the upstream auth layer.
pub const OWNER_HEADER: &str = "x-owner-id";
const ANONYMOUS: &str = "anonymous";

fn owner(headers: &HeaderMap) -> String {
  headers
    .get(OWNER_HEADER)
    .and_then(|v| v.to_str().ok())
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .unwrap_or(ANONYMOUS)
    .to_string()
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Generation(_) | ApiError::Sandbox(_) => {
        error!(target: "quizforge", error = %self, "Request failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_catalog(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(catalog_summary(&state))
}

#[instrument(level = "info", skip(state, headers, body), fields(topic = %body.topic))]
pub async fn http_post_exam(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<ExamIn>,
) -> Result<Json<ExamOut>, ApiError> {
  let owner = owner(&headers);
  create_exam(&state, &owner, body).await.map(Json)
}

#[instrument(level = "info", skip(state, headers, body), fields(%id))]
pub async fn http_post_exam_submit(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  headers: HeaderMap,
  Json(body): Json<ExamSubmitIn>,
) -> Result<impl IntoResponse, ApiError> {
  let owner = owner(&headers);
  let report = submit_exam(&state, &owner, &id, body).await?;
  info!(target: "quizforge", %id, score = %format!("{:.1}", report.score_percent), "HTTP exam submitted");
  Ok(Json(report))
}

#[instrument(level = "info", skip(state, headers, body), fields(topic = %body.topic))]
pub async fn http_post_coding_problem(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<CodingProblemIn>,
) -> Result<Json<CodingProblemOut>, ApiError> {
  let owner = owner(&headers);
  create_coding_problem(&state, &owner, body).await.map(Json)
}

#[instrument(level = "info", skip(state, headers, body), fields(%id, code_len = body.code.len()))]
pub async fn http_post_coding_submit(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  headers: HeaderMap,
  Json(body): Json<CodingSubmitIn>,
) -> Result<impl IntoResponse, ApiError> {
  let owner = owner(&headers);
  let report = submit_coding(&state, &owner, &id, body).await?;
  info!(target: "quizforge", %id, passed = report.passed, total = report.total, "HTTP coding solution graded");
  Ok(Json(report))
}

#[instrument(level = "info", skip(state, body), fields(code_len = body.code.len()))]
pub async fn http_post_run(
  State(state): State<Arc<AppState>>,
  Json(body): Json<RunIn>,
) -> Result<impl IntoResponse, ApiError> {
  run_code(&state, body).await.map(Json)
}

#[instrument(level = "info", skip(state, headers))]
pub async fn http_get_attempts(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
  Json(attempts(&state, &owner(&headers)).await)
}
