//! Core behaviors behind the HTTP handlers.
//!
//! Generation stores the accepted set (answer key and test cases included) and
//! returns its id; grading loads that set back by id. Nothing is remembered
//! between calls outside the store.

use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::domain::{Difficulty, ExecutionResult, ScoreReport};
use crate::error::ApiError;
use crate::grading::{grade_exam, ExamReport};
use crate::protocol::*;
use crate::state::AppState;
use crate::store::{AttemptReport, GeneratedPayload, GeneratedSet};

pub const DEFAULT_QUESTION_COUNT: usize = 20;
pub const MAX_QUESTION_COUNT: usize = 100;

fn difficulty_or(raw: Option<&str>, default: Difficulty) -> Difficulty {
  match raw.map(Difficulty::parse) {
    Some(Some(d)) => d,
    Some(None) => {
      debug!(target: "quizforge", raw = ?raw, %default, "Unknown difficulty; using default");
      default
    }
    None => default,
  }
}

pub fn catalog_summary(state: &AppState) -> CatalogOut {
  let problems = Difficulty::ALL
    .iter()
    .map(|d| CatalogTierOut {
      difficulty: *d,
      titles: state.catalog.problems(*d).iter().map(|e| e.problem.title.clone()).collect(),
    })
    .collect();
  CatalogOut {
    version: state.catalog.version(),
    problems,
    self_test: SelfTestSummary::from(state.catalog.self_test()),
  }
}

#[instrument(level = "info", skip(state, body), fields(%owner, topic = %body.topic))]
pub async fn create_exam(state: &AppState, owner: &str, body: ExamIn) -> Result<ExamOut, ApiError> {
  if body.topic.trim().is_empty() {
    return Err(ApiError::BadRequest("topic must not be empty".into()));
  }
  let count = body.count.unwrap_or(DEFAULT_QUESTION_COUNT);
  if count == 0 || count > MAX_QUESTION_COUNT {
    return Err(ApiError::BadRequest(format!("count must be between 1 and {MAX_QUESTION_COUNT}")));
  }
  let difficulty = difficulty_or(body.difficulty.as_deref(), Difficulty::Medium);
  let subject = if body.subject.trim().is_empty() { "General" } else { body.subject.trim() };

  let generated = state
    .orchestrator
    .generate_questions(body.topic.trim(), subject, count, difficulty)
    .await?;
  let questions: Vec<QuestionOut> = generated.payload.iter().enumerate().map(|(i, q)| to_out(i, q)).collect();
  let id = state
    .store
    .store_generated_set(owner, generated.source, GeneratedPayload::Exam(generated.payload))
    .await;

  info!(target: "quizforge", %id, source = %generated.source, count = questions.len(), "Exam generated");
  Ok(ExamOut { id, source: generated.source, questions })
}

async fn load_owned(state: &AppState, owner: &str, id: &str) -> Result<GeneratedSet, ApiError> {
  state
    .store
    .load_generated_set(id)
    .await
    .filter(|set| set.owner == owner)
    .ok_or_else(|| ApiError::NotFound(format!("unknown set id: {id}")))
}

#[instrument(level = "info", skip(state, body), fields(%owner, %id, answers = body.answers.len()))]
pub async fn submit_exam(state: &AppState, owner: &str, id: &str, body: ExamSubmitIn) -> Result<ExamReport, ApiError> {
  let set = load_owned(state, owner, id).await?;
  let GeneratedPayload::Exam(questions) = &set.payload else {
    return Err(ApiError::BadRequest(format!("set {id} is not an exam")));
  };

  let mut answers = HashMap::with_capacity(body.answers.len());
  for (k, v) in body.answers {
    let idx = k
      .trim()
      .parse::<usize>()
      .map_err(|_| ApiError::BadRequest(format!("answer key '{k}' is not a question index")))?;
    answers.insert(idx, v);
  }

  let report = grade_exam(questions, &answers);
  state.store.record_attempt(owner, id, AttemptReport::Exam(report.clone())).await;
  info!(target: "quizforge", %id, correct = report.correct, total = report.total, "Exam graded");
  Ok(report)
}

#[instrument(level = "info", skip(state, body), fields(%owner, topic = %body.topic))]
pub async fn create_coding_problem(state: &AppState, owner: &str, body: CodingProblemIn) -> Result<CodingProblemOut, ApiError> {
  let difficulty = difficulty_or(body.difficulty.as_deref(), Difficulty::Easy);
  let generated = state
    .orchestrator
    .generate_coding_problem(body.topic.trim(), difficulty)
    .await?;
  let problem = generated.payload.clone();
  let id = state
    .store
    .store_generated_set(owner, generated.source, GeneratedPayload::Coding(generated.payload))
    .await;

  info!(target: "quizforge", %id, source = %generated.source, title = %problem.title, "Coding problem generated");
  Ok(CodingProblemOut { id, source: generated.source, problem })
}

#[instrument(level = "info", skip(state, body), fields(%owner, %id, code_len = body.code.len()))]
pub async fn submit_coding(state: &AppState, owner: &str, id: &str, body: CodingSubmitIn) -> Result<ScoreReport, ApiError> {
  let set = load_owned(state, owner, id).await?;
  let GeneratedPayload::Coding(problem) = &set.payload else {
    return Err(ApiError::BadRequest(format!("set {id} is not a coding problem")));
  };

  let report = state.evaluator.evaluate(&body.code, &problem.test_cases).await;
  state.store.record_attempt(owner, id, AttemptReport::Coding(report.clone())).await;
  info!(target: "quizforge", %id, all_passed = report.all_passed(), "Coding solution graded");
  Ok(report)
}

#[instrument(level = "info", skip(state, body), fields(code_len = body.code.len(), stdin_len = body.stdin.len()))]
pub async fn run_code(state: &AppState, body: RunIn) -> Result<ExecutionResult, ApiError> {
  let timeout = state.sandbox.run_timeout();
  let result = state.sandbox.run(&body.code, &body.stdin, timeout).await?;
  debug!(target: "quizforge", ok = result.succeeded(), exit_code = result.exit_code, timed_out = result.timed_out, "Free-form run finished");
  Ok(result)
}

pub async fn attempts(state: &AppState, owner: &str) -> AttemptsOut {
  AttemptsOut { owner: owner.to_string(), attempts: state.store.attempts_for(owner).await }
}
