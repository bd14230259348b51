//! Persistence seam for generated sets and attempts.
//!
//! Generated sets carry their answer key and test cases, so grading reads them
//! back by id instead of relying on anything remembered between calls.
//! `InMemoryStore` backs the service by default; deployments with a real
//! database implement `GeneratedSetStore` themselves.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{CodingProblem, GenerationKind, Question, ScoreReport, Tier};
use crate::grading::ExamReport;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum GeneratedPayload {
  Exam(Vec<Question>),
  Coding(CodingProblem),
}

impl GeneratedPayload {
  pub fn kind(&self) -> GenerationKind {
    match self {
      GeneratedPayload::Exam(_) => GenerationKind::Exam,
      GeneratedPayload::Coding(_) => GenerationKind::Coding,
    }
  }
}

#[derive(Clone, Debug, Serialize)]
pub struct GeneratedSet {
  pub id: String,
  pub owner: String,
  pub source: Tier,
  pub payload: GeneratedPayload,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", content = "report", rename_all = "snake_case")]
pub enum AttemptReport {
  Exam(ExamReport),
  Coding(ScoreReport),
}

#[derive(Clone, Debug, Serialize)]
pub struct Attempt {
  pub set_id: String,
  pub recorded_at_ms: u64,
  pub report: AttemptReport,
}

#[async_trait]
pub trait GeneratedSetStore: Send + Sync {
  async fn store_generated_set(&self, owner: &str, source: Tier, payload: GeneratedPayload) -> String;
  async fn load_generated_set(&self, id: &str) -> Option<GeneratedSet>;
  async fn record_attempt(&self, owner: &str, set_id: &str, report: AttemptReport);
  async fn attempts_for(&self, owner: &str) -> Vec<Attempt>;
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
  sets: Arc<RwLock<HashMap<String, GeneratedSet>>>,
  attempts: Arc<RwLock<HashMap<String, Vec<Attempt>>>>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

fn now_ms() -> u64 {
  SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

#[async_trait]
impl GeneratedSetStore for InMemoryStore {
  async fn store_generated_set(&self, owner: &str, source: Tier, payload: GeneratedPayload) -> String {
    let id = Uuid::new_v4().to_string();
    debug!(target: "quizforge", %id, %owner, kind = ?payload.kind(), %source, "Storing generated set");
    let set = GeneratedSet { id: id.clone(), owner: owner.to_string(), source, payload };
    self.sets.write().await.insert(id.clone(), set);
    id
  }

  async fn load_generated_set(&self, id: &str) -> Option<GeneratedSet> {
    self.sets.read().await.get(id).cloned()
  }

  async fn record_attempt(&self, owner: &str, set_id: &str, report: AttemptReport) {
    let attempt = Attempt { set_id: set_id.to_string(), recorded_at_ms: now_ms(), report };
    self.attempts.write().await.entry(owner.to_string()).or_default().push(attempt);
  }

  async fn attempts_for(&self, owner: &str) -> Vec<Attempt> {
    self.attempts.read().await.get(owner).cloned().unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::TestCase;

  #[tokio::test]
  async fn sets_and_attempts_round_trip_by_owner() {
    let store = InMemoryStore::new();
    let problem = CodingProblem {
      title: "T".into(),
      description: "D".into(),
      template_code: "t".into(),
      test_cases: vec![TestCase::new("1", "1")],
    };
    let id = store.store_generated_set("alice", Tier::Template, GeneratedPayload::Coding(problem)).await;
    let set = store.load_generated_set(&id).await.unwrap();
    assert_eq!(set.owner, "alice");
    assert_eq!(set.payload.kind(), GenerationKind::Coding);
    assert!(store.load_generated_set("missing").await.is_none());

    store.record_attempt("alice", &id, AttemptReport::Coding(ScoreReport::from_outcomes(vec![]))).await;
    assert_eq!(store.attempts_for("alice").await.len(), 1);
    assert!(store.attempts_for("bob").await.is_empty());
  }
}
