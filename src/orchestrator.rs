//! Tiered generation with a validation gate.
//!
//! Tiers are tried in a fixed order. Each call runs inside a timeout, and any
//! error, timeout or rejected payload counts as a tier failure: it is logged
//! and the next tier is tried. The first accepted payload wins and later tiers
//! are not invoked. `GenerationError::Exhausted` is only returned when every
//! tier, including the floor, has failed.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::{CodingProblem, Difficulty, GenerationRequest, Question, Tier};
use crate::error::GenerationError;
use crate::generators::Generator;

type TierFuture<'x, T> = Pin<Box<dyn Future<Output = Result<T, GenerationError>> + Send + 'x>>;

/// An accepted payload and the tier that produced it.
#[derive(Clone, Debug, Serialize)]
pub struct Generated<T> {
  pub payload: T,
  pub source: Tier,
}

pub struct GenerationOrchestrator {
  tiers: Vec<Box<dyn Generator>>,
  tier_timeout: Duration,
}

impl GenerationOrchestrator {
  /// `tiers` must already be in priority order.
  pub fn new(tiers: Vec<Box<dyn Generator>>, tier_timeout: Duration) -> Self {
    Self { tiers, tier_timeout }
  }

  pub fn tiers(&self) -> Vec<Tier> {
    self.tiers.iter().map(|t| t.tier()).collect()
  }

  #[instrument(level = "info", target = "generation", skip(self), fields(tiers = self.tiers.len()))]
  pub async fn generate_questions(
    &self,
    topic: &str,
    subject: &str,
    count: usize,
    difficulty: Difficulty,
  ) -> Result<Generated<Vec<Question>>, GenerationError> {
    let req = GenerationRequest::exam(topic, subject, count, difficulty);
    self.run(&req, call_questions, validate_questions).await
  }

  #[instrument(level = "info", target = "generation", skip(self), fields(tiers = self.tiers.len()))]
  pub async fn generate_coding_problem(
    &self,
    topic: &str,
    difficulty: Difficulty,
  ) -> Result<Generated<CodingProblem>, GenerationError> {
    let req = GenerationRequest::coding(topic, difficulty);
    self.run(&req, call_coding_problem, validate_problem).await
  }

  async fn run<T, F, V>(&self, req: &GenerationRequest, call: F, validate: V) -> Result<Generated<T>, GenerationError>
  where
    F: for<'x> Fn(&'x dyn Generator, &'x GenerationRequest) -> TierFuture<'x, T>,
    V: Fn(&GenerationRequest, T) -> Result<T, String>,
  {
    let mut last_error = String::from("no tiers configured");

    for generator in &self.tiers {
      let tier = generator.tier();
      let outcome = match tokio::time::timeout(self.tier_timeout, call(generator.as_ref(), req)).await {
        Ok(Ok(payload)) => validate(req, payload).map_err(|reason| GenerationError::tier(tier, reason)),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(GenerationError::tier(tier, format!("timed out after {:?}", self.tier_timeout))),
      };

      match outcome {
        Ok(payload) => {
          info!(target: "generation", %tier, kind = ?req.kind, topic = %req.topic, "Tier accepted");
          return Ok(Generated { payload, source: tier });
        }
        Err(e) => {
          warn!(target: "generation", %tier, kind = ?req.kind, error = %e, "Tier failed; falling through");
          last_error = e.to_string();
        }
      }
    }

    Err(GenerationError::Exhausted(last_error))
  }
}

fn call_questions<'x>(g: &'x dyn Generator, req: &'x GenerationRequest) -> TierFuture<'x, Vec<Question>> {
  g.generate_questions(req)
}

fn call_coding_problem<'x>(g: &'x dyn Generator, req: &'x GenerationRequest) -> TierFuture<'x, CodingProblem> {
  g.generate_coding_problem(req)
}

fn validate_questions(req: &GenerationRequest, mut qs: Vec<Question>) -> Result<Vec<Question>, String> {
  if qs.len() < req.count {
    return Err(format!("returned {} of {} questions", qs.len(), req.count));
  }
  qs.truncate(req.count);
  Ok(qs)
}

fn validate_problem(_req: &GenerationRequest, p: CodingProblem) -> Result<CodingProblem, String> {
  let missing: Vec<&str> = [("title", &p.title), ("description", &p.description), ("template", &p.template_code)]
    .into_iter()
    .filter(|(_, v)| v.trim().is_empty())
    .map(|(name, _)| name)
    .collect();
  if !missing.is_empty() {
    return Err(format!("missing required fields: {}", missing.join(", ")));
  }
  if p.test_cases.is_empty() {
    return Err("problem has no test cases".into());
  }
  Ok(p)
}
