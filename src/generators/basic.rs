//! Floor tier. A closed template system with no external dependency: it never
//! fails for a well-formed request, which makes every orchestrator call total.

use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::instrument;

use super::Generator;
use crate::catalog::questions::{basic_options, BASIC_STEMS};
use crate::catalog::ProblemCatalog;
use crate::domain::{AnswerLetter, CodingProblem, GenerationRequest, Question, Tier};
use crate::error::GenerationError;
use crate::util::fill_template;

pub struct BasicFallbackGenerator {
  catalog: Arc<ProblemCatalog>,
}

impl BasicFallbackGenerator {
  pub fn new(catalog: Arc<ProblemCatalog>) -> Self {
    Self { catalog }
  }
}

#[async_trait]
impl Generator for BasicFallbackGenerator {
  fn tier(&self) -> Tier {
    Tier::Basic
  }

  #[instrument(level = "debug", target = "generation", skip_all, fields(topic = %req.topic, count = req.count))]
  async fn generate_questions(&self, req: &GenerationRequest) -> Result<Vec<Question>, GenerationError> {
    let vars = [("topic", req.topic.as_str()), ("subject", req.subject.as_str())];
    let (options, correct_idx, explanation) = basic_options(req.difficulty);
    let correct_answer = AnswerLetter::from_index(correct_idx)
      .ok_or_else(|| GenerationError::tier(Tier::Basic, format!("bad designated index {correct_idx}")))?;

    let mut rng = rand::thread_rng();
    let questions = (0..req.count)
      .map(|i| {
        let mut q = Question {
          text: fill_template(BASIC_STEMS[i % BASIC_STEMS.len()], &vars),
          options: options.map(|o| fill_template(o, &vars)),
          correct_answer,
          explanation: fill_template(explanation, &vars),
        };
        q.shuffle_options(&mut rng);
        q
      })
      .collect();
    Ok(questions)
  }

  #[instrument(level = "debug", target = "generation", skip_all, fields(difficulty = %req.difficulty))]
  async fn generate_coding_problem(&self, req: &GenerationRequest) -> Result<CodingProblem, GenerationError> {
    self
      .catalog
      .basic_problems(req.difficulty)
      .choose(&mut rand::thread_rng())
      .map(|e| e.problem.clone())
      .ok_or_else(|| GenerationError::tier(Tier::Basic, format!("no floor problems for {}", req.difficulty)))
  }
}
