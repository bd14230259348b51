//! Remote-model tier. Asks an OpenAI-compatible endpoint for questions or a
//! coding problem in the same JSON shape the offline tiers produce.
//!
//! Model output is free text: the first balanced `[...]` / `{...}` region is
//! parsed, malformed items are dropped, and a question shortfall triggers a
//! bounded number of top-up requests.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::Generator;
use crate::config::Prompts;
use crate::domain::{AnswerLetter, CodingProblem, GenerationRequest, Question, TestCase, Tier};
use crate::error::GenerationError;
use crate::llm::ChatClient;
use crate::util::{extract_balanced, fill_template, trunc_for_log};

const LANGUAGE: &str = "python";

pub struct RemoteGenerator {
  client: ChatClient,
  prompts: Prompts,
  max_topup_rounds: usize,
}

impl RemoteGenerator {
  pub fn new(client: ChatClient, prompts: Prompts, max_topup_rounds: usize) -> Self {
    Self { client, prompts, max_topup_rounds }
  }

  async fn request_questions(&self, req: &GenerationRequest, count: usize) -> Result<Vec<Question>, GenerationError> {
    let count_s = count.to_string();
    let user = fill_template(
      &self.prompts.exam_user_template,
      &[
        ("count", count_s.as_str()),
        ("topic", req.topic.as_str()),
        ("subject", req.subject.as_str()),
        ("difficulty", req.difficulty.as_str()),
      ],
    );
    let text = self
      .client
      .chat_plain(&self.prompts.exam_system, &user, 0.7)
      .await
      .map_err(GenerationError::Remote)?;
    parse_questions(&text)
  }
}

#[async_trait]
impl Generator for RemoteGenerator {
  fn tier(&self) -> Tier {
    Tier::Remote
  }

  #[instrument(level = "info", target = "generation", skip_all, fields(topic = %req.topic, count = req.count, model = %self.client.model))]
  async fn generate_questions(&self, req: &GenerationRequest) -> Result<Vec<Question>, GenerationError> {
    let mut accepted = self.request_questions(req, req.count).await?;
    let mut rounds = 0;

    while accepted.len() < req.count && rounds < self.max_topup_rounds {
      rounds += 1;
      let missing = req.count - accepted.len();
      debug!(target: "generation", missing, round = rounds, "Requesting top-up questions");
      match self.request_questions(req, missing).await {
        Ok(more) => accepted.extend(more),
        Err(e) => {
          warn!(target: "generation", error = %e, round = rounds, "Top-up request failed");
          break;
        }
      }
    }

    let mut rng = rand::thread_rng();
    for q in accepted.iter_mut() {
      q.shuffle_options(&mut rng);
    }
    accepted.truncate(req.count);
    info!(target: "generation", produced = accepted.len(), topup_rounds = rounds, "Remote questions parsed");
    Ok(accepted)
  }

  #[instrument(level = "info", target = "generation", skip_all, fields(topic = %req.topic, difficulty = %req.difficulty, model = %self.client.model))]
  async fn generate_coding_problem(&self, req: &GenerationRequest) -> Result<CodingProblem, GenerationError> {
    let user = fill_template(
      &self.prompts.coding_user_template,
      &[("topic", req.topic.as_str()), ("difficulty", req.difficulty.as_str()), ("language", LANGUAGE)],
    );
    let text = self
      .client
      .chat_plain(&self.prompts.coding_system, &user, 0.7)
      .await
      .map_err(GenerationError::Remote)?;
    parse_coding_problem(&text)
  }
}

/// Parse the first JSON array in `text` into questions, dropping malformed items.
pub fn parse_questions(text: &str) -> Result<Vec<Question>, GenerationError> {
  let raw = extract_balanced(text, '[', ']')
    .ok_or_else(|| GenerationError::Parse(format!("no JSON array in: {}", trunc_for_log(text, 200))))?;
  let items: Vec<Value> = serde_json::from_str(raw).map_err(|e| GenerationError::Parse(e.to_string()))?;
  let total = items.len();
  let questions: Vec<Question> = items.iter().filter_map(question_from_value).collect();
  if questions.len() < total {
    debug!(target: "generation", dropped = total - questions.len(), "Discarded malformed questions");
  }
  Ok(questions)
}

fn question_from_value(v: &Value) -> Option<Question> {
  let text = v.get("question")?.as_str()?.trim();
  if text.is_empty() {
    return None;
  }
  let opts = v.get("options")?.as_array()?;
  if opts.len() != 4 {
    return None;
  }
  let mut options: [String; 4] = Default::default();
  for (slot, o) in options.iter_mut().zip(opts) {
    *slot = o.as_str()?.trim().to_string();
  }
  let correct_answer = AnswerLetter::parse(v.get("correct_answer")?.as_str()?)?;
  let explanation = v.get("explanation")?.as_str()?.trim().to_string();
  Some(Question { text: text.to_string(), options, correct_answer, explanation })
}

/// Parse the first JSON object in `text` into a coding problem.
pub fn parse_coding_problem(text: &str) -> Result<CodingProblem, GenerationError> {
  let raw = extract_balanced(text, '{', '}')
    .ok_or_else(|| GenerationError::Parse(format!("no JSON object in: {}", trunc_for_log(text, 200))))?;
  let v: Value = serde_json::from_str(raw).map_err(|e| GenerationError::Parse(e.to_string()))?;

  let field = |name: &str| v.get(name).and_then(Value::as_str).map(|s| s.to_string()).unwrap_or_default();
  let tests = v
    .get("test_cases")
    .or_else(|| v.get("tests"))
    .and_then(Value::as_array)
    .map(|items| items.iter().filter_map(test_case_from_value).collect::<Vec<_>>())
    .unwrap_or_default();
  if tests.is_empty() {
    return Err(GenerationError::tier(Tier::Remote, "problem has no usable test cases"));
  }

  Ok(CodingProblem {
    title: field("title"),
    description: field("description"),
    template_code: field("template"),
    test_cases: tests,
  })
}

fn test_case_from_value(v: &Value) -> Option<TestCase> {
  Some(TestCase::new(stringify(v.get("input")?)?, stringify(v.get("expected")?)?))
}

fn stringify(v: &Value) -> Option<String> {
  match v {
    Value::String(s) => Some(s.clone()),
    Value::Null => None,
    other => Some(other.to_string()),
  }
}
