//! Loading service configuration (prompts, generation/sandbox knobs, extra
//! catalog problems) from TOML, with environment overrides.
//!
//! See `AppConfig` for the expected schema.

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::TestCase;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub generation: GenerationCfg,
  #[serde(default)]
  pub sandbox: SandboxCfg,
  #[serde(default)]
  pub problems: Vec<ProblemCfg>,
}

/// Extra catalog problem accepted in TOML configuration.
/// `verifier` is a symbolic name resolved against the built-in verifiers at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct ProblemCfg {
  pub verifier: String,
  pub difficulty: String,
  pub title: String,
  pub description: String,
  pub template: String,
  #[serde(default)]
  pub test_cases: Vec<TestCase>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GenerationCfg {
  /// Hard bound on one tier call, including every remote round trip it makes.
  pub tier_timeout_secs: u64,
  /// How many extra remote requests may be made to cover a question shortfall.
  pub max_topup_rounds: usize,
}

impl Default for GenerationCfg {
  fn default() -> Self {
    Self { tier_timeout_secs: 90, max_topup_rounds: 3 }
  }
}

impl GenerationCfg {
  pub fn tier_timeout(&self) -> Duration {
    Duration::from_secs(self.tier_timeout_secs.max(1))
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SandboxCfg {
  pub interpreter: String,
  pub interpreter_args: Vec<String>,
  pub source_file_name: String,
  /// Free-form "run this code" budget.
  pub run_timeout_secs: u64,
  /// Per-test-case budget used by the evaluator.
  pub test_timeout_secs: u64,
  pub max_output_bytes: usize,
  pub error_preview_chars: usize,
}

impl Default for SandboxCfg {
  fn default() -> Self {
    Self {
      interpreter: "python3".into(),
      interpreter_args: vec!["-B".into()],
      source_file_name: "solution.py".into(),
      run_timeout_secs: 5,
      test_timeout_secs: 3,
      max_output_bytes: 64 * 1024,
      error_preview_chars: 100,
    }
  }
}

/// Prompts used by the remote generator. Defaults ask for the exact JSON
/// shapes the template tiers produce.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub exam_system: String,
  pub exam_user_template: String,
  pub coding_system: String,
  pub coding_user_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      exam_system: "You write multiple-choice exam questions. Respond ONLY with a JSON array.".into(),
      exam_user_template: "Generate {count} multiple-choice questions about {topic} in {subject}.\n\
Difficulty level: {difficulty}\n\n\
For each question, provide the question text, four options, the correct answer (A, B, C, or D) and a brief explanation.\n\n\
Format your response as a JSON array with this structure:\n\
[\n  {\"question\": \"Question text here?\", \"options\": [\"Option A text\", \"Option B text\", \"Option C text\", \"Option D text\"], \"correct_answer\": \"A\", \"explanation\": \"Explanation here\"}\n]\n\n\
Make sure questions are diverse, accurate, and test understanding rather than just memorization.\n\
Ensure all {count} questions are unique and cover different aspects of {topic}.".into(),
      coding_system: "You write small, deterministic coding practice problems. Respond ONLY with one JSON object.".into(),
      coding_user_template: "Create a single coding practice problem about {topic} targeting {difficulty} difficulty for the {language} programming language.\n\n\
Return a JSON object with the following fields:\n\
- title: short title string\n\
- description: one-paragraph problem description\n\
- template: a runnable {language} program template that reads from stdin and prints the answer\n\
- test_cases: an array of objects with fields 'input' (string) and 'expected' (string)\n\n\
Make sure tests are deterministic and there are at least 3 tests. Output only the JSON object, without extra explanation.".into(),
    }
  }
}

/// Remote tier settings; present only when `REMOTE_BASE_URL` is set.
#[derive(Clone, Debug)]
pub struct RemoteCfg {
  pub base_url: String,
  pub api_key: Option<String>,
  pub model: String,
  pub timeout: Duration,
}

impl RemoteCfg {
  pub fn from_env() -> Option<Self> {
    let base_url = std::env::var("REMOTE_BASE_URL").ok().filter(|s| !s.trim().is_empty())?;
    let api_key = std::env::var("REMOTE_API_KEY").ok().filter(|s| !s.is_empty());
    let model = std::env::var("REMOTE_MODEL").unwrap_or_else(|_| "mistral".into());
    let timeout = std::env::var("REMOTE_TIMEOUT_SECS")
      .ok()
      .and_then(|s| s.parse::<u64>().ok())
      .unwrap_or(60);
    Some(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      api_key,
      model,
      timeout: Duration::from_secs(timeout),
    })
  }
}

/// Attempt to load `AppConfig` from QUIZFORGE_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("QUIZFORGE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quizforge", %path, extra_problems = cfg.problems.len(), "Loaded config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quizforge", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quizforge", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

/// File config (or defaults) with environment overrides applied.
pub fn resolve_app_config() -> AppConfig {
  let mut cfg = load_app_config_from_env().unwrap_or_default();
  if let Ok(interp) = std::env::var("SANDBOX_INTERPRETER") {
    if !interp.trim().is_empty() {
      cfg.sandbox.interpreter = interp;
    }
  }
  cfg
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_defaults() {
    let raw = r#"
      [sandbox]
      test_timeout_secs = 2

      [[problems]]
      verifier = "gcd"
      difficulty = "easy"
      title = "GCD again"
      description = "d"
      template = "t"
      test_cases = [{ input = "12 8", expected = "4" }]
    "#;
    let cfg: AppConfig = toml::from_str(raw).expect("toml");
    assert_eq!(cfg.sandbox.test_timeout_secs, 2);
    assert_eq!(cfg.sandbox.run_timeout_secs, 5);
    assert_eq!(cfg.sandbox.interpreter, "python3");
    assert_eq!(cfg.generation.max_topup_rounds, 3);
    assert_eq!(cfg.problems.len(), 1);
    assert_eq!(cfg.problems[0].test_cases[0].expected, "4");
    assert!(cfg.prompts.exam_user_template.contains("{count}"));
  }
}
