//! Error types shared across generation, the catalog and the sandbox.

use crate::domain::Tier;

/// Failures on the generation side. Only `Exhausted` ever leaves the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
  #[error("{tier} tier failed: {reason}")]
  TierFailed { tier: Tier, reason: String },

  #[error("all generation tiers failed; last error: {0}")]
  Exhausted(String),

  #[error("could not parse model output: {0}")]
  Parse(String),

  #[error("remote model call failed: {0}")]
  Remote(String),
}

impl GenerationError {
  pub fn tier(tier: Tier, reason: impl Into<String>) -> Self {
    GenerationError::TierFailed { tier, reason: reason.into() }
  }
}

/// A canonical verifier could not evaluate an input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
  #[error("malformed input: {0}")]
  Malformed(String),

  #[error("input exceeds verifier bound: {0}")]
  TooLarge(String),
}

/// Startup-time catalog validation failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("problem '{title}' references unknown verifier '{verifier}'")]
  UnknownVerifier { title: String, verifier: String },

  #[error("problem '{0}' declares no test cases")]
  EmptyTestCases(String),

  #[error("problem '{title}' has unknown difficulty '{difficulty}'")]
  InvalidDifficulty { title: String, difficulty: String },
}

/// Internal sandbox failures. Timeouts and non-zero exits are outcomes, not errors.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
  #[error("failed to stage program files: {0}")]
  Stage(#[source] std::io::Error),

  #[error("failed to spawn interpreter '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed while waiting for child process: {0}")]
  Wait(#[source] std::io::Error),
}

/// Failures surfaced by the HTTP surface.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error(transparent)]
  Generation(#[from] GenerationError),

  #[error(transparent)]
  Sandbox(#[from] SandboxError),
}
