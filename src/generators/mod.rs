//! Generator tiers behind one interface. The orchestrator consults them in a
//! fixed priority order: remote model, catalog templates, then the basic floor.

use async_trait::async_trait;

use crate::domain::{CodingProblem, GenerationRequest, Question, Tier};
use crate::error::GenerationError;

pub mod basic;
pub mod remote;
pub mod template;

pub use basic::BasicFallbackGenerator;
pub use remote::RemoteGenerator;
pub use template::TemplateGenerator;

#[async_trait]
pub trait Generator: Send + Sync {
  fn tier(&self) -> Tier;

  /// At least `req.count` questions on success; the orchestrator truncates.
  async fn generate_questions(&self, req: &GenerationRequest) -> Result<Vec<Question>, GenerationError>;

  async fn generate_coding_problem(&self, req: &GenerationRequest) -> Result<CodingProblem, GenerationError>;
}
