//! Catalog-backed tier: template questions and verified catalog problems.
//! Always available offline; randomness only affects template choice and option order.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, instrument};

use super::Generator;
use crate::catalog::questions::{Category, QuestionTemplate};
use crate::catalog::ProblemCatalog;
use crate::domain::{AnswerLetter, CodingProblem, Difficulty, GenerationRequest, Question, Tier};
use crate::error::GenerationError;
use crate::util::fill_template;

/// Surface-wording adjustment only; question meaning does not change.
pub fn adjust_wording(option: &str, difficulty: Difficulty) -> String {
  match difficulty {
    Difficulty::Easy => option.replace("advanced", "basic").replace("complex", "simple"),
    Difficulty::Hard => option.replace("basic", "advanced").replace("simple", "complex"),
    Difficulty::Medium => option.to_string(),
  }
}

pub struct TemplateQuestionGenerator;

impl TemplateQuestionGenerator {
  /// One unshuffled question; `correct_answer` is the template's designated index.
  pub fn generate(topic: &str, subject: &str, difficulty: Difficulty, template: &QuestionTemplate) -> Question {
    let vars = [("topic", topic), ("subject", subject)];
    let options = template.options.map(|o| adjust_wording(&fill_template(o, &vars), difficulty));
    Question {
      text: fill_template(template.stem, &vars),
      options,
      correct_answer: AnswerLetter::from_index(template.correct_idx).unwrap_or(AnswerLetter::A),
      explanation: fill_template(template.explanation, &vars),
    }
  }

  /// `count` questions cycling through the subject's category templates, each shuffled.
  pub fn generate_exam<R: Rng + ?Sized>(
    topic: &str,
    subject: &str,
    count: usize,
    difficulty: Difficulty,
    rng: &mut R,
  ) -> Vec<Question> {
    let category = Category::for_subject(subject);
    let templates = category.templates();
    debug!(target: "generation", %category, count, "Template questions");
    (0..count)
      .map(|i| {
        let mut q = Self::generate(topic, subject, difficulty, &templates[i % templates.len()]);
        q.shuffle_options(rng);
        q
      })
      .collect()
  }
}

pub struct TemplateCodingGenerator;

impl TemplateCodingGenerator {
  pub fn generate<R: Rng + ?Sized>(
    catalog: &ProblemCatalog,
    topic: &str,
    difficulty: Difficulty,
    rng: &mut R,
  ) -> Option<CodingProblem> {
    catalog.pick(topic, difficulty, rng).map(|e| e.problem.clone())
  }
}

pub struct TemplateGenerator {
  catalog: Arc<ProblemCatalog>,
}

impl TemplateGenerator {
  pub fn new(catalog: Arc<ProblemCatalog>) -> Self {
    Self { catalog }
  }
}

#[async_trait]
impl Generator for TemplateGenerator {
  fn tier(&self) -> Tier {
    Tier::Template
  }

  #[instrument(level = "debug", target = "generation", skip_all, fields(topic = %req.topic, count = req.count))]
  async fn generate_questions(&self, req: &GenerationRequest) -> Result<Vec<Question>, GenerationError> {
    let mut rng = rand::thread_rng();
    Ok(TemplateQuestionGenerator::generate_exam(&req.topic, &req.subject, req.count, req.difficulty, &mut rng))
  }

  #[instrument(level = "debug", target = "generation", skip_all, fields(topic = %req.topic, difficulty = %req.difficulty))]
  async fn generate_coding_problem(&self, req: &GenerationRequest) -> Result<CodingProblem, GenerationError> {
    let mut rng = rand::thread_rng();
    TemplateCodingGenerator::generate(&self.catalog, &req.topic, req.difficulty, &mut rng)
      .ok_or_else(|| GenerationError::tier(Tier::Template, format!("no catalog problems for {}", req.difficulty)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn substitution_fills_every_option() {
    let t = &Category::Programming.templates()[0];
    let q = TemplateQuestionGenerator::generate("Loops", "Programming", Difficulty::Medium, t);
    assert_eq!(q.text, "What is the main purpose of Loops in Programming?");
    assert_eq!(q.correct_text(), "To handle Loops operations");
    assert!(q.options.iter().all(|o| !o.contains('{')));
  }

  #[test]
  fn difficulty_changes_wording_only() {
    let t = &Category::Programming.templates()[1];
    let easy = TemplateQuestionGenerator::generate("Loops", "Programming", Difficulty::Easy, t);
    let hard = TemplateQuestionGenerator::generate("Loops", "Programming", Difficulty::Hard, t);
    assert_eq!(easy.options[1], "An basic technique");
    assert_eq!(hard.options[1], "An advanced technique");
    assert_eq!(easy.text, hard.text);
    assert_eq!(adjust_wording("a simple basic step", Difficulty::Hard), "a complex advanced step");
  }

  #[test]
  fn exam_has_requested_count_and_valid_answers() {
    let mut rng = StdRng::seed_from_u64(42);
    let qs = TemplateQuestionGenerator::generate_exam("Loops", "Programming", 5, Difficulty::Medium, &mut rng);
    assert_eq!(qs.len(), 5);
    // the fifth question reuses the first template
    assert_eq!(qs[4].text, qs[0].text);
    assert_eq!(qs[2].correct_text(), "All of the above");
  }

  #[tokio::test]
  async fn coding_problems_come_from_the_catalog() {
    let generator = TemplateGenerator::new(Arc::new(ProblemCatalog::builtin()));
    let p = generator
      .generate_coding_problem(&GenerationRequest::coding("sort", Difficulty::Medium))
      .await
      .unwrap();
    assert!(p.title.to_lowercase().contains("sort"));
    assert!(!p.test_cases.is_empty());
  }
}
