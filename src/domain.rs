//! Domain models: questions, coding problems, execution results and score reports.
//!
//! Field names on the wire (`question`, `template`, `test_cases`, ...) are shared
//! with the persistence collaborator and the grading endpoints, so keep them stable.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Letter of a multiple-choice option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerLetter {
  A,
  B,
  C,
  D,
}

impl AnswerLetter {
  pub const ALL: [AnswerLetter; 4] = [AnswerLetter::A, AnswerLetter::B, AnswerLetter::C, AnswerLetter::D];

  pub fn index(self) -> usize {
    match self {
      AnswerLetter::A => 0,
      AnswerLetter::B => 1,
      AnswerLetter::C => 2,
      AnswerLetter::D => 3,
    }
  }

  pub fn from_index(idx: usize) -> Option<Self> {
    Self::ALL.get(idx).copied()
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s.trim() {
      "A" | "a" => Some(AnswerLetter::A),
      "B" | "b" => Some(AnswerLetter::B),
      "C" | "c" => Some(AnswerLetter::C),
      "D" | "d" => Some(AnswerLetter::D),
      _ => None,
    }
  }
}

impl fmt::Display for AnswerLetter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let c = (b'A' + self.index() as u8) as char;
    write!(f, "{c}")
  }
}

/// Multiple-choice question. `options` is a fixed-size array, so the
/// "exactly four options" invariant is carried by the type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
  #[serde(rename = "question")]
  pub text: String,
  pub options: [String; 4],
  pub correct_answer: AnswerLetter,
  pub explanation: String,
}

impl Question {
  pub fn correct_text(&self) -> &str {
    &self.options[self.correct_answer.index()]
  }

  /// Permute the options uniformly and re-point `correct_answer` at the
  /// first option whose text equals the previously correct text.
  ///
  /// Duplicate option texts resolve to the first match.
  pub fn shuffle_options<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    let correct_text = self.correct_text().to_string();
    self.options.shuffle(rng);
    let new_idx = self
      .options
      .iter()
      .position(|o| *o == correct_text)
      .unwrap_or(0);
    if let Some(letter) = AnswerLetter::from_index(new_idx) {
      self.correct_answer = letter;
    }
  }
}

/// Difficulty tier shared by exams and coding problems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_lowercase().as_str() {
      "easy" => Some(Difficulty::Easy),
      "medium" => Some(Difficulty::Medium),
      "hard" => Some(Difficulty::Hard),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "easy",
      Difficulty::Medium => "medium",
      Difficulty::Hard => "hard",
    }
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One fixed input/expected-output pair. Both sides are pre-serialized text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
  pub input: String,
  pub expected: String,
}

impl TestCase {
  pub fn new(input: impl Into<String>, expected: impl Into<String>) -> Self {
    Self { input: input.into(), expected: expected.into() }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CodingProblem {
  pub title: String,
  pub description: String,
  #[serde(rename = "template")]
  pub template_code: String,
  pub test_cases: Vec<TestCase>,
}

/// Which generator tier produced a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
  Remote,
  Template,
  Basic,
}

impl Tier {
  pub fn as_str(self) -> &'static str {
    match self {
      Tier::Remote => "remote",
      Tier::Template => "template",
      Tier::Basic => "basic",
    }
  }
}

impl fmt::Display for Tier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
  Exam,
  Coding,
}

/// Ephemeral request handed to every tier during one orchestrator call.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
  pub kind: GenerationKind,
  pub topic: String,
  /// Subject category for exams; unused for coding problems.
  pub subject: String,
  pub difficulty: Difficulty,
  pub count: usize,
}

impl GenerationRequest {
  pub fn exam(topic: &str, subject: &str, count: usize, difficulty: Difficulty) -> Self {
    Self {
      kind: GenerationKind::Exam,
      topic: topic.to_string(),
      subject: subject.to_string(),
      difficulty,
      count,
    }
  }

  pub fn coding(topic: &str, difficulty: Difficulty) -> Self {
    Self {
      kind: GenerationKind::Coding,
      topic: topic.to_string(),
      subject: String::new(),
      difficulty,
      count: 1,
    }
  }
}

/// Captured outcome of one sandboxed run.
/// `exit_code` is `-1` when the process timed out or was killed by a signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
  pub stdout: String,
  pub stderr: String,
  pub exit_code: i32,
  pub timed_out: bool,
  pub duration_ms: u64,
}

impl ExecutionResult {
  pub fn succeeded(&self) -> bool {
    !self.timed_out && self.exit_code == 0
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestVerdict {
  Passed,
  WrongAnswer,
  RuntimeError,
  Timeout,
  /// The sandbox itself failed (could not stage or spawn).
  InternalError,
}

/// Per-test entry in a score report; `index` is 1-based.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
  pub index: usize,
  pub passed: bool,
  pub verdict: TestVerdict,
  pub expected: String,
  pub actual: String,
  pub input_preview: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
  pub passed: usize,
  pub total: usize,
  pub score_percent: f64,
  pub per_test: Vec<TestOutcome>,
}

impl ScoreReport {
  /// Fold ordered outcomes into a report. `total == 0` scores 0.
  pub fn from_outcomes(per_test: Vec<TestOutcome>) -> Self {
    let total = per_test.len();
    let passed = per_test.iter().filter(|t| t.passed).count();
    let score_percent = if total == 0 { 0.0 } else { passed as f64 / total as f64 * 100.0 };
    Self { passed, total, score_percent, per_test }
  }

  pub fn all_passed(&self) -> bool {
    self.total > 0 && self.passed == self.total
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn sample() -> Question {
    Question {
      text: "Which?".into(),
      options: ["right".into(), "w1".into(), "w2".into(), "w3".into()],
      correct_answer: AnswerLetter::A,
      explanation: String::new(),
    }
  }

  #[test]
  fn shuffle_keeps_correct_text() {
    for seed in 0..50 {
      let mut rng = StdRng::seed_from_u64(seed);
      let mut q = sample();
      q.shuffle_options(&mut rng);
      assert_eq!(q.correct_text(), "right");
      let mut sorted = q.options.to_vec();
      sorted.sort();
      assert_eq!(sorted, vec!["right", "w1", "w2", "w3"]);
    }
  }

  #[test]
  fn shuffle_with_duplicates_points_at_first_match() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut q = Question {
      text: "dup".into(),
      options: ["same".into(), "same".into(), "x".into(), "y".into()],
      correct_answer: AnswerLetter::B,
      explanation: String::new(),
    };
    q.shuffle_options(&mut rng);
    let first = q.options.iter().position(|o| o == "same").unwrap();
    assert_eq!(q.correct_answer.index(), first);
  }

  #[test]
  fn question_uses_wire_field_names() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["question"], "Which?");
    assert_eq!(json["correct_answer"], "A");
    assert_eq!(json["options"].as_array().unwrap().len(), 4);
  }

  #[test]
  fn wrong_option_count_is_rejected_by_serde() {
    let raw = r#"{"question":"q","options":["a","b","c"],"correct_answer":"A","explanation":"e"}"#;
    assert!(serde_json::from_str::<Question>(raw).is_err());
  }

  #[test]
  fn empty_report_scores_zero() {
    let r = ScoreReport::from_outcomes(vec![]);
    assert_eq!(r.total, 0);
    assert_eq!(r.score_percent, 0.0);
    assert!(!r.all_passed());
  }

  #[test]
  fn letters_round_trip_through_index() {
    for (i, l) in AnswerLetter::ALL.iter().enumerate() {
      assert_eq!(l.index(), i);
      assert_eq!(AnswerLetter::from_index(i), Some(*l));
    }
    assert_eq!(AnswerLetter::from_index(4), None);
    assert_eq!(AnswerLetter::parse(" c "), Some(AnswerLetter::C));
    assert_eq!(AnswerLetter::D.to_string(), "D");
  }
}
