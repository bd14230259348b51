//! Multiple-choice grading: direct comparison against the stored answer key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{AnswerLetter, Question};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionResult {
  /// 1-based.
  pub question_num: usize,
  pub question: String,
  /// Submitted letter, or "Not answered".
  pub user_answer: String,
  pub correct_answer: AnswerLetter,
  pub is_correct: bool,
  pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExamReport {
  pub total: usize,
  pub correct: usize,
  pub incorrect: usize,
  pub score_percent: f64,
  pub details: Vec<QuestionResult>,
}

/// `answers` maps 0-based question index to the submitted letter.
/// Unknown letters count as wrong; missing entries as unanswered.
pub fn grade_exam(questions: &[Question], answers: &HashMap<usize, String>) -> ExamReport {
  let details: Vec<QuestionResult> = questions
    .iter()
    .enumerate()
    .map(|(idx, q)| {
      let submitted = answers.get(&idx).map(|s| s.trim()).filter(|s| !s.is_empty());
      let is_correct = submitted.and_then(AnswerLetter::parse) == Some(q.correct_answer);
      QuestionResult {
        question_num: idx + 1,
        question: q.text.clone(),
        user_answer: submitted.map(str::to_uppercase).unwrap_or_else(|| "Not answered".into()),
        correct_answer: q.correct_answer,
        is_correct,
        explanation: q.explanation.clone(),
      }
    })
    .collect();

  let total = details.len();
  let correct = details.iter().filter(|d| d.is_correct).count();
  let score_percent = if total == 0 { 0.0 } else { correct as f64 / total as f64 * 100.0 };
  ExamReport { total, correct, incorrect: total - correct, score_percent, details }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn q(answer: AnswerLetter) -> Question {
    Question {
      text: "q".into(),
      options: ["a".into(), "b".into(), "c".into(), "d".into()],
      correct_answer: answer,
      explanation: "e".into(),
    }
  }

  #[test]
  fn counts_correct_wrong_and_unanswered() {
    let qs = vec![q(AnswerLetter::A), q(AnswerLetter::C), q(AnswerLetter::D), q(AnswerLetter::B)];
    let answers = HashMap::from([(0, "A".to_string()), (1, "b".to_string()), (2, "d".to_string())]);
    let r = grade_exam(&qs, &answers);
    assert_eq!((r.total, r.correct, r.incorrect), (4, 2, 2));
    assert_eq!(r.score_percent, 50.0);
    assert_eq!(r.details[3].user_answer, "Not answered");
    assert_eq!(r.details[3].question_num, 4);
    assert_eq!(r.details[2].user_answer, "D");
  }

  #[test]
  fn empty_exam_scores_zero() {
    let r = grade_exam(&[], &HashMap::new());
    assert_eq!(r.score_percent, 0.0);
  }
}
