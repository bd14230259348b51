//! Multiple-choice question templates grouped by subject category.
//!
//! Templates use `{topic}` and `{subject}` placeholders in the stem, every
//! option, and the explanation. `correct_idx` is the designated true option.

use std::fmt;

use crate::domain::Difficulty;

#[derive(Debug)]
pub struct QuestionTemplate {
  pub stem: &'static str,
  pub options: [&'static str; 4],
  pub correct_idx: usize,
  pub explanation: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
  Programming,
  Mathematics,
  Science,
  General,
}

impl Category {
  /// First keyword match wins; `General` otherwise.
  pub fn for_subject(subject: &str) -> Self {
    const RULES: [(Category, &[&str]); 3] = [
      (Category::Programming, &["programming", "coding", "computer", "software", "python", "java"]),
      (Category::Mathematics, &["math", "algebra", "calculus", "statistics", "geometry"]),
      (Category::Science, &["science", "physics", "chemistry", "biology"]),
    ];
    let s = subject.to_lowercase();
    RULES
      .iter()
      .find(|(_, words)| words.iter().any(|w| s.contains(w)))
      .map(|(c, _)| *c)
      .unwrap_or(Category::General)
  }

  pub fn templates(self) -> &'static [QuestionTemplate] {
    match self {
      Category::Programming => PROGRAMMING,
      Category::Mathematics => MATHEMATICS,
      Category::Science => SCIENCE,
      Category::General => GENERAL,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Category::Programming => "programming",
      Category::Mathematics => "mathematics",
      Category::Science => "science",
      Category::General => "general",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

const PROGRAMMING: &[QuestionTemplate] = &[
  QuestionTemplate {
    stem: "What is the main purpose of {topic} in {subject}?",
    options: [
      "To handle {topic} operations",
      "To manage {topic} efficiently",
      "To optimize {topic} performance",
      "To implement {topic} functionality",
    ],
    correct_idx: 0,
    explanation: "{topic} is primarily used for handling specific operations in {subject}.",
  },
  QuestionTemplate {
    stem: "Which statement best describes {topic}?",
    options: ["A fundamental concept in {subject}", "An advanced technique", "A debugging tool", "A deprecated feature"],
    correct_idx: 0,
    explanation: "{topic} represents a core concept in {subject}.",
  },
  QuestionTemplate {
    stem: "What is the key advantage of using {topic}?",
    options: ["Improved code efficiency", "Better code organization", "Enhanced security", "All of the above"],
    correct_idx: 3,
    explanation: "{topic} provides multiple benefits including efficiency, organization, and security.",
  },
  QuestionTemplate {
    stem: "When should you use {topic}?",
    options: [
      "When working with {subject} applications",
      "Only in production environments",
      "Only for debugging",
      "Never recommended",
    ],
    correct_idx: 0,
    explanation: "{topic} is appropriate when working with {subject} applications.",
  },
];

const MATHEMATICS: &[QuestionTemplate] = &[
  QuestionTemplate {
    stem: "What is the formula for calculating {topic}?",
    options: [
      "Standard {topic} formula",
      "Alternative {topic} method",
      "Basic {topic} equation",
      "Advanced {topic} calculation",
    ],
    correct_idx: 0,
    explanation: "The standard formula is commonly used for {topic} calculations.",
  },
  QuestionTemplate {
    stem: "Which concept is most related to {topic}?",
    options: ["Core mathematical principle", "Statistical method", "Geometric theorem", "Algebraic equation"],
    correct_idx: 0,
    explanation: "{topic} is fundamentally based on core mathematical principles.",
  },
  QuestionTemplate {
    stem: "How is {topic} typically applied?",
    options: [
      "In solving {subject} problems",
      "Only in theoretical contexts",
      "Rarely used in practice",
      "Only for advanced students",
    ],
    correct_idx: 0,
    explanation: "{topic} is commonly applied in solving {subject} problems.",
  },
];

const SCIENCE: &[QuestionTemplate] = &[
  QuestionTemplate {
    stem: "What is the primary function of {topic} in {subject}?",
    options: ["Essential {subject} process", "Supporting mechanism", "Experimental technique", "Theoretical concept"],
    correct_idx: 0,
    explanation: "{topic} plays a crucial role in {subject} processes.",
  },
  QuestionTemplate {
    stem: "What role does {topic} play in {subject}?",
    options: [
      "Central to understanding {subject}",
      "Minor supporting role",
      "Outdated concept",
      "Only relevant in research",
    ],
    correct_idx: 0,
    explanation: "{topic} is central to understanding {subject}.",
  },
];

const GENERAL: &[QuestionTemplate] = &[
  QuestionTemplate {
    stem: "What is the most important aspect of {topic}?",
    options: ["Fundamental principles", "Practical applications", "Historical development", "Theoretical foundations"],
    correct_idx: 0,
    explanation: "Understanding the fundamental principles is key to mastering {topic}.",
  },
  QuestionTemplate {
    stem: "Which statement about {topic} is correct?",
    options: [
      "Essential for understanding {subject}",
      "Only used in advanced contexts",
      "Has limited applications",
      "Being replaced by newer methods",
    ],
    correct_idx: 0,
    explanation: "{topic} remains essential for comprehensive understanding of {subject}.",
  },
  QuestionTemplate {
    stem: "Why is {topic} important in {subject}?",
    options: [
      "Provides foundational knowledge",
      "Rarely needed in practice",
      "Only for academic purposes",
      "Decreasing in relevance",
    ],
    correct_idx: 0,
    explanation: "{topic} provides foundational knowledge in {subject}.",
  },
];

/// Stems cycled by the floor tier.
pub const BASIC_STEMS: [&str; 10] = [
  "What is the primary purpose of {topic} in {subject}?",
  "Which of the following best describes {topic}?",
  "What is the key advantage of using {topic}?",
  "When should you apply {topic} in {subject}?",
  "Which concept is most related to {topic}?",
  "How does {topic} benefit {subject} applications?",
  "What is the most important aspect of {topic}?",
  "Which statement about {topic} is correct?",
  "Why is {topic} important in {subject}?",
  "What role does {topic} play in {subject}?",
];

/// Floor-tier option set for a difficulty: options, correct index, explanation.
pub fn basic_options(difficulty: Difficulty) -> ([&'static str; 4], usize, &'static str) {
  match difficulty {
    Difficulty::Easy => (
      [
        "It is a fundamental concept in {subject}",
        "It is rarely used in practice",
        "It is only for advanced users",
        "It is being replaced by newer methods",
      ],
      0,
      "{topic} is a fundamental concept in {subject} that forms the basis for understanding.",
    ),
    Difficulty::Medium => (
      [
        "Essential for understanding {subject}",
        "Optional learning material",
        "Only needed in specific cases",
        "Deprecated in modern {subject}",
      ],
      0,
      "{topic} is essential for a comprehensive understanding of {subject}.",
    ),
    Difficulty::Hard => (
      [
        "Provides foundational understanding of {subject}",
        "Offers advanced optimization techniques",
        "Enables complex problem-solving approaches",
        "All of the above",
      ],
      3,
      "{topic} encompasses multiple aspects including foundations, optimization, and problem-solving in {subject}.",
    ),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn category_keywords_first_match_wins() {
    assert_eq!(Category::for_subject("Python Programming"), Category::Programming);
    assert_eq!(Category::for_subject("Linear Algebra"), Category::Mathematics);
    assert_eq!(Category::for_subject("Biology"), Category::Science);
    assert_eq!(Category::for_subject("History"), Category::General);
    // "computer science" hits the programming rule before science
    assert_eq!(Category::for_subject("Computer Science"), Category::Programming);
  }

  #[test]
  fn designated_indices_are_in_range() {
    for c in [Category::Programming, Category::Mathematics, Category::Science, Category::General] {
      for t in c.templates() {
        assert!(t.correct_idx < 4, "{}", t.stem);
      }
    }
    for d in Difficulty::ALL {
      assert!(basic_options(d).1 < 4);
    }
  }
}
