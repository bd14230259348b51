//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::SelfTestReport;
use crate::domain::{CodingProblem, Difficulty, Question, Tier};
use crate::store::Attempt;

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct SelfTestSummary {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl From<&SelfTestReport> for SelfTestSummary {
    fn from(r: &SelfTestReport) -> Self {
        Self { passed: r.passed, failed: r.failed, errored: r.errored }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogTierOut {
    pub difficulty: Difficulty,
    pub titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogOut {
    pub version: &'static str,
    pub problems: Vec<CatalogTierOut>,
    pub self_test: SelfTestSummary,
}

#[derive(Debug, Deserialize)]
pub struct ExamIn {
    pub topic: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// A question as shown to the taker: no answer key, no explanation.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub number: usize,
    pub question: String,
    pub options: [String; 4],
}

pub fn to_out(idx: usize, q: &Question) -> QuestionOut {
    QuestionOut { number: idx + 1, question: q.text.clone(), options: q.options.clone() }
}

#[derive(Debug, Serialize)]
pub struct ExamOut {
    pub id: String,
    pub source: Tier,
    pub questions: Vec<QuestionOut>,
}

/// Answers keyed by 0-based question index ("0", "1", ...), values "A".."D".
#[derive(Debug, Deserialize)]
pub struct ExamSubmitIn {
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct CodingProblemIn {
    pub topic: String,
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CodingProblemOut {
    pub id: String,
    pub source: Tier,
    pub problem: CodingProblem,
}

#[derive(Debug, Deserialize)]
pub struct CodingSubmitIn {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct RunIn {
    pub code: String,
    #[serde(default)]
    pub stdin: String,
}

#[derive(Debug, Serialize)]
pub struct AttemptsOut {
    pub owner: String,
    pub attempts: Vec<Attempt>,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}
