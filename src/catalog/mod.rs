//! Versioned catalog of coding problems and question templates.
//!
//! Built-in problems are merged with any `[[problems]]` from configuration.
//! Construction resolves every verifier name up front (unknown names abort
//! startup) and then runs a self-test of every fixture against its verifier.
//! Self-test failures are logged and recorded, never fatal.

pub mod parse;
pub mod problems;
pub mod questions;
pub mod verifiers;

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::ProblemCfg;
use crate::domain::{CodingProblem, Difficulty, TestCase};
use crate::error::{CatalogError, VerifyError};
use problems::Fixture;
use verifiers::ProblemId;

pub const CATALOG_VERSION: &str = "2.1.0";

#[derive(Clone, Debug)]
pub struct CatalogEntry {
  pub id: ProblemId,
  pub difficulty: Difficulty,
  pub problem: CodingProblem,
}

impl CatalogEntry {
  fn from_fixture(difficulty: Difficulty, f: &Fixture) -> Self {
    Self { id: f.id, difficulty, problem: f.to_problem() }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SelfTestStatus {
  Pass,
  Fail { expected: String, got: String },
  Error { message: String },
}

#[derive(Clone, Debug, Serialize)]
pub struct SelfTestLine {
  pub difficulty: Difficulty,
  pub title: String,
  /// 1-based test case number within the problem.
  pub case: usize,
  #[serde(flatten)]
  pub status: SelfTestStatus,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SelfTestReport {
  pub passed: usize,
  pub failed: usize,
  pub errored: usize,
  pub lines: Vec<SelfTestLine>,
}

impl SelfTestReport {
  pub fn is_clean(&self) -> bool {
    self.failed == 0 && self.errored == 0
  }

  fn record(&mut self, line: SelfTestLine) {
    match line.status {
      SelfTestStatus::Pass => self.passed += 1,
      SelfTestStatus::Fail { .. } => self.failed += 1,
      SelfTestStatus::Error { .. } => self.errored += 1,
    }
    self.lines.push(line);
  }
}

#[derive(Debug)]
pub struct ProblemCatalog {
  problems: HashMap<Difficulty, Vec<CatalogEntry>>,
  basic: HashMap<Difficulty, Vec<CatalogEntry>>,
  self_test: SelfTestReport,
}

impl ProblemCatalog {
  /// Build the catalog from built-in fixtures plus configured extras.
  #[instrument(level = "info", target = "catalog", skip_all, fields(extra = extra.len()))]
  pub fn new(extra: &[ProblemCfg]) -> Result<Self, CatalogError> {
    let configured = extra.iter().map(entry_from_cfg).collect::<Result<Vec<_>, _>>()?;
    Ok(Self::assemble(configured))
  }

  /// Built-in problems only.
  pub fn builtin() -> Self {
    Self::assemble(Vec::new())
  }

  fn assemble(configured: Vec<CatalogEntry>) -> Self {
    let mut by_difficulty: HashMap<Difficulty, Vec<CatalogEntry>> = HashMap::new();
    let mut basic: HashMap<Difficulty, Vec<CatalogEntry>> = HashMap::new();

    for d in Difficulty::ALL {
      by_difficulty.insert(d, problems::fixtures(d).iter().map(|f| CatalogEntry::from_fixture(d, f)).collect());
      basic.insert(d, problems::basic_fixtures(d).iter().map(|f| CatalogEntry::from_fixture(d, f)).collect());
    }
    for entry in configured {
      debug!(target: "catalog", title = %entry.problem.title, id = %entry.id, difficulty = %entry.difficulty, "Added configured problem");
      by_difficulty.entry(entry.difficulty).or_default().push(entry);
    }

    let mut catalog = Self { problems: by_difficulty, basic, self_test: SelfTestReport::default() };
    catalog.self_test = catalog.run_self_test();
    catalog
  }

  pub fn version(&self) -> &'static str {
    CATALOG_VERSION
  }

  pub fn verify(&self, problem_id: ProblemId, input: &str) -> Result<String, VerifyError> {
    problem_id.verify(input)
  }

  pub fn problems(&self, difficulty: Difficulty) -> &[CatalogEntry] {
    self.problems.get(&difficulty).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn basic_problems(&self, difficulty: Difficulty) -> &[CatalogEntry] {
    self.basic.get(&difficulty).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn self_test(&self) -> &SelfTestReport {
    &self.self_test
  }

  /// Random problem of `difficulty` whose title or description mentions
  /// `topic` (case-insensitive); any problem of that difficulty when none match.
  pub fn pick<R: Rng + ?Sized>(&self, topic: &str, difficulty: Difficulty, rng: &mut R) -> Option<&CatalogEntry> {
    let pool = self.problems(difficulty);
    let needle = topic.trim().to_lowercase();
    let matching: Vec<&CatalogEntry> = pool
      .iter()
      .filter(|e| {
        !needle.is_empty()
          && (e.problem.title.to_lowercase().contains(&needle) || e.problem.description.to_lowercase().contains(&needle))
      })
      .collect();

    if matching.is_empty() {
      pool.choose(rng)
    } else {
      matching.choose(rng).copied()
    }
  }

  fn run_self_test(&self) -> SelfTestReport {
    let mut report = SelfTestReport::default();
    let tiers = [&self.problems, &self.basic];

    for d in Difficulty::ALL {
      for entries in tiers {
        for entry in entries.get(&d).map(Vec::as_slice).unwrap_or(&[]) {
          for (i, tc) in entry.problem.test_cases.iter().enumerate() {
            let status = check_case(entry.id, tc);
            match &status {
              SelfTestStatus::Pass => {
                debug!(target: "catalog", difficulty = %d, title = %entry.problem.title, case = i + 1, "PASS")
              }
              SelfTestStatus::Fail { expected, got } => {
                warn!(target: "catalog", difficulty = %d, title = %entry.problem.title, case = i + 1, %expected, %got, "FAIL")
              }
              SelfTestStatus::Error { message } => {
                warn!(target: "catalog", difficulty = %d, title = %entry.problem.title, case = i + 1, error = %message, "ERROR")
              }
            }
            report.record(SelfTestLine { difficulty: d, title: entry.problem.title.clone(), case: i + 1, status });
          }
        }
      }
    }

    info!(
      target: "catalog",
      version = CATALOG_VERSION,
      passed = report.passed,
      failed = report.failed,
      errored = report.errored,
      clean = report.is_clean(),
      "Catalog self-test complete"
    );
    report
  }
}

fn check_case(id: ProblemId, tc: &TestCase) -> SelfTestStatus {
  match id.verify(&tc.input) {
    Ok(got) if got == tc.expected.trim() => SelfTestStatus::Pass,
    Ok(got) => SelfTestStatus::Fail { expected: tc.expected.clone(), got },
    Err(e) => SelfTestStatus::Error { message: e.to_string() },
  }
}

fn entry_from_cfg(cfg: &ProblemCfg) -> Result<CatalogEntry, CatalogError> {
  let id: ProblemId = cfg.verifier.parse().map_err(|verifier| CatalogError::UnknownVerifier {
    title: cfg.title.clone(),
    verifier,
  })?;
  let difficulty = Difficulty::parse(&cfg.difficulty).ok_or_else(|| CatalogError::InvalidDifficulty {
    title: cfg.title.clone(),
    difficulty: cfg.difficulty.clone(),
  })?;
  if cfg.test_cases.is_empty() {
    return Err(CatalogError::EmptyTestCases(cfg.title.clone()));
  }
  Ok(CatalogEntry {
    id,
    difficulty,
    problem: CodingProblem {
      title: cfg.title.clone(),
      description: cfg.description.clone(),
      template_code: cfg.template.clone(),
      test_cases: cfg.test_cases.clone(),
    },
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn cfg(verifier: &str, difficulty: &str, tests: Vec<TestCase>) -> ProblemCfg {
    ProblemCfg {
      verifier: verifier.into(),
      difficulty: difficulty.into(),
      title: "Configured".into(),
      description: "from toml".into(),
      template: "print()".into(),
      test_cases: tests,
    }
  }

  #[test]
  fn builtin_fixtures_are_self_consistent() {
    let catalog = ProblemCatalog::builtin();
    let report = catalog.self_test();
    assert!(report.is_clean(), "{:?}", report.lines.iter().filter(|l| l.status != SelfTestStatus::Pass).collect::<Vec<_>>());
    assert!(report.passed > 50);
  }

  #[test]
  fn gcd_example() {
    let catalog = ProblemCatalog::builtin();
    assert_eq!(catalog.verify(ProblemId::Gcd, "48 18").unwrap(), "6");
  }

  #[test]
  fn unknown_verifier_fails_fast() {
    let err = ProblemCatalog::new(&[cfg("does_not_exist", "easy", vec![TestCase::new("1", "1")])]).unwrap_err();
    assert!(matches!(err, CatalogError::UnknownVerifier { .. }));
  }

  #[test]
  fn configured_problem_needs_tests_and_difficulty() {
    assert!(matches!(
      ProblemCatalog::new(&[cfg("gcd", "easy", vec![])]).unwrap_err(),
      CatalogError::EmptyTestCases(_)
    ));
    assert!(matches!(
      ProblemCatalog::new(&[cfg("gcd", "extreme", vec![TestCase::new("4 2", "2")])]).unwrap_err(),
      CatalogError::InvalidDifficulty { .. }
    ));
  }

  #[test]
  fn bad_configured_fixture_is_reported_not_fatal() {
    let catalog = ProblemCatalog::new(&[cfg("gcd", "hard", vec![TestCase::new("12 8", "3")])]).unwrap();
    assert_eq!(catalog.self_test().failed, 1);
    assert!(catalog.problems(Difficulty::Hard).iter().any(|e| e.problem.title == "Configured"));
  }

  #[test]
  fn overflowing_configured_fixture_is_an_error_line() {
    let tests = vec![TestCase::new(format!("[{},1]", i64::MAX), "0")];
    let catalog = ProblemCatalog::new(&[cfg("_verify_array_sum", "easy", tests)]).unwrap();
    assert_eq!(catalog.self_test().errored, 1);
    let line = catalog.self_test().lines.iter().find(|l| l.title == "Configured").unwrap();
    assert!(matches!(line.status, SelfTestStatus::Error { .. }));
  }

  #[test]
  fn legacy_verifier_names_are_accepted() {
    let configured = [
      cfg("_verify_fibonacci_nth", "easy", vec![TestCase::new("10", "55")]),
      cfg("_verify_lis", "medium", vec![TestCase::new("[0,1,0,3,2,3]", "4")]),
      cfg("_verify_length_of_longest_substring", "medium", vec![TestCase::new("abcabcbb", "3")]),
      cfg("_verify_find_median_sorted_arrays", "hard", vec![TestCase::new("[1,3]\\n[2]", "2.0")]),
    ];
    let catalog = ProblemCatalog::new(&configured).unwrap();
    assert!(catalog.self_test().is_clean());
  }

  #[test]
  fn pick_prefers_topic_matches() {
    let catalog = ProblemCatalog::builtin();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..10 {
      let e = catalog.pick("palindrome", Difficulty::Easy, &mut rng).unwrap();
      assert_eq!(e.id, ProblemId::Palindrome);
    }
    let any = catalog.pick("quantum chromodynamics", Difficulty::Hard, &mut rng).unwrap();
    assert_eq!(any.difficulty, Difficulty::Hard);
  }
}
