//! Grades submitted code against fixed test cases.
//!
//! Each case runs in its own sandboxed process, in declaration order, with no
//! early exit: the report always has one entry per test case, numbered from 1.
//! Outputs are compared after trimming surrounding whitespace; comparison is
//! otherwise exact.

use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::catalog::parse::to_stdin;
use crate::domain::{ExecutionResult, ScoreReport, TestCase, TestOutcome, TestVerdict};
use crate::error::SandboxError;
use crate::sandbox::SandboxExecutor;
use crate::util::{preview, truncate_chars};

const INPUT_PREVIEW_CHARS: usize = 50;

pub struct ResultEvaluator {
  sandbox: SandboxExecutor,
}

impl ResultEvaluator {
  pub fn new(sandbox: SandboxExecutor) -> Self {
    Self { sandbox }
  }

  #[instrument(level = "info", target = "sandbox", skip_all, fields(code_len = code.len(), tests = test_cases.len()))]
  pub async fn evaluate(&self, code: &str, test_cases: &[TestCase]) -> ScoreReport {
    let timeout = self.sandbox.test_timeout();
    let mut per_test = Vec::with_capacity(test_cases.len());

    for (i, tc) in test_cases.iter().enumerate() {
      let run = self.sandbox.run(code, &to_stdin(&tc.input), timeout).await;
      per_test.push(classify(i + 1, tc, run, timeout, self.sandbox.error_preview_chars()));
    }

    let report = ScoreReport::from_outcomes(per_test);
    info!(target: "sandbox", passed = report.passed, total = report.total, score = report.score_percent, "Evaluation complete");
    report
  }
}

/// Timeout first, then non-zero exit, then output comparison.
pub fn classify(
  index: usize,
  tc: &TestCase,
  run: Result<ExecutionResult, SandboxError>,
  timeout: Duration,
  error_preview_chars: usize,
) -> TestOutcome {
  let (verdict, actual) = match run {
    Err(e) => {
      warn!(target: "sandbox", test = index, error = %e, "Sandbox failure");
      (TestVerdict::InternalError, format!("Error: {}", truncate_chars(&e.to_string(), INPUT_PREVIEW_CHARS)))
    }
    Ok(r) if r.timed_out => (TestVerdict::Timeout, timeout_marker(timeout)),
    Ok(r) if r.exit_code != 0 => (TestVerdict::RuntimeError, format!("Error: {}", truncate_chars(&r.stderr, error_preview_chars))),
    Ok(r) => {
      let actual = r.stdout.trim().to_string();
      if actual == tc.expected.trim() {
        (TestVerdict::Passed, actual)
      } else {
        (TestVerdict::WrongAnswer, actual)
      }
    }
  };

  TestOutcome {
    index,
    passed: verdict == TestVerdict::Passed,
    verdict,
    expected: tc.expected.clone(),
    actual,
    input_preview: preview(&tc.input, INPUT_PREVIEW_CHARS),
  }
}

fn timeout_marker(timeout: Duration) -> String {
  let ms = timeout.as_millis();
  if ms % 1000 == 0 {
    format!("Timeout (>{}s)", ms / 1000)
  } else {
    format!("Timeout (>{ms}ms)")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::SandboxCfg;

  fn ok(stdout: &str) -> Result<ExecutionResult, SandboxError> {
    Ok(ExecutionResult { stdout: stdout.into(), stderr: String::new(), exit_code: 0, timed_out: false, duration_ms: 1 })
  }

  fn gcd_case() -> TestCase {
    TestCase::new("48 18", "6")
  }

  #[test]
  fn trailing_whitespace_is_ignored() {
    let t = Duration::from_secs(3);
    assert!(classify(1, &gcd_case(), ok("6\n"), t, 100).passed);
    assert!(classify(1, &gcd_case(), ok("6 "), t, 100).passed);
    let wrong = classify(1, &gcd_case(), ok("six\n"), t, 100);
    assert_eq!(wrong.verdict, TestVerdict::WrongAnswer);
    assert_eq!(wrong.actual, "six");
  }

  #[test]
  fn runtime_error_reports_truncated_stderr() {
    let run = Ok(ExecutionResult {
      stdout: "6".into(),
      stderr: "x".repeat(300),
      exit_code: 1,
      timed_out: false,
      duration_ms: 5,
    });
    let o = classify(2, &gcd_case(), run, Duration::from_secs(3), 100);
    assert_eq!(o.verdict, TestVerdict::RuntimeError);
    assert_eq!(o.actual.len(), "Error: ".len() + 100);
    assert_eq!(o.index, 2);
  }

  #[test]
  fn timeout_takes_priority() {
    let run = Ok(ExecutionResult { stdout: "6".into(), stderr: String::new(), exit_code: -1, timed_out: true, duration_ms: 3000 });
    let o = classify(1, &gcd_case(), run, Duration::from_secs(3), 100);
    assert_eq!(o.verdict, TestVerdict::Timeout);
    assert_eq!(o.actual, "Timeout (>3s)");
  }

  #[test]
  fn long_inputs_are_previewed() {
    let tc = TestCase::new("1".repeat(80), "1");
    let o = classify(1, &tc, ok("1"), Duration::from_secs(3), 100);
    assert_eq!(o.input_preview, format!("{}...", "1".repeat(50)));
  }

  fn sh_evaluator() -> ResultEvaluator {
    ResultEvaluator::new(SandboxExecutor::new(SandboxCfg {
      interpreter: "sh".into(),
      interpreter_args: vec![],
      source_file_name: "main.sh".into(),
      test_timeout_secs: 1,
      ..SandboxCfg::default()
    }))
  }

  #[tokio::test]
  async fn every_case_runs_in_order_and_is_idempotent() {
    // sums the two numbers on stdin
    let code = "read a b; echo $((a + b))";
    let tests = vec![TestCase::new("1 2", "3"), TestCase::new("2 2", "5"), TestCase::new("10 5", "15")];
    let ev = sh_evaluator();
    let first = ev.evaluate(code, &tests).await;
    assert_eq!(first.total, 3);
    assert_eq!(first.passed, 2);
    assert_eq!(first.per_test.iter().map(|t| t.index).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(!first.per_test[1].passed);

    let second = ev.evaluate(code, &tests).await;
    assert_eq!(second.passed, first.passed);
    assert_eq!(
      second.per_test.iter().map(|t| (&t.actual, t.verdict)).collect::<Vec<_>>(),
      first.per_test.iter().map(|t| (&t.actual, t.verdict)).collect::<Vec<_>>()
    );
  }

  #[tokio::test]
  async fn crashing_code_scores_zero_with_error_markers() {
    let tests = vec![TestCase::new("1", "1"), TestCase::new("2", "2")];
    let report = sh_evaluator().evaluate("echo boom >&2; exit 1", &tests).await;
    assert_eq!(report.passed, 0);
    assert_eq!(report.score_percent, 0.0);
    assert_eq!(report.per_test.len(), 2);
    assert!(report.per_test.iter().all(|t| t.actual.starts_with("Error: boom")));
  }

  #[tokio::test]
  async fn looping_code_times_out_per_case() {
    let tests = vec![TestCase::new("", "x")];
    let report = sh_evaluator().evaluate("while :; do :; done", &tests).await;
    assert_eq!(report.per_test[0].verdict, TestVerdict::Timeout);
    assert_eq!(report.per_test[0].actual, "Timeout (>1s)");
  }

  #[tokio::test]
  async fn no_tests_scores_zero() {
    let report = sh_evaluator().evaluate("echo hi", &[]).await;
    assert_eq!(report.total, 0);
    assert_eq!(report.score_percent, 0.0);
  }

  #[tokio::test]
  async fn python_array_sum_scores_full_marks() {
    if std::process::Command::new("python3").arg("--version").output().is_err() {
      eprintln!("python3 not available; skipping");
      return;
    }
    let ev = ResultEvaluator::new(SandboxExecutor::new(SandboxCfg::default()));
    let code = "import ast, sys\nprint(sum(ast.literal_eval(sys.stdin.read().strip())))\n";
    let tests = vec![TestCase::new("[1,2,3,4,5]", "15"), TestCase::new("[10,20]", "30"), TestCase::new("[0]", "0")];
    let report = ev.evaluate(code, &tests).await;
    assert_eq!((report.passed, report.total), (3, 3));
    assert_eq!(report.score_percent, 100.0);
  }
}
