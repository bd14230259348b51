//! Runs untrusted source in a child process with a wall-clock limit.
//!
//! Each call stages the program and its stdin in a fresh temp directory,
//! spawns the interpreter with a cleared environment and the temp directory as
//! its working directory, and captures stdout/stderr concurrently (each capped).
//! The child leads its own process group. When it exits or times out the whole
//! group is killed, so anything it started in the background dies with it.
//! The temp directory is removed on every exit path; removal failures are
//! logged, never returned.
//!
//! This is process isolation only: no seccomp, namespaces or network
//! restriction. Run behind OS-level sandboxing for hostile workloads.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

use crate::config::SandboxCfg;
use crate::domain::ExecutionResult;
use crate::error::SandboxError;

const INPUT_FILE_NAME: &str = "input.txt";
/// How long to wait for the output readers once the child is gone.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
pub struct SandboxExecutor {
  cfg: SandboxCfg,
}

impl SandboxExecutor {
  pub fn new(cfg: SandboxCfg) -> Self {
    Self { cfg }
  }

  /// Budget for free-form runs.
  pub fn run_timeout(&self) -> Duration {
    Duration::from_secs(self.cfg.run_timeout_secs)
  }

  /// Budget for each graded test case.
  pub fn test_timeout(&self) -> Duration {
    Duration::from_secs(self.cfg.test_timeout_secs)
  }

  pub fn error_preview_chars(&self) -> usize {
    self.cfg.error_preview_chars
  }

  #[instrument(
    level = "debug",
    target = "sandbox",
    skip(self, source_code, stdin_text),
    fields(code_len = source_code.len(), stdin_len = stdin_text.len(), timeout_ms = timeout.as_millis() as u64)
  )]
  pub async fn run(&self, source_code: &str, stdin_text: &str, timeout: Duration) -> Result<ExecutionResult, SandboxError> {
    let dir = tempfile::Builder::new()
      .prefix("quizforge-")
      .tempdir()
      .map_err(SandboxError::Stage)?;

    let result = self.run_in(dir.path(), source_code, stdin_text, timeout).await;

    let dir_path = dir.path().to_path_buf();
    if let Err(e) = dir.close() {
      warn!(target: "sandbox", path = %dir_path.display(), error = %e, "Failed to remove sandbox directory");
    }
    result
  }

  async fn run_in(
    &self,
    workdir: &Path,
    source_code: &str,
    stdin_text: &str,
    timeout: Duration,
  ) -> Result<ExecutionResult, SandboxError> {
    let source_path = workdir.join(&self.cfg.source_file_name);
    let input_path = workdir.join(INPUT_FILE_NAME);
    tokio::fs::write(&source_path, source_code).await.map_err(SandboxError::Stage)?;
    tokio::fs::write(&input_path, stdin_text).await.map_err(SandboxError::Stage)?;
    let stdin_file = std::fs::File::open(&input_path).map_err(SandboxError::Stage)?;

    let mut cmd = Command::new(&self.cfg.interpreter);
    cmd
      .args(&self.cfg.interpreter_args)
      .arg(&source_path)
      .current_dir(workdir)
      .stdin(Stdio::from(stdin_file))
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .env_clear()
      .env("PATH", std::env::var("PATH").unwrap_or_else(|_| "/usr/local/bin:/usr/bin:/bin".into()))
      .env("PYTHONIOENCODING", "utf-8")
      .env("PYTHONDONTWRITEBYTECODE", "1")
      .kill_on_drop(true);
    if let Ok(lang) = std::env::var("LANG") {
      cmd.env("LANG", lang);
    }
    #[cfg(unix)]
    cmd.process_group(0);

    let started = Instant::now();
    let mut child = cmd.spawn().map_err(|source| SandboxError::Spawn {
      program: self.cfg.interpreter.clone(),
      source,
    })?;
    let pgid = child.id();

    let cap = self.cfg.max_output_bytes;
    let stdout_task = tokio::spawn(read_capped(child.stdout.take(), cap));
    let stderr_task = tokio::spawn(read_capped(child.stderr.take(), cap));

    let (exit_code, timed_out) = match tokio::time::timeout(timeout, child.wait()).await {
      Ok(Ok(status)) => {
        kill_group(pgid);
        (status.code().unwrap_or(-1), false)
      }
      Ok(Err(e)) => {
        kill_group(pgid);
        stdout_task.abort();
        stderr_task.abort();
        return Err(SandboxError::Wait(e));
      }
      Err(_) => {
        kill_group(pgid);
        if let Err(e) = child.kill().await {
          warn!(target: "sandbox", error = %e, "Failed to kill timed-out child");
        }
        (-1, true)
      }
    };
    let duration_ms = started.elapsed().as_millis() as u64;

    let stdout = collect(stdout_task).await;
    let stderr = collect(stderr_task).await;
    debug!(target: "sandbox", exit_code, timed_out, duration_ms, stdout_len = stdout.len(), stderr_len = stderr.len(), "Child finished");

    Ok(ExecutionResult {
      stdout: String::from_utf8_lossy(&stdout).into_owned(),
      stderr: String::from_utf8_lossy(&stderr).into_owned(),
      exit_code,
      timed_out,
      duration_ms,
    })
  }
}

/// SIGKILL every process in the group led by `pgid`. An empty group is not an error.
#[cfg(unix)]
fn kill_group(pgid: Option<u32>) {
  let Some(pgid) = pgid.and_then(|p| libc::pid_t::try_from(p).ok()) else {
    return;
  };
  // SAFETY: kill(2) with a negative pid only signals; no memory is shared.
  let rc = unsafe { libc::kill(-pgid, libc::SIGKILL) };
  if rc != 0 {
    let err = std::io::Error::last_os_error();
    if err.raw_os_error() != Some(libc::ESRCH) {
      warn!(target: "sandbox", pgid, error = %err, "Failed to kill process group");
    }
  }
}

#[cfg(not(unix))]
fn kill_group(_pgid: Option<u32>) {}

/// Read everything, keep at most `cap` bytes. The rest is drained so the child never blocks on a full pipe.
async fn read_capped<R: AsyncRead + Unpin>(reader: Option<R>, cap: usize) -> Vec<u8> {
  let Some(mut reader) = reader else {
    return Vec::new();
  };
  let mut kept = Vec::new();
  let mut buf = [0u8; 8192];
  loop {
    match reader.read(&mut buf).await {
      Ok(0) | Err(_) => break,
      Ok(n) => {
        let room = cap.saturating_sub(kept.len());
        kept.extend_from_slice(&buf[..n.min(room)]);
      }
    }
  }
  kept
}

/// A grandchild may still hold the pipe open; don't wait on it forever.
async fn collect(mut task: JoinHandle<Vec<u8>>) -> Vec<u8> {
  match tokio::time::timeout(DRAIN_GRACE, &mut task).await {
    Ok(Ok(bytes)) => bytes,
    Ok(Err(_)) => Vec::new(),
    Err(_) => {
      task.abort();
      Vec::new()
    }
  }
}
