//! QuizForge · Exam and Coding Practice Backend
//!
//! - Axum HTTP API for generating and grading multiple-choice exams and coding problems
//! - Tiered generation: optional remote model, then templates, then a basic fallback
//! - Submitted code runs in a throwaway sandbox process with a wall-clock limit
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   REMOTE_BASE_URL       : enables the remote generation tier if present
//!   REMOTE_API_KEY        : optional bearer token for the remote endpoint
//!   REMOTE_MODEL          : default "mistral"
//!   REMOTE_TIMEOUT_SECS   : per-request timeout for the remote endpoint
//!   QUIZFORGE_CONFIG_PATH : path to TOML config (prompts, limits, extra problems)
//!   SANDBOX_INTERPRETER   : overrides the interpreter used to run submissions
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod catalog;
mod llm;
mod generators;
mod orchestrator;
mod sandbox;
mod evaluator;
mod grading;
mod store;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Catalog self-test runs here; a misconfigured extra problem stops startup.
  let state = Arc::new(AppState::new()?);

  let remote_check = state.clone();
  tokio::spawn(async move { remote_check.check_remote().await });

  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizforge", %addr, "HTTP server listening");
  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  info!(target: "quizforge", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    error!(target: "quizforge", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "quizforge", "Shutdown signal received");
}
