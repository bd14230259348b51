//! Application state: catalog, generator tiers, sandbox/evaluator, and the set store.
//!
//! This module owns:
//!   - the problem catalog (built once, self-tested at startup)
//!   - the generation orchestrator with its ordered tiers
//!   - the sandbox executor and the evaluator built on it
//!   - the persistence collaborator (in-memory by default)
//!
//! The remote tier is only installed when REMOTE_BASE_URL is set. Without it the
//! service runs fully offline on the template and basic tiers.

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::catalog::ProblemCatalog;
use crate::config::{resolve_app_config, AppConfig, RemoteCfg};
use crate::error::CatalogError;
use crate::evaluator::ResultEvaluator;
use crate::generators::{BasicFallbackGenerator, Generator, RemoteGenerator, TemplateGenerator};
use crate::llm::ChatClient;
use crate::orchestrator::GenerationOrchestrator;
use crate::sandbox::SandboxExecutor;
use crate::store::{GeneratedSetStore, InMemoryStore};

pub struct AppState {
    pub catalog: Arc<ProblemCatalog>,
    pub orchestrator: GenerationOrchestrator,
    pub sandbox: SandboxExecutor,
    pub evaluator: ResultEvaluator,
    pub store: Arc<dyn GeneratedSetStore>,
    pub remote: Option<ChatClient>,
}

impl AppState {
    /// Build state from env: load config, build and self-test the catalog, wire tiers.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Result<Self, CatalogError> {
        let cfg = resolve_app_config();
        Self::from_parts(cfg, RemoteCfg::from_env(), Arc::new(InMemoryStore::new()))
    }

    pub fn from_parts(
        cfg: AppConfig,
        remote_cfg: Option<RemoteCfg>,
        store: Arc<dyn GeneratedSetStore>,
    ) -> Result<Self, CatalogError> {
        let catalog = Arc::new(ProblemCatalog::new(&cfg.problems)?);

        let remote = remote_cfg.and_then(|rc| match ChatClient::new(&rc) {
            Ok(client) => Some(client),
            Err(e) => {
                error!(target: "quizforge", error = %e, "Failed to build remote client; remote tier disabled.");
                None
            }
        });

        let mut tiers: Vec<Box<dyn Generator>> = Vec::with_capacity(3);
        if let Some(client) = &remote {
            tiers.push(Box::new(RemoteGenerator::new(
                client.clone(),
                cfg.prompts.clone(),
                cfg.generation.max_topup_rounds,
            )));
        }
        tiers.push(Box::new(TemplateGenerator::new(catalog.clone())));
        tiers.push(Box::new(BasicFallbackGenerator::new(catalog.clone())));

        let orchestrator = GenerationOrchestrator::new(tiers, cfg.generation.tier_timeout());
        let sandbox = SandboxExecutor::new(cfg.sandbox.clone());
        let evaluator = ResultEvaluator::new(sandbox.clone());

        info!(
            target: "quizforge",
            tiers = ?orchestrator.tiers(),
            interpreter = %cfg.sandbox.interpreter,
            catalog_version = catalog.version(),
            "Application state ready"
        );

        Ok(Self { catalog, orchestrator, sandbox, evaluator, store, remote })
    }

    /// Log whether the remote endpoint answers. The tier is attempted per request either way.
    pub async fn check_remote(&self) {
        match &self.remote {
            Some(client) => {
                client.check_connection().await;
            }
            None => info!(target: "quizforge", "REMOTE_BASE_URL not set; remote tier disabled."),
        }
    }
}
