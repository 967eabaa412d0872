pub mod config;
pub mod research;
pub mod serve;

pub use config::handle_config_command;
pub use research::handle_research_command;
pub use serve::handle_serve_command;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::llm::LlmService;
use crate::pipeline::{Orchestrator, StagePool};
use crate::research::{FirecrawlClient, ResearchConfig, ResearchParams};

/// Build the configured clients once and wire them into an orchestrator.
///
/// A missing LLM key is fatal; a missing research key only warns.
pub(crate) fn build_orchestrator(
    llmdbg: bool,
    llm_timeout: Option<u64>,
    params: ResearchParams,
    pool: StagePool,
) -> Result<Orchestrator> {
    let research_config = ResearchConfig::from_env();
    if !research_config.has_api_key() {
        warn!("FIRECRAWL_API_KEY not found in environment variables. Please check your .env file.");
    }
    let research_client = FirecrawlClient::new(&ResearchConfig {
        params,
        ..research_config
    })
    .context("Error initializing research client")?;

    let llm_service = LlmService::from_env_with_options(llmdbg, llm_timeout).context("Error initializing LLM")?;
    info!(
        "LLM initialized successfully (model={}, temperature={}, max_tokens={})",
        llm_service.config().model,
        llm_service.config().temperature,
        llm_service.config().max_tokens
    );

    Ok(Orchestrator::new(Arc::new(research_client), Arc::new(llm_service))
        .with_params(params)
        .with_pool(pool))
}
