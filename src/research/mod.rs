pub mod config;
pub mod firecrawl;
pub mod types;

pub use config::ResearchConfig;
pub use firecrawl::FirecrawlClient;
pub use types::{DeepResearchData, ResearchOutcome, ResearchParams, Source};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Substring the provider uses when its own upstream fetch fails
pub const NETWORK_FAILURE_MARKER: &str = "Network response was not ok";

/// User-facing text for any network-level research failure
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred while connecting to Firecrawl API. \
    Please check your API key and network connection.";

/// Errors that can occur while running a deep research job
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    #[error("FIRECRAWL_API_KEY is not configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Invalid response structure from Firecrawl API: {0}")]
    InvalidResponse(String),

    #[error("Deep research did not finish within {0} seconds")]
    Timeout(u64),
}

/// Failure category of a research call, so callers can branch without string matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchErrorKind {
    MissingApiKey,
    Network,
    Auth,
    Api,
    InvalidResponse,
    Timeout,
}

impl ResearchError {
    pub fn kind(&self) -> ResearchErrorKind {
        match self {
            ResearchError::MissingApiKey => ResearchErrorKind::MissingApiKey,
            ResearchError::Network(_) => ResearchErrorKind::Network,
            ResearchError::Auth(_) => ResearchErrorKind::Auth,
            ResearchError::Api(message) if message.contains(NETWORK_FAILURE_MARKER) => ResearchErrorKind::Network,
            ResearchError::Api(_) => ResearchErrorKind::Api,
            ResearchError::InvalidResponse(_) => ResearchErrorKind::InvalidResponse,
            ResearchError::Timeout(_) => ResearchErrorKind::Timeout,
        }
    }

    /// Message shown to the model (and ultimately the user) in place of research results
    pub fn user_message(&self) -> String {
        match self.kind() {
            ResearchErrorKind::Network => NETWORK_ERROR_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

/// A deep research backend
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    /// Run one deep research job to completion
    async fn deep_research(&self, query: &str, params: &ResearchParams) -> Result<DeepResearchData, ResearchError>;

    /// Provider name, used for logging
    fn name(&self) -> &'static str;
}

/// Run deep research and fold every failure into a `ResearchOutcome`.
///
/// Never returns an error: a failed call becomes `ResearchOutcome::Failure`
/// so the report pipeline can still proceed.
pub async fn invoke(provider: &dyn ResearchProvider, topic: &str, params: &ResearchParams) -> ResearchOutcome {
    info!("Starting research on: {}", topic);
    info!(
        "Calling {} deep research (max_depth={}, time_limit={}s, max_urls={})",
        provider.name(),
        params.max_depth,
        params.time_limit,
        params.max_urls
    );

    match provider.deep_research(topic, params).await {
        Ok(data) => {
            info!("Research completed successfully ({} sources)", data.sources.len());
            ResearchOutcome::Success {
                final_analysis: data.final_analysis,
                sources: data.sources,
            }
        }
        Err(e) => {
            warn!("Research error: {}", e);
            ResearchOutcome::Failure {
                kind: e.kind(),
                message: e.user_message(),
            }
        }
    }
}
