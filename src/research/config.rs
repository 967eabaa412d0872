use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use super::ResearchParams;

pub const FIRECRAWL_API_BASE: &str = "https://api.firecrawl.dev";

/// Configuration for the deep research client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Firecrawl API key. Absence is tolerated at startup; calls then fail.
    pub api_key: Option<String>,

    /// Firecrawl API base URL
    pub api_base: String,

    /// Parameters used for every research job
    pub params: ResearchParams,

    /// Delay between job status polls
    pub poll_interval_ms: u64,

    /// Give up polling a job after this many seconds
    pub poll_timeout_secs: u64,

    /// Timeout of a single HTTP request to the provider
    pub request_timeout_secs: u64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: FIRECRAWL_API_BASE.to_string(),
            params: ResearchParams::default(),
            poll_interval_ms: 2000,
            poll_timeout_secs: 600,
            request_timeout_secs: 60,
        }
    }
}

impl ResearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_env_internal(true)
    }

    #[cfg(test)]
    fn from_env_no_dotenv() -> Self {
        Self::from_env_internal(false)
    }

    fn from_env_internal(load_dotenv: bool) -> Self {
        if load_dotenv {
            let _ = dotenv::dotenv();
        }

        let mut config = Self {
            api_key: env::var("FIRECRAWL_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            ..Default::default()
        };

        if let Ok(api_base) = env::var("FIRECRAWL_API_URL") {
            if !api_base.trim().is_empty() {
                config.api_base = api_base.trim_end_matches('/').to_string();
            }
        }

        config
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_base.trim().is_empty() {
            return Err("Firecrawl API base URL is empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }
        self.params.validate()
    }
}
