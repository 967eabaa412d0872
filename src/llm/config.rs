use serde::{Deserialize, Serialize};
use std::env;

/// Groq exposes an OpenAI-compatible API under this base URL
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Model used for both report passes
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Configuration for the chat completion client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Groq API key
    pub api_key: String,

    /// Model identifier (e.g., "llama-3.3-70b-versatile")
    pub model: String,

    /// API base URL of the OpenAI-compatible endpoint
    pub api_base: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum tokens for a single reply
    pub max_tokens: u32,

    /// Sampling temperature (0.0-2.0)
    pub temperature: f32,

    /// Enable debug logging of requests and replies
    pub debug: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: GROQ_API_BASE.to_string(),
            timeout_secs: 300,
            max_tokens: 4096,
            temperature: 0.5,
            debug: false,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_env_internal(true)
    }

    #[cfg(test)]
    fn from_env_no_dotenv() -> Result<Self, String> {
        Self::from_env_internal(false)
    }

    fn from_env_internal(load_dotenv: bool) -> Result<Self, String> {
        if load_dotenv {
            let _ = dotenv::dotenv();
        }

        let api_key = env::var("GROQ_API_KEY")
            .map_err(|_| "GROQ_API_KEY environment variable is not set. Please check your .env file.")?;

        if api_key.trim().is_empty() {
            return Err("GROQ_API_KEY is empty".to_string());
        }

        let mut config = Self {
            api_key,
            ..Default::default()
        };

        if let Ok(model) = env::var("GROQ_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }

        if let Ok(api_base) = env::var("GROQ_API_BASE") {
            if !api_base.trim().is_empty() {
                config.api_base = api_base;
            }
        }

        if let Ok(timeout) = env::var("LLM_REQUEST_TIMEOUT") {
            if let Ok(timeout_secs) = timeout.parse::<u64>() {
                config.timeout_secs = timeout_secs;
            }
        }

        if let Ok(max_tokens) = env::var("LLM_MAX_TOKENS") {
            if let Ok(tokens) = max_tokens.parse::<u32>() {
                config.max_tokens = tokens;
            }
        }

        if let Ok(temperature) = env::var("LLM_TEMPERATURE") {
            if let Ok(temp) = temperature.parse::<f32>() {
                if (0.0..=2.0).contains(&temp) {
                    config.temperature = temp;
                }
            }
        }

        if let Ok(debug) = env::var("LLM_DEBUG") {
            config.debug = debug.to_lowercase() == "true" || debug == "1";
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("API key is empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("Temperature must be between 0.0 and 2.0, got {}", self.temperature));
        }

        if self.max_tokens == 0 {
            return Err("Max tokens must be greater than 0".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if self.model.trim().is_empty() {
            return Err("Model identifier is empty".to_string());
        }

        Ok(())
    }
}
