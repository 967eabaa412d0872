use crate::llm::config::LlmConfig;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur in LLM service
#[derive(Debug, Error)]
pub enum LlmServiceError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Other error: {0}")]
    Other(String),
}

/// A chat completion backend.
///
/// The orchestrator only ever talks to this trait, so a fake can stand in for
/// the hosted model in tests.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Submit one conversation and return the raw text of the reply
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmServiceError>;

    /// Model identifier, used for logging
    fn model(&self) -> &str;
}

/// Service for interacting with the hosted chat completion API
pub struct LlmService {
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl LlmService {
    /// Create a new LLM service from configuration
    pub fn new(config: LlmConfig) -> Result<Self, LlmServiceError> {
        config.validate().map_err(LlmServiceError::ConfigError)?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.api_base);

        let client = Client::with_config(openai_config);

        Ok(Self { client, config })
    }

    /// Create a service from environment variables with CLI overrides applied
    pub fn from_env_with_options(enable_debug: bool, timeout_secs: Option<u64>) -> Result<Self, LlmServiceError> {
        let mut config = LlmConfig::from_env().map_err(LlmServiceError::ConfigError)?;
        config.debug = config.debug || enable_debug;
        if let Some(timeout_secs) = timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        Self::new(config)
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Send a chat completion request
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, LlmServiceError> {
        let openai_messages = messages
            .into_iter()
            .map(|msg| msg.into_openai_message())
            .collect::<Result<Vec<_>, _>>()
            .map_err(LlmServiceError::Other)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.config.model)
            .messages(openai_messages)
            .temperature(self.config.temperature)
            .max_completion_tokens(self.config.max_tokens)
            .build()
            .map_err(|e| LlmServiceError::ApiError(e.to_string()))?;

        if self.config.debug {
            tracing::debug!(
                "Sending chat request: model={}, messages_count={}",
                self.config.model,
                request.messages.len()
            );
        }

        let response = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            self.client.chat().create(request),
        )
        .await
        .map_err(|_| LlmServiceError::Timeout(self.config.timeout_secs))?
        .map_err(|e| {
            let message = e.to_string();
            if message.to_lowercase().contains("rate limit") {
                LlmServiceError::RateLimitExceeded
            } else {
                LlmServiceError::ApiError(message)
            }
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .ok_or_else(|| LlmServiceError::ParseError("No response content".to_string()))?
            .to_string();

        if self.config.debug {
            tracing::debug!("Received response: {} chars", content.len());
        }

        Ok(content)
    }
}

#[async_trait]
impl ChatModel for LlmService {
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, LlmServiceError> {
        self.chat(messages).await
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Chat message for LLM interactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    System(String),
    User(String),
    Assistant(String),
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    pub fn content(&self) -> &str {
        match self {
            ChatMessage::System(content)
            | ChatMessage::User(content)
            | ChatMessage::Assistant(content) => content,
        }
    }

    fn into_openai_message(self) -> Result<ChatCompletionRequestMessage, String> {
        match self {
            ChatMessage::System(content) => ChatCompletionRequestSystemMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::System)
                .map_err(|e| e.to_string()),
            ChatMessage::User(content) => ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::User)
                .map_err(|e| e.to_string()),
            ChatMessage::Assistant(content) => ChatCompletionRequestAssistantMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::Assistant)
                .map_err(|e| e.to_string()),
        }
    }
}
