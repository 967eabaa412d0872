use std::sync::Arc;

use crate::llm::prompts::{elaboration_prompt, initial_report_prompt};
use crate::llm::{ChatModel, LlmServiceError};
use crate::research::ResearchOutcome;

/// Research outcome -> initial report
#[derive(Clone)]
pub struct InitialPipeline {
    model: Arc<dyn ChatModel>,
}

impl InitialPipeline {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn invoke(&self, topic: &str, research: &ResearchOutcome) -> Result<String, LlmServiceError> {
        self.model.complete(initial_report_prompt(topic, research)).await
    }
}

/// Initial report -> enhanced report
#[derive(Clone)]
pub struct ElaborationPipeline {
    model: Arc<dyn ChatModel>,
}

impl ElaborationPipeline {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn invoke(&self, topic: &str, initial_report: &str) -> Result<String, LlmServiceError> {
        self.model.complete(elaboration_prompt(topic, initial_report)).await
    }
}
