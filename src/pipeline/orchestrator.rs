use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use super::{ElaborationPipeline, InitialPipeline, PipelineError, ReportPair, ResearchRun, StagePool};
use crate::llm::ChatModel;
use crate::research::{self, ResearchOutcome, ResearchParams, ResearchProvider};

/// Drives research, the initial report pass and the elaboration pass in order.
///
/// Holds only read-only clients, so one instance is shared by every request.
pub struct Orchestrator {
    research: Arc<dyn ResearchProvider>,
    params: ResearchParams,
    initial: InitialPipeline,
    elaboration: ElaborationPipeline,
    pool: StagePool,
}

impl Orchestrator {
    pub fn new(research: Arc<dyn ResearchProvider>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            research,
            params: ResearchParams::default(),
            initial: InitialPipeline::new(model.clone()),
            elaboration: ElaborationPipeline::new(model),
            pool: StagePool::default(),
        }
    }

    pub fn with_params(mut self, params: ResearchParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_pool(mut self, pool: StagePool) -> Self {
        self.pool = pool;
        self
    }

    /// Run the full chain with the configured research parameters
    pub async fn run(&self, topic: &str) -> Result<ReportPair, PipelineError> {
        self.run_detailed(topic, self.params).await.map(|run| run.reports)
    }

    /// Run the full chain and keep the research outcome alongside the reports
    pub async fn run_detailed(&self, topic: &str, params: ResearchParams) -> Result<ResearchRun, PipelineError> {
        info!("Starting research process for topic: {}", topic);
        let started_at = Utc::now();
        let clock = Instant::now();

        let result = self.run_stages(topic, params).await;
        if let Err(e) = &result {
            error!("Error in research process: {}", e);
        }
        let (research, reports) = result?;

        Ok(ResearchRun {
            topic: topic.to_string(),
            research,
            reports,
            started_at,
            duration_ms: clock.elapsed().as_millis() as u64,
        })
    }

    async fn run_stages(
        &self,
        topic: &str,
        params: ResearchParams,
    ) -> Result<(ResearchOutcome, ReportPair), PipelineError> {
        let provider = self.research.clone();
        let query = topic.to_string();
        let research = self
            .pool
            .dispatch("research", async move {
                research::invoke(provider.as_ref(), &query, &params).await
            })
            .await?;

        if let ResearchOutcome::Failure { kind, message } = &research {
            warn!("Research failed ({:?}): {}; continuing with failure context", kind, message);
        }

        let pipeline = self.initial.clone();
        let query = topic.to_string();
        let context = research.clone();
        let initial_report = self
            .pool
            .dispatch("initial_report", async move { pipeline.invoke(&query, &context).await })
            .await??;
        info!("Initial research completed");

        let pipeline = self.elaboration.clone();
        let query = topic.to_string();
        let report = initial_report.clone();
        let enhanced_report = self
            .pool
            .dispatch("elaboration", async move { pipeline.invoke(&query, &report).await })
            .await??;
        info!("Enhanced report generated");

        Ok((
            research,
            ReportPair {
                initial_report,
                enhanced_report,
            },
        ))
    }
}
