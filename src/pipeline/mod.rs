//! Research-to-report orchestration
//!
//! One run is a strict chain of three external calls:
//! deep research, the initial report pass and the elaboration pass.
//! Each stage is dispatched onto a bounded [`StagePool`] and awaited before
//! the next one starts.

pub mod orchestrator;
pub mod pool;
pub mod stages;

pub use orchestrator::Orchestrator;
pub use pool::StagePool;
pub use stages::{ElaborationPipeline, InitialPipeline};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::llm::LlmServiceError;
use crate::research::ResearchOutcome;

/// Errors that abort a run. Research failures are not among them.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Llm(#[from] LlmServiceError),

    #[error("Stage '{stage}' worker failed: {message}")]
    Worker { stage: &'static str, message: String },

    #[error("Stage pool is closed")]
    PoolClosed,
}

/// The two reports produced by one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPair {
    pub initial_report: String,
    pub enhanced_report: String,
}

/// Everything one run produced, for callers that want more than the reports
#[derive(Debug, Clone, Serialize)]
pub struct ResearchRun {
    pub topic: String,
    pub research: ResearchOutcome,
    pub reports: ReportPair,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}
