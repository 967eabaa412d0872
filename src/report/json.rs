use super::{ReportGenerator, ReportResult};
use crate::pipeline::ResearchRun;
use crate::research::{ResearchErrorKind, ResearchOutcome, Source};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// JSON report structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub metadata: ReportMetadata,
    pub topic: String,
    pub research: ResearchSummary,
    pub initial_report: String,
    pub enhanced_report: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub report_generated_at: String,
    pub tool_version: String,
    pub research_started_at: String,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchSummary {
    pub succeeded: bool,
    pub source_count: usize,
    pub sources: Vec<Source>,
    pub failure: Option<String>,
    pub failure_kind: Option<ResearchErrorKind>,
}

/// JSON report generator
pub struct JsonReporter;

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    /// Build the JSON report structure
    pub fn generate_report(&self, run: &ResearchRun) -> JsonReport {
        let research = match &run.research {
            ResearchOutcome::Success { sources, .. } => ResearchSummary {
                succeeded: true,
                source_count: sources.len(),
                sources: sources.clone(),
                failure: None,
                failure_kind: None,
            },
            ResearchOutcome::Failure { kind, message } => ResearchSummary {
                succeeded: false,
                source_count: 0,
                sources: Vec::new(),
                failure: Some(message.clone()),
                failure_kind: Some(*kind),
            },
        };

        JsonReport {
            metadata: ReportMetadata {
                report_generated_at: Utc::now().to_rfc3339(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                research_started_at: run.started_at.to_rfc3339(),
                duration_ms: run.duration_ms,
            },
            topic: run.topic.clone(),
            research,
            initial_report: run.reports.initial_report.clone(),
            enhanced_report: run.reports.enhanced_report.clone(),
        }
    }
}

impl ReportGenerator for JsonReporter {
    fn render(&self, run: &ResearchRun) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(&self.generate_report(run))?)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
